#![warn(clippy::all)]

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate error_chain;

mod account;
mod api_client;
mod cli;
mod constants;
mod goal_planner;
mod goal_projection;
mod models;
mod overview;
mod report;
mod schema;
mod session_store;
mod types;
mod utilities;

mod errors {
    error_chain! {
        errors {
            NotLoggedIn {
                description("not logged in")
                display("You are not logged in. Run the 'login' command first.")
            }
            SessionExpired {
                description("session expired")
                display("Your session has expired. Please log in again.")
            }
            ServiceError(message: String) {
                description("service error")
                display("The planning service reported an error: {}", message)
            }
            InvalidGoalHorizon(target_years: u32) {
                description("invalid goal horizon")
                display("Goal target period must be at least one year: {}", target_years)
            }
        }
    }
}

pub use cli::run;
