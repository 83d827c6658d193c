use lazy_static::lazy_static;
use regex::Regex;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SESSION_FILENAME: &str = "session.sqlite3";

pub const API_URL_ARG: &str = "api-url";
pub const API_URL_ENV: &str = "POCKETPLAN_API_URL";
pub const SESSION_FILE_ARG: &str = "session-file";
pub const SESSION_FILE_ENV: &str = "POCKETPLAN_SESSION_FILE";
pub const PASSWORD_ARG: &str = "password";
pub const PASSWORD_ENV: &str = "POCKETPLAN_PASSWORD";

pub const REGISTER_SUBCOMMAND: &str = "register";
pub const LOGIN_SUBCOMMAND: &str = "login";
pub const LOGOUT_SUBCOMMAND: &str = "logout";
pub const WHOAMI_SUBCOMMAND: &str = "whoami";
pub const UPDATE_SUBCOMMAND: &str = "update";
pub const GOAL_SUBCOMMAND: &str = "goal";
pub const PREDICT_SUBCOMMAND: &str = "predict";
pub const DASHBOARD_SUBCOMMAND: &str = "dashboard";
pub const ANALYSIS_SUBCOMMAND: &str = "analysis";
pub const ADVISOR_SUBCOMMAND: &str = "advisor";
pub const LOCATIONS_SUBCOMMAND: &str = "locations";
pub const HEALTH_SUBCOMMAND: &str = "health";
pub const STATUS_SUBCOMMAND: &str = "status";

pub const FULL_NAME_ARG: &str = "full-name";
pub const EMAIL_ARG: &str = "email";
pub const REMOTE_ARG: &str = "remote";
pub const SALARY_ARG: &str = "salary";
pub const RENT_ARG: &str = "rent";
pub const FOOD_ARG: &str = "food";
pub const TRAVEL_ARG: &str = "travel";
pub const OTHERS_ARG: &str = "others";
pub const GOAL_NAME_ARG: &str = "goal-name";
pub const GOAL_AMOUNT_ARG: &str = "goal-amount";
pub const TARGET_YEARS_ARG: &str = "target-years";
pub const JOB_TYPE_ARG: &str = "job-type";
pub const CITY_ARG: &str = "city";
pub const AREA_ARG: &str = "area";
pub const RENT_BUDGET_ARG: &str = "rent-budget";
pub const VIEW_ARG: &str = "view";
pub const MONTHS_ARG: &str = "months";

pub const POSSIBLE_VIEW_VALUES: [&str; 2] = ["yearly", "monthly"];

pub const MAX_FORECAST_MONTHS: u32 = 60;
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const GOOD_SCORE_FLOOR: f64 = 71.0;
pub const AVERAGE_SCORE_FLOOR: f64 = 41.0;

lazy_static! {
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX should be valid");
}
