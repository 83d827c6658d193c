use std::env;
use std::ffi::OsStr;

use crate::account::*;
use crate::api_client::*;
use crate::constants::*;
use crate::errors::*;
use crate::goal_planner::*;
use crate::models::*;
use crate::overview::*;
use crate::session_store::*;
use crate::types::*;

pub fn run() -> Result<()> {
    initialize()?;
    run_clap_matches(get_clap_matches())
}

fn initialize() -> Result<()> {
    openssl_probe::init_ssl_cert_env_vars();
    dotenv::dotenv().ok();
    env_logger::init();

    let proj_dirs = directories::ProjectDirs::from("in", "pocketplan", clap::crate_name!())
        .chain_err(|| "Failed to determine user data directory")?;
    let mut default_session_file = proj_dirs.data_dir().to_path_buf();
    default_session_file.push(DEFAULT_SESSION_FILENAME);

    default_env(SESSION_FILE_ENV, default_session_file);
    default_env(API_URL_ENV, DEFAULT_API_URL);

    Ok(())
}

fn get_clap_matches() -> clap::ArgMatches<'static> {
    clap::App::new(clap::crate_name!())
        .version(option_env!("CI_BUILD_VERSION").unwrap_or(clap::crate_version!()))
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .setting(clap::AppSettings::SubcommandRequiredElseHelp)
        .arg(
            clap::Arg::with_name(API_URL_ARG)
                .env(API_URL_ENV)
                .long(API_URL_ARG)
                .value_name("URL")
                .help("Base URL of the PocketPlan API")
                .takes_value(true)
                .global(true),
        )
        .arg(
            clap::Arg::with_name(SESSION_FILE_ARG)
                .env(SESSION_FILE_ENV)
                .long(SESSION_FILE_ARG)
                .value_name("PATH")
                .help("Set the session file where the login token will be stored")
                .takes_value(true)
                .global(true),
        )
        .subcommand(
            clap::SubCommand::with_name(REGISTER_SUBCOMMAND)
                .about("Create a PocketPlan account and log in")
                .arg(
                    clap::Arg::with_name(FULL_NAME_ARG)
                        .long(FULL_NAME_ARG)
                        .value_name("NAME")
                        .help("Your full name")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name(EMAIL_ARG)
                        .long(EMAIL_ARG)
                        .value_name("EMAIL")
                        .help("Email address to register with")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name(PASSWORD_ARG)
                        .env(PASSWORD_ENV)
                        .long(PASSWORD_ARG)
                        .value_name("PASSWORD")
                        .help("Account password (prefer setting it via the environment)")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name(LOGIN_SUBCOMMAND)
                .about("Log in to PocketPlan")
                .arg(
                    clap::Arg::with_name(EMAIL_ARG)
                        .long(EMAIL_ARG)
                        .value_name("EMAIL")
                        .help("Email address of the account")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name(PASSWORD_ARG)
                        .env(PASSWORD_ENV)
                        .long(PASSWORD_ARG)
                        .value_name("PASSWORD")
                        .help("Account password (prefer setting it via the environment)")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name(LOGOUT_SUBCOMMAND)
                .about("Log out and forget the saved session"),
        )
        .subcommand(
            clap::SubCommand::with_name(WHOAMI_SUBCOMMAND)
                .about("Show the logged-in account")
                .arg(
                    clap::Arg::with_name(REMOTE_ARG)
                        .long(REMOTE_ARG)
                        .help("Ask the service instead of reading the local session"),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name(UPDATE_SUBCOMMAND)
                .about("Save your income, expenses and savings goal")
                .arg(
                    clap::Arg::with_name(SALARY_ARG)
                        .long(SALARY_ARG)
                        .value_name("AMOUNT")
                        .help("Monthly salary in rupees")
                        .takes_value(true)
                        .required(true)
                        .validator(validate_positive_number),
                )
                .arg(
                    clap::Arg::with_name(RENT_ARG)
                        .long(RENT_ARG)
                        .value_name("AMOUNT")
                        .help("Monthly rent in rupees")
                        .takes_value(true)
                        .default_value("0")
                        .validator(validate_non_negative_number),
                )
                .arg(
                    clap::Arg::with_name(FOOD_ARG)
                        .long(FOOD_ARG)
                        .value_name("AMOUNT")
                        .help("Monthly food spending in rupees")
                        .takes_value(true)
                        .default_value("0")
                        .validator(validate_non_negative_number),
                )
                .arg(
                    clap::Arg::with_name(TRAVEL_ARG)
                        .long(TRAVEL_ARG)
                        .value_name("AMOUNT")
                        .help("Monthly travel spending in rupees")
                        .takes_value(true)
                        .default_value("0")
                        .validator(validate_non_negative_number),
                )
                .arg(
                    clap::Arg::with_name(OTHERS_ARG)
                        .long(OTHERS_ARG)
                        .value_name("AMOUNT")
                        .help("Other monthly spending in rupees")
                        .takes_value(true)
                        .default_value("0")
                        .validator(validate_non_negative_number),
                )
                .arg(
                    clap::Arg::with_name(GOAL_AMOUNT_ARG)
                        .long(GOAL_AMOUNT_ARG)
                        .value_name("AMOUNT")
                        .help("Savings goal amount in rupees")
                        .takes_value(true)
                        .default_value("0")
                        .validator(validate_non_negative_number),
                )
                .arg(
                    clap::Arg::with_name(GOAL_NAME_ARG)
                        .long(GOAL_NAME_ARG)
                        .value_name("NAME")
                        .help("Name of the savings goal (omit to leave no goal configured)")
                        .takes_value(true),
                )
                .arg(
                    clap::Arg::with_name(TARGET_YEARS_ARG)
                        .long(TARGET_YEARS_ARG)
                        .value_name("YEARS")
                        .help("Years to reach the savings goal")
                        .takes_value(true)
                        .default_value("1")
                        .validator(validate_target_years),
                )
                .arg(
                    clap::Arg::with_name(JOB_TYPE_ARG)
                        .long(JOB_TYPE_ARG)
                        .value_name("TYPE")
                        .help("Employment type")
                        .takes_value(true)
                        .default_value("private"),
                )
                .arg(
                    clap::Arg::with_name(CITY_ARG)
                        .long(CITY_ARG)
                        .value_name("CITY")
                        .help("City you live in")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name(AREA_ARG)
                        .long(AREA_ARG)
                        .value_name("AREA")
                        .help("Area of the city you live in")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    clap::Arg::with_name(RENT_BUDGET_ARG)
                        .long(RENT_BUDGET_ARG)
                        .value_name("AMOUNT")
                        .help("Monthly rent budget used for location recommendations")
                        .takes_value(true)
                        .default_value("0")
                        .validator(validate_non_negative_number),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name(GOAL_SUBCOMMAND)
                .about("Show your savings goal plan")
                .arg(
                    clap::Arg::with_name(VIEW_ARG)
                        .long(VIEW_ARG)
                        .value_name("VIEW")
                        .help("Plan granularity")
                        .takes_value(true)
                        .default_value("yearly")
                        .possible_values(&POSSIBLE_VIEW_VALUES),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name(PREDICT_SUBCOMMAND)
                .about("Project savings month by month")
                .arg(
                    clap::Arg::with_name(MONTHS_ARG)
                        .long(MONTHS_ARG)
                        .value_name("MONTHS")
                        .help("How many months to project")
                        .takes_value(true)
                        .default_value("12")
                        .validator(validate_forecast_months),
                ),
        )
        .subcommand(
            clap::SubCommand::with_name(DASHBOARD_SUBCOMMAND)
                .about("Show your financial overview"),
        )
        .subcommand(
            clap::SubCommand::with_name(ANALYSIS_SUBCOMMAND).about("Show budget insights"),
        )
        .subcommand(
            clap::SubCommand::with_name(ADVISOR_SUBCOMMAND).about("Show expense-cutting tips"),
        )
        .subcommand(
            clap::SubCommand::with_name(LOCATIONS_SUBCOMMAND)
                .about("Show recommended areas near your city"),
        )
        .subcommand(
            clap::SubCommand::with_name(HEALTH_SUBCOMMAND)
                .about("Show your financial health score"),
        )
        .subcommand(
            clap::SubCommand::with_name(STATUS_SUBCOMMAND).about("Check the service status"),
        )
        .get_matches()
}

fn run_clap_matches(matches: clap::ArgMatches) -> Result<()> {
    let (command, sub_matches) = match matches.subcommand() {
        (command, Some(sub_matches)) => (command, sub_matches),
        (command, None) => bail!("Unknown command: {}", command),
    };
    let api_url = sub_matches
        .value_of(API_URL_ARG)
        .or_else(|| matches.value_of(API_URL_ARG))
        .expect("CLAP matches should have API_URL_ARG");
    let session_file = sub_matches
        .value_of(SESSION_FILE_ARG)
        .or_else(|| matches.value_of(SESSION_FILE_ARG))
        .expect("CLAP matches should have SESSION_FILE_ARG");
    let store = SessionStore::establish(session_file)?;
    let result = dispatch(command, sub_matches, &store, api_url);
    // A 401 on an authenticated route means the saved token is no longer
    // good; drop it so the next command starts clean.
    if let Err(Error(ErrorKind::SessionExpired, _)) = &result {
        store.clear()?;
    }
    result
}

fn dispatch(
    command: &str,
    sub_matches: &clap::ArgMatches,
    store: &SessionStore,
    api_url: &str,
) -> Result<()> {
    match command {
        REGISTER_SUBCOMMAND => AccountManager::new(store, api_url).register(
            sub_matches
                .value_of(FULL_NAME_ARG)
                .expect("CLAP matches should have FULL_NAME_ARG"),
            sub_matches
                .value_of(EMAIL_ARG)
                .expect("CLAP matches should have EMAIL_ARG"),
            sub_matches
                .value_of(PASSWORD_ARG)
                .expect("CLAP matches should have PASSWORD_ARG"),
        ),
        LOGIN_SUBCOMMAND => AccountManager::new(store, api_url).login(
            sub_matches
                .value_of(EMAIL_ARG)
                .expect("CLAP matches should have EMAIL_ARG"),
            sub_matches
                .value_of(PASSWORD_ARG)
                .expect("CLAP matches should have PASSWORD_ARG"),
        ),
        LOGOUT_SUBCOMMAND => AccountManager::new(store, api_url).logout(),
        WHOAMI_SUBCOMMAND => {
            AccountManager::new(store, api_url).whoami(sub_matches.is_present(REMOTE_ARG))
        }
        UPDATE_SUBCOMMAND => {
            AccountManager::new(store, api_url).submit_details(&details_form_from_matches(sub_matches))
        }
        STATUS_SUBCOMMAND => {
            let client = PlannerApiClient::new(api_url, None);
            OverviewReporter::new(&client).service_status()
        }
        _ => {
            let session = store.load()?.chain_err(|| ErrorKind::NotLoggedIn)?;
            let client = PlannerApiClient::new(api_url, Some(&session.token));
            match command {
                GOAL_SUBCOMMAND => {
                    let granularity = Granularity::from_str(
                        sub_matches
                            .value_of(VIEW_ARG)
                            .expect("CLAP matches should have VIEW_ARG"),
                    )?;
                    GoalPlanner::run(&client, granularity)
                }
                PREDICT_SUBCOMMAND => {
                    let months = clap::value_t!(sub_matches.value_of(MONTHS_ARG), u32)
                        .expect("CLAP matches should have valid MONTHS_ARG");
                    SavingsForecaster::run(&client, months)
                }
                DASHBOARD_SUBCOMMAND => OverviewReporter::new(&client).dashboard(),
                ANALYSIS_SUBCOMMAND => OverviewReporter::new(&client).analysis(),
                ADVISOR_SUBCOMMAND => OverviewReporter::new(&client).advisor(),
                LOCATIONS_SUBCOMMAND => OverviewReporter::new(&client).locations(),
                HEALTH_SUBCOMMAND => OverviewReporter::new(&client).health_score(),
                _ => bail!("Unknown command: {}", command),
            }
        }
    }
}

fn details_form_from_matches(sub_matches: &clap::ArgMatches) -> FinancialDetailsForm {
    FinancialDetailsForm {
        salary: clap::value_t!(sub_matches.value_of(SALARY_ARG), f64)
            .expect("CLAP matches should have valid SALARY_ARG"),
        rent: clap::value_t!(sub_matches.value_of(RENT_ARG), f64)
            .expect("CLAP matches should have valid RENT_ARG"),
        food: clap::value_t!(sub_matches.value_of(FOOD_ARG), f64)
            .expect("CLAP matches should have valid FOOD_ARG"),
        travel: clap::value_t!(sub_matches.value_of(TRAVEL_ARG), f64)
            .expect("CLAP matches should have valid TRAVEL_ARG"),
        others: clap::value_t!(sub_matches.value_of(OTHERS_ARG), f64)
            .expect("CLAP matches should have valid OTHERS_ARG"),
        savings_goal: clap::value_t!(sub_matches.value_of(GOAL_AMOUNT_ARG), f64)
            .expect("CLAP matches should have valid GOAL_AMOUNT_ARG"),
        goal_name: sub_matches
            .value_of(GOAL_NAME_ARG)
            .unwrap_or_default()
            .to_string(),
        target_years: clap::value_t!(sub_matches.value_of(TARGET_YEARS_ARG), u32)
            .expect("CLAP matches should have valid TARGET_YEARS_ARG"),
        job_type: sub_matches
            .value_of(JOB_TYPE_ARG)
            .expect("CLAP matches should have JOB_TYPE_ARG")
            .to_string(),
        city: sub_matches
            .value_of(CITY_ARG)
            .expect("CLAP matches should have CITY_ARG")
            .to_string(),
        area: sub_matches
            .value_of(AREA_ARG)
            .expect("CLAP matches should have AREA_ARG")
            .to_string(),
        rent_budget: clap::value_t!(sub_matches.value_of(RENT_BUDGET_ARG), f64)
            .expect("CLAP matches should have valid RENT_BUDGET_ARG"),
    }
}

fn validate_positive_number(value: String) -> std::result::Result<(), String> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => Ok(()),
        _ => Err(format!("must be a number greater than 0 (got: {})", value)),
    }
}

fn validate_non_negative_number(value: String) -> std::result::Result<(), String> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(()),
        _ => Err(format!("must be a non-negative number (got: {})", value)),
    }
}

fn validate_target_years(value: String) -> std::result::Result<(), String> {
    match value.parse::<u32>() {
        Ok(years) if years >= 1 => Ok(()),
        _ => Err(format!(
            "must be a whole number of years, at least 1 (got: {})",
            value
        )),
    }
}

fn validate_forecast_months(value: String) -> std::result::Result<(), String> {
    match value.parse::<u32>() {
        Ok(months) if months >= 1 && months <= MAX_FORECAST_MONTHS => Ok(()),
        _ => Err(format!(
            "must be between 1 and {} months (got: {})",
            MAX_FORECAST_MONTHS, value
        )),
    }
}

fn default_env<V: AsRef<OsStr>>(var_name: &str, default_value: V) {
    if let Err(env::VarError::NotPresent) = env::var(var_name) {
        env::set_var(var_name, default_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("50000".to_string()).is_ok());
        assert!(validate_positive_number("0".to_string()).is_err());
        assert!(validate_positive_number("-1".to_string()).is_err());
        assert!(validate_positive_number("abc".to_string()).is_err());
    }

    #[test]
    fn test_validate_non_negative_number() {
        assert!(validate_non_negative_number("0".to_string()).is_ok());
        assert!(validate_non_negative_number("120000.50".to_string()).is_ok());
        assert!(validate_non_negative_number("-0.01".to_string()).is_err());
        assert!(validate_non_negative_number("NaN".to_string()).is_err());
    }

    #[test]
    fn test_validate_target_years() {
        assert!(validate_target_years("1".to_string()).is_ok());
        assert!(validate_target_years("40".to_string()).is_ok());
        assert!(validate_target_years("0".to_string()).is_err());
        assert!(validate_target_years("1.5".to_string()).is_err());
        assert!(validate_target_years("-2".to_string()).is_err());
    }

    #[test]
    fn test_validate_forecast_months() {
        assert!(validate_forecast_months("1".to_string()).is_ok());
        assert!(validate_forecast_months("60".to_string()).is_ok());
        assert!(validate_forecast_months("0".to_string()).is_err());
        assert!(validate_forecast_months("61".to_string()).is_err());
    }
}
