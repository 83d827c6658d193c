use chrono::Local;
use log::debug;

use crate::api_client::*;
use crate::constants::*;
use crate::errors::*;
use crate::models::*;
use crate::report::*;
use crate::session_store::*;
use crate::utilities::*;

pub struct AccountManager<'a> {
    store: &'a SessionStore,
    api_url: &'a str,
}

impl<'a> AccountManager<'a> {
    pub fn new(store: &'a SessionStore, api_url: &'a str) -> AccountManager<'a> {
        AccountManager { store, api_url }
    }

    pub fn register(&self, full_name: &str, email: &str, password: &str) -> Result<()> {
        ensure!(
            EMAIL_REGEX.is_match(email),
            "Invalid email address: {}",
            email
        );
        ensure!(
            password.chars().count() >= MIN_PASSWORD_LENGTH,
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        );
        let client = PlannerApiClient::new(self.api_url, None);
        println!("Creating your PocketPlan account...");
        let envelope = client.register(&RegisterRequest {
            full_name,
            email,
            password,
        })?;
        debug!("Registration response user: {:#?}", &envelope.user);
        self.store
            .save(&envelope.token, &envelope.user, Local::now().naive_local())?;
        println!(
            "Welcome, {}! You are now logged in.",
            envelope.user.full_name
        );
        Ok(())
    }

    pub fn login(&self, email: &str, password: &str) -> Result<()> {
        let client = PlannerApiClient::new(self.api_url, None);
        println!("Logging in to PocketPlan...");
        let envelope = client.login(&LoginRequest { email, password })?;
        debug!("Login response user: {:#?}", &envelope.user);
        self.store
            .save(&envelope.token, &envelope.user, Local::now().naive_local())?;
        println!("Welcome back, {}!", envelope.user.full_name);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        if self.store.clear()? {
            println!("Logged out.");
        } else {
            println!("No session saved; nothing to do!");
        }
        Ok(())
    }

    /// Shows the logged-in account. Reads the local session by default; with
    /// `remote` set, asks the service instead so a stale token surfaces.
    pub fn whoami(&self, remote: bool) -> Result<()> {
        let session = self.store.load()?.chain_err(|| ErrorKind::NotLoggedIn)?;
        let user = if remote {
            println!("Loading your account from PocketPlan...");
            let client = PlannerApiClient::new(self.api_url, Some(&session.token));
            let user = client.me()?;
            debug!("Account response user: {:#?}", &user);
            user
        } else {
            session.user.clone()
        };
        println!("      Name: {}", user.full_name);
        println!("     Email: {}", user.email);
        if let Some(created_at) = &user.created_at {
            println!(
                "   Created: {}",
                format_display_date(parse_iso_timestamp(created_at)?)
            );
        }
        println!(" Logged in: {}", format_display_date(session.saved_at));
        Ok(())
    }

    pub fn submit_details(&self, form: &FinancialDetailsForm) -> Result<()> {
        ensure!(form.salary > 0.0, "Monthly salary must be greater than 0");
        ensure!(!form.city.trim().is_empty(), "City must not be empty");
        ensure!(!form.area.trim().is_empty(), "Area must not be empty");
        let session = self.store.load()?.chain_err(|| ErrorKind::NotLoggedIn)?;
        let client = PlannerApiClient::new(self.api_url, Some(&session.token));
        println!("Saving your financial details to PocketPlan...");
        let payload = client.save_financial_data(form)?;
        debug!("Saved financial data: {:#?}", &payload);
        let profile = FinancialProfile::from_payload(payload)?;
        println!("Done!");
        println!();
        println!(
            "   Total Expenses: {}",
            format_rupees(profile.total_expenses)
        );
        println!(
            "  Monthly Savings: {}",
            format_rupees(profile.monthly_savings)
        );
        println!("     Savings Rate: {}%", profile.savings_rate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::establish(":memory:").unwrap()
    }

    fn form(salary: f64) -> FinancialDetailsForm {
        FinancialDetailsForm {
            salary,
            rent: 15_000.0,
            food: 8_000.0,
            travel: 4_000.0,
            others: 3_000.0,
            savings_goal: 120_000.0,
            goal_name: "Emergency Fund".to_string(),
            target_years: 2,
            job_type: "private".to_string(),
            city: "Bangalore".to_string(),
            area: "Indiranagar".to_string(),
            rent_budget: 18_000.0,
        }
    }

    #[test]
    fn test_register_rejects_invalid_email() {
        let store = store();
        let manager = AccountManager::new(&store, DEFAULT_API_URL);
        assert!(manager
            .register("Asha Rao", "not-an-email", "longenough")
            .is_err());
        assert!(manager
            .register("Asha Rao", "asha@nodomain", "longenough")
            .is_err());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let store = store();
        let manager = AccountManager::new(&store, DEFAULT_API_URL);
        assert!(manager
            .register("Asha Rao", "asha@example.com", "short")
            .is_err());
    }

    #[test]
    fn test_whoami_requires_login() {
        let store = store();
        let manager = AccountManager::new(&store, DEFAULT_API_URL);
        match manager.whoami(false) {
            Err(Error(ErrorKind::NotLoggedIn, _)) => {}
            result => panic!("unexpected result: {:?}", result),
        }
    }

    #[test]
    fn test_submit_details_requires_positive_salary() {
        let store = store();
        let manager = AccountManager::new(&store, DEFAULT_API_URL);
        assert!(manager.submit_details(&form(0.0)).is_err());
    }
}
