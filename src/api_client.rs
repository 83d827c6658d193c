use log::debug;
use reqwest::StatusCode;
use serde::Serialize;
use std::collections::HashMap;

use crate::errors::*;
use crate::models::*;

#[derive(Debug)]
pub struct PlannerApiClient<'a> {
    http: reqwest::Client,
    base_url: &'a str,
    token: Option<&'a str>,
}

impl<'a> PlannerApiClient<'a> {
    pub fn new(base_url: &'a str, token: Option<&'a str>) -> PlannerApiClient<'a> {
        PlannerApiClient {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<AuthEnvelope> {
        let url = self.url("/auth/register");
        debug!("POST {}", url);
        let mut response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .chain_err(|| "Failed to reach the planning service")?;
        self.check_status(&mut response, false)?;
        response
            .json()
            .chain_err(|| "Failed to parse registration response")
    }

    pub fn login(&self, request: &LoginRequest) -> Result<AuthEnvelope> {
        let url = self.url("/auth/login");
        debug!("POST {}", url);
        let mut response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .chain_err(|| "Failed to reach the planning service")?;
        self.check_status(&mut response, false)?;
        response
            .json()
            .chain_err(|| "Failed to parse login response")
    }

    pub fn me(&self) -> Result<UserAccount> {
        let mut response = self.authorized_get("/auth/me")?;
        self.check_status(&mut response, true)?;
        let envelope: UserEnvelope = response
            .json()
            .chain_err(|| "Failed to parse account response")?;
        Ok(envelope.user)
    }

    /// Loads the saved financial record, or `None` when nothing has been
    /// submitted yet.
    pub fn financial_data(&self) -> Result<Option<FinancialDataPayload>> {
        let mut response = self.authorized_get("/financial-data")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.check_status(&mut response, true)?;
        let envelope: FinancialDataEnvelope = response
            .json()
            .chain_err(|| "Failed to parse financial data response")?;
        Ok(Some(envelope.data))
    }

    pub fn save_financial_data(&self, form: &FinancialDetailsForm) -> Result<FinancialDataPayload> {
        let mut response = self.authorized_post("/financial-data", form)?;
        self.check_status(&mut response, true)?;
        let envelope: FinancialDataEnvelope = response
            .json()
            .chain_err(|| "Failed to parse financial data response")?;
        Ok(envelope.data)
    }

    /// Loads the dashboard aggregate, or `None` when no financial record
    /// has been submitted yet.
    pub fn dashboard(&self) -> Result<Option<DashboardPayload>> {
        let mut response = self.authorized_get("/analysis/dashboard")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.check_status(&mut response, true)?;
        let payload: DashboardPayload = response
            .json()
            .chain_err(|| "Failed to parse dashboard response")?;
        Ok(Some(payload))
    }

    pub fn insights(&self) -> Result<Vec<BudgetInsight>> {
        let mut response = self.authorized_get("/analysis/insights")?;
        self.check_status(&mut response, true)?;
        let envelope: InsightsEnvelope = response
            .json()
            .chain_err(|| "Failed to parse insights response")?;
        Ok(envelope.insights)
    }

    pub fn expense_tips(&self) -> Result<Vec<ExpenseTip>> {
        let mut response = self.authorized_get("/analysis/expense-tips")?;
        self.check_status(&mut response, true)?;
        let envelope: TipsEnvelope = response
            .json()
            .chain_err(|| "Failed to parse expense tips response")?;
        Ok(envelope.tips)
    }

    pub fn location_recommendations(&self) -> Result<LocationsEnvelope> {
        let mut response = self.authorized_get("/analysis/location-recommendations")?;
        self.check_status(&mut response, true)?;
        response
            .json()
            .chain_err(|| "Failed to parse location recommendations response")
    }

    pub fn health_check(&self) -> Result<HealthEnvelope> {
        let url = self.url("/health");
        debug!("GET {}", url);
        let mut response = self
            .http
            .get(&url)
            .send()
            .chain_err(|| "Failed to reach the planning service")?;
        self.check_status(&mut response, false)?;
        response
            .json()
            .chain_err(|| "Failed to parse health response")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized_get(&self, path: &str) -> Result<reqwest::Response> {
        let token = self.token.chain_err(|| ErrorKind::NotLoggedIn)?;
        let url = self.url(path);
        debug!("GET {}", url);
        self.http
            .get(&url)
            .bearer_auth(token)
            .send()
            .chain_err(|| "Failed to reach the planning service")
    }

    fn authorized_post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let token = self.token.chain_err(|| ErrorKind::NotLoggedIn)?;
        let url = self.url(path);
        debug!("POST {}", url);
        self.http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .chain_err(|| "Failed to reach the planning service")
    }

    // An expired or revoked token comes back as 401 on authenticated routes.
    // Other error statuses carry an "error" field in the body.
    fn check_status(&self, response: &mut reqwest::Response, authenticated: bool) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED && authenticated {
            bail!(ErrorKind::SessionExpired);
        }
        bail!(ErrorKind::ServiceError(error_message(response)));
    }
}

fn error_message(response: &mut reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<HashMap<String, serde_json::Value>>()
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(|value| value.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| status.to_string())
}
