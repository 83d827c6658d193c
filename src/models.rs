use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::types::*;
use crate::utilities::*;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Financial details as the service expects them on submission. The request
/// body uses camelCase keys while responses come back in snake_case.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDetailsForm {
    pub salary: f64,
    pub rent: f64,
    pub food: f64,
    pub travel: f64,
    pub others: f64,
    pub savings_goal: f64,
    pub goal_name: String,
    pub target_years: u32,
    pub job_type: String,
    pub city: String,
    pub area: String,
    pub rent_budget: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UserAccount {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthEnvelope {
    pub token: String,
    pub user: UserAccount,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: UserAccount,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FinancialDataEnvelope {
    pub data: FinancialDataPayload,
}

/// The raw financial record as served. Derived fields are optional because
/// older records may predate them; `FinancialProfile::from_payload` fills
/// the gaps.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FinancialDataPayload {
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub rent: f64,
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub travel: f64,
    #[serde(default)]
    pub others: f64,
    pub savings_goal: Option<f64>,
    pub goal_name: Option<String>,
    pub target_years: Option<f64>,
    pub total_expenses: Option<f64>,
    pub monthly_savings: Option<f64>,
    pub savings_rate: Option<f64>,
    pub job_type: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub rent_budget: Option<f64>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DashboardPayload {
    pub financial_data: FinancialDataPayload,
    #[serde(default)]
    pub expense_breakdown: Vec<ExpenseSlice>,
    pub health_score: Option<HealthScorePayload>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExpenseSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HealthScorePayload {
    pub overall: f64,
    pub savings_ratio: f64,
    pub expense_control: f64,
    pub debt_impact: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InsightsEnvelope {
    pub insights: Vec<BudgetInsight>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BudgetInsight {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TipsEnvelope {
    pub tips: Vec<ExpenseTip>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExpenseTip {
    pub tip: String,
    pub savings: f64,
    pub category: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LocationsEnvelope {
    pub recommendations: Vec<LocationRecommendation>,
    pub city: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LocationRecommendation {
    pub area: String,
    #[serde(rename = "avgRent")]
    pub avg_rent: f64,
    pub distance: String,
    #[serde(rename = "travelCost")]
    pub travel_cost: f64,
    #[serde(default)]
    pub tag: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HealthEnvelope {
    pub status: String,
    pub message: String,
}

/// A validated financial profile. All amounts are `Rupees` and the goal
/// invariants hold: `savings_goal` is never negative and `target_years` is
/// at least one. `goal_name` is `None` when no goal has been configured,
/// including when the saved name is blank.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancialProfile {
    pub salary: Rupees,
    pub rent: Rupees,
    pub food: Rupees,
    pub travel: Rupees,
    pub others: Rupees,
    pub total_expenses: Rupees,
    pub monthly_savings: Rupees,
    pub savings_rate: f64,
    pub savings_goal: Rupees,
    pub goal_name: Option<String>,
    pub target_years: u32,
    pub job_type: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub rent_budget: Option<Rupees>,
    pub updated_at: Option<NaiveDateTime>,
}

impl FinancialProfile {
    pub fn from_payload(payload: FinancialDataPayload) -> Result<FinancialProfile> {
        for &(name, value) in &[
            ("salary", payload.salary),
            ("rent", payload.rent),
            ("food", payload.food),
            ("travel", payload.travel),
            ("others", payload.others),
        ] {
            ensure!(
                value.is_finite(),
                "Invalid {} amount in financial data: {}",
                name,
                value
            );
        }

        let savings_goal = payload.savings_goal.unwrap_or(0.0);
        ensure!(
            savings_goal.is_finite() && savings_goal >= 0.0,
            "Invalid savings goal amount in financial data: {}",
            savings_goal
        );

        // Records saved before a goal was configured carry no target period,
        // and the service stores an explicit zero for some of those. Either
        // way the form's default horizon of one year applies.
        let target_years = match payload.target_years {
            None => 1,
            Some(years) => {
                ensure!(
                    years.is_finite() && years >= 0.0 && years.fract() == 0.0,
                    "Target period must be a whole number of years: {}",
                    years
                );
                if years == 0.0 {
                    1
                } else {
                    years as u32
                }
            }
        };

        let goal_name = payload
            .goal_name
            .as_ref()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let total_expenses = match payload.total_expenses {
            Some(value) if value.is_finite() => value,
            _ => payload.rent + payload.food + payload.travel + payload.others,
        };
        let monthly_savings = match payload.monthly_savings {
            Some(value) if value.is_finite() => value,
            _ => payload.salary - total_expenses,
        };
        let savings_rate = match payload.savings_rate {
            Some(value) if value.is_finite() => value,
            _ if payload.salary > 0.0 => {
                let percent = monthly_savings / payload.salary * 100.0;
                (percent * 100.0).round() / 100.0
            }
            _ => 0.0,
        };

        let updated_at = match &payload.updated_at {
            Some(iso_timestamp) => Some(parse_iso_timestamp(iso_timestamp)?),
            None => None,
        };

        Ok(FinancialProfile {
            salary: Rupees::from_f64(payload.salary),
            rent: Rupees::from_f64(payload.rent),
            food: Rupees::from_f64(payload.food),
            travel: Rupees::from_f64(payload.travel),
            others: Rupees::from_f64(payload.others),
            total_expenses: Rupees::from_f64(total_expenses),
            monthly_savings: Rupees::from_f64(monthly_savings),
            savings_rate,
            savings_goal: Rupees::from_f64(savings_goal),
            goal_name,
            target_years,
            job_type: payload.job_type,
            city: payload.city,
            area: payload.area,
            rent_budget: payload.rent_budget.map(Rupees::from_f64),
            updated_at,
        })
    }

    pub fn has_goal(&self) -> bool {
        self.goal_name.is_some()
    }

    pub fn target_months(&self) -> u32 {
        self.target_years * 12
    }

    /// Share of salary consumed by expenses, as a whole percentage. Zero
    /// when no salary is recorded.
    pub fn expense_percent(&self) -> Decimal {
        if self.salary > Rupees::zero() {
            (self.total_expenses.to_decimal() / self.salary.to_decimal() * Decimal::new(100, 0))
                .round_dp_with_strategy(0, RoundingStrategy::RoundHalfUp)
        } else {
            Decimal::zero()
        }
    }
}
