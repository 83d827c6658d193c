use log::debug;

use crate::api_client::*;
use crate::constants::*;
use crate::errors::*;
use crate::models::*;
use crate::report::*;
use crate::types::*;

pub struct OverviewReporter<'a> {
    client: &'a PlannerApiClient<'a>,
}

impl<'a> OverviewReporter<'a> {
    pub fn new(client: &'a PlannerApiClient) -> OverviewReporter<'a> {
        OverviewReporter { client }
    }

    pub fn dashboard(&self) -> Result<()> {
        println!("Loading your dashboard from PocketPlan...");
        let payload = match self.client.dashboard()? {
            None => return self.print_no_data(),
            Some(payload) => payload,
        };
        debug!("Dashboard received: {:#?}", &payload);
        let profile = FinancialProfile::from_payload(payload.financial_data)?;
        println!();
        println!("   Monthly Salary: {}", format_rupees(profile.salary));
        println!(
            "   Total Expenses: {} ({}% of salary)",
            format_rupees(profile.total_expenses),
            profile.expense_percent()
        );
        println!(
            "  Monthly Savings: {} ({}% savings rate)",
            format_rupees(profile.monthly_savings),
            profile.savings_rate
        );
        if let Some(health_score) = &payload.health_score {
            let standing = if health_score.overall >= 70.0 {
                "Good standing"
            } else if health_score.overall >= 50.0 {
                "Fair"
            } else {
                "Needs improvement"
            };
            println!(
                "     Health Score: {:.0}/100 ({})",
                health_score.overall, standing
            );
        }
        if !payload.expense_breakdown.is_empty() {
            println!();
            println!("Expense breakdown:");
            for slice in &payload.expense_breakdown {
                println!(
                    "  {:>8}: {}",
                    slice.name,
                    format_rupees(Rupees::from_f64(slice.value))
                );
            }
        }
        Ok(())
    }

    pub fn analysis(&self) -> Result<()> {
        println!("Loading your budget analysis from PocketPlan...");
        let payload = match self.client.dashboard()? {
            None => return self.print_no_data(),
            Some(payload) => payload,
        };
        debug!("Dashboard received: {:#?}", &payload);
        let profile = FinancialProfile::from_payload(payload.financial_data)?;
        let insights = self.client.insights()?;
        debug!("Insights received: {:#?}", &insights);
        if !payload.expense_breakdown.is_empty() {
            println!();
            println!("Expense breakdown:");
            for slice in &payload.expense_breakdown {
                let amount = Rupees::from_f64(slice.value);
                println!(
                    "  {:>8}: {} ({}%)",
                    slice.name,
                    format_rupees(amount),
                    share_percent(amount, profile.total_expenses)
                );
            }
        }
        println!();
        for insight in &insights {
            let marker = if insight.kind == "warning" { "!" } else { "+" };
            println!("  [{}] {}", marker, insight.text);
        }
        println!();
        println!(
            "  Total Monthly Expenses: {} ({}% of salary)",
            format_rupees(profile.total_expenses),
            profile.expense_percent()
        );
        println!(
            "         Monthly Savings: {} (target: {}/month)",
            format_rupees(profile.monthly_savings),
            format_rupees(profile.savings_goal)
        );
        Ok(())
    }

    pub fn advisor(&self) -> Result<()> {
        println!("Loading expense tips from PocketPlan...");
        let tips = self.client.expense_tips()?;
        debug!("Expense tips received: {:#?}", &tips);
        if tips.is_empty() {
            println!("No tips available; nothing to do!");
            return Ok(());
        }
        let mut total = Rupees::zero();
        println!();
        for tip in &tips {
            let savings = Rupees::from_f64(tip.savings);
            total += savings;
            println!("  [{}] {}", tip.category, tip.tip);
            println!("      Save {}/mo", format_rupees(savings));
        }
        println!();
        println!("Total potential monthly savings: {}", format_rupees(total));
        Ok(())
    }

    pub fn locations(&self) -> Result<()> {
        println!("Loading location recommendations from PocketPlan...");
        let envelope = self.client.location_recommendations()?;
        debug!("Location recommendations received: {:#?}", &envelope);
        if envelope.recommendations.is_empty() {
            println!("No recommendations for {}.", envelope.city);
            return Ok(());
        }
        println!();
        println!("Recommended areas in {}:", envelope.city);
        println!();
        let cells: Vec<Vec<String>> = envelope
            .recommendations
            .iter()
            .map(|recommendation| {
                vec![
                    recommendation.area.clone(),
                    format_rupees(Rupees::from_f64(recommendation.avg_rent)),
                    recommendation.distance.clone(),
                    format_rupees(Rupees::from_f64(recommendation.travel_cost)),
                    recommendation.tag.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            render_table(
                &["Area", "Avg Rent", "Distance", "Travel Cost", "Tag"],
                &cells,
            )
        );
        Ok(())
    }

    pub fn health_score(&self) -> Result<()> {
        println!("Loading your financial health score from PocketPlan...");
        let payload = match self.client.dashboard()? {
            None => return self.print_no_data(),
            Some(payload) => payload,
        };
        debug!("Dashboard received: {:#?}", &payload);
        let health_score = payload
            .health_score
            .chain_err(|| "No health score available yet")?;
        println!();
        println!(
            "  Overall: {:.0}/100 ({})",
            health_score.overall,
            score_band(health_score.overall)
        );
        println!();
        println!("    Savings Ratio: {:.0}/100", health_score.savings_ratio);
        println!("  Expense Control: {:.0}/100", health_score.expense_control);
        println!("      Debt Impact: {:.0}/100", health_score.debt_impact);
        println!();
        println!("Bands: 71-100 Good, 41-70 Average, 0-40 Poor");
        Ok(())
    }

    pub fn service_status(&self) -> Result<()> {
        println!("Checking PocketPlan service status...");
        let envelope = self.client.health_check()?;
        debug!("Health response: {:#?}", &envelope);
        println!("   Status: {}", envelope.status);
        println!("  Message: {}", envelope.message);
        Ok(())
    }

    fn print_no_data(&self) -> Result<()> {
        println!("No financial details saved yet.");
        println!(
            "Run the '{}' command to add your income and expenses.",
            UPDATE_SUBCOMMAND
        );
        Ok(())
    }
}
