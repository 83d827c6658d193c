use log::debug;

use crate::api_client::*;
use crate::constants::*;
use crate::errors::*;
use crate::goal_projection::*;
use crate::models::*;
use crate::report::*;
use crate::types::*;

/// What the goal command shows: a full plan when a goal is configured, or an
/// explicit empty state naming what is missing.
#[derive(Clone, Debug, PartialEq)]
pub enum GoalView {
    NoProfile,
    NoGoal,
    Ready {
        profile: FinancialProfile,
        status: GoalStatus,
        rows: Vec<ProjectionRow>,
    },
}

impl GoalView {
    /// The plan only renders when a profile exists and names a goal; saved
    /// amounts without a goal name still resolve to the empty state.
    pub fn resolve(
        profile: Option<FinancialProfile>,
        granularity: Granularity,
    ) -> Result<GoalView> {
        let profile = match profile {
            None => return Ok(GoalView::NoProfile),
            Some(profile) => profile,
        };
        if !profile.has_goal() {
            return Ok(GoalView::NoGoal);
        }
        let status = goal_status(&profile)?;
        let rows = project(&profile, granularity)?;
        Ok(GoalView::Ready {
            profile,
            status,
            rows,
        })
    }
}

pub struct GoalPlanner {
    granularity: Granularity,
}

impl GoalPlanner {
    pub fn run(client: &PlannerApiClient, granularity: Granularity) -> Result<()> {
        println!("Loading your financial profile from PocketPlan...");
        let payload = client.financial_data()?;
        debug!("Financial data received: {:#?}", &payload);
        let profile = payload.map(FinancialProfile::from_payload).transpose()?;
        let view = GoalView::resolve(profile, granularity)?;
        GoalPlanner { granularity }.render(&view);
        Ok(())
    }

    fn render(&self, view: &GoalView) {
        match view {
            GoalView::NoProfile => {
                println!("No financial details saved yet.");
                println!(
                    "Run the '{}' command to add your income, expenses and goal.",
                    UPDATE_SUBCOMMAND
                );
            }
            GoalView::NoGoal => {
                println!("No savings goal configured yet.");
                println!(
                    "Run the '{}' command with --{} and --{} to set one.",
                    UPDATE_SUBCOMMAND, GOAL_NAME_ARG, GOAL_AMOUNT_ARG
                );
            }
            GoalView::Ready {
                profile,
                status,
                rows,
            } => self.render_plan(profile, status, rows),
        }
    }

    fn render_plan(&self, profile: &FinancialProfile, status: &GoalStatus, rows: &[ProjectionRow]) {
        let goal_name = profile
            .goal_name
            .as_deref()
            .expect("ready goal view should have a goal name");
        let year_noun = if profile.target_years == 1 {
            "year"
        } else {
            "years"
        };
        println!();
        println!("Goal: {}", goal_name);
        println!(
            "Planning to achieve {} in {} {}.",
            format_rupees(profile.savings_goal),
            profile.target_years,
            year_noun
        );
        println!();
        if status.on_track {
            println!("On Track!");
            println!(
                "Your current savings of {}/month is enough to reach your goal.",
                format_rupees(profile.monthly_savings)
            );
        } else {
            println!("Action Needed");
            println!(
                "You need to save {} more per month to reach your goal on time.",
                format_rupees(status.savings_gap)
            );
        }
        println!();
        println!(
            "  Required Savings: {}/mo",
            format_rupees(status.required_monthly_savings)
        );
        println!(
            "   Current Savings: {}/mo",
            format_rupees(profile.monthly_savings)
        );
        println!(
            "     Target Period: {} {}",
            profile.target_years, year_noun
        );
        println!();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                vec![
                    row.period_label.clone(),
                    format_rupees(row.projected_savings),
                    format_rupees(row.target_milestone),
                    row.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            render_table(
                &[
                    self.granularity.period_noun(),
                    "Projected Savings",
                    "Target Milestones",
                    "Status",
                ],
                &cells,
            )
        );
    }
}

pub struct SavingsForecaster {
    months: u32,
}

impl SavingsForecaster {
    pub fn run(client: &PlannerApiClient, months: u32) -> Result<()> {
        println!("Loading your financial profile from PocketPlan...");
        let payload = client.financial_data()?;
        debug!("Financial data received: {:#?}", &payload);
        match payload.map(FinancialProfile::from_payload).transpose()? {
            None => {
                println!("No financial details saved yet.");
                println!(
                    "Run the '{}' command to add your income and expenses.",
                    UPDATE_SUBCOMMAND
                );
                Ok(())
            }
            Some(profile) => SavingsForecaster { months }.render(&profile),
        }
    }

    fn render(&self, profile: &FinancialProfile) -> Result<()> {
        let points = forecast(profile, self.months)?;
        let total = points
            .last()
            .expect("forecast should have at least one point");
        let halfway_months = self.months / 2;
        let halfway_savings = match halfway_months {
            0 => Rupees::zero(),
            months => points[months as usize - 1].projected_savings,
        };
        println!();
        println!(
            "  Total Projected Savings: {}",
            format_rupees(total.projected_savings)
        );
        println!(
            "            Halfway Point: {} (after {} months)",
            format_rupees(halfway_savings),
            halfway_months
        );
        println!(
            "          Monthly Savings: {} ({:.1}% of salary)",
            format_rupees(profile.monthly_savings),
            profile.savings_rate
        );
        println!();
        let cells: Vec<Vec<String>> = points
            .iter()
            .map(|point| {
                vec![
                    point.period_label.clone(),
                    format_rupees(point.projected_savings),
                    format_rupees(point.goal_pace),
                ]
            })
            .collect();
        println!(
            "{}",
            render_table(&["Month", "Projected Savings", "Goal Pace"], &cells)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(goal_name: Option<&str>) -> FinancialProfile {
        FinancialProfile {
            salary: Rupees::from_i64(50_000),
            rent: Rupees::from_i64(15_000),
            food: Rupees::from_i64(8_000),
            travel: Rupees::from_i64(4_000),
            others: Rupees::from_i64(3_000),
            total_expenses: Rupees::from_i64(30_000),
            monthly_savings: Rupees::from_i64(5_000),
            savings_rate: 10.0,
            savings_goal: Rupees::from_i64(120_000),
            goal_name: goal_name.map(str::to_string),
            target_years: 2,
            job_type: None,
            city: None,
            area: None,
            rent_budget: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_resolve_without_profile() {
        assert_eq!(
            GoalView::resolve(None, Granularity::Yearly).unwrap(),
            GoalView::NoProfile
        );
    }

    #[test]
    fn test_resolve_without_goal_name() {
        let view = GoalView::resolve(Some(profile(None)), Granularity::Yearly).unwrap();
        assert_eq!(view, GoalView::NoGoal);
    }

    #[test]
    fn test_resolve_ready() {
        let view =
            GoalView::resolve(Some(profile(Some("Emergency Fund"))), Granularity::Yearly).unwrap();
        match view {
            GoalView::Ready { status, rows, .. } => {
                assert!(status.on_track);
                assert_eq!(rows.len(), 2);
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_recomputes_per_granularity() {
        let subject = profile(Some("Emergency Fund"));
        let yearly = GoalView::resolve(Some(subject.clone()), Granularity::Yearly).unwrap();
        let monthly = GoalView::resolve(Some(subject), Granularity::Monthly).unwrap();
        match (yearly, monthly) {
            (GoalView::Ready { rows: yearly, .. }, GoalView::Ready { rows: monthly, .. }) => {
                assert_eq!(yearly.len(), 2);
                assert_eq!(monthly.len(), 24);
            }
            other => panic!("unexpected views: {:?}", other),
        }
    }
}
