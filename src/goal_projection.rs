use crate::constants::*;
use crate::errors::*;
use crate::models::*;
use crate::types::*;

/// Whether the profile's current monthly savings reach the configured goal
/// within the target period.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoalStatus {
    pub required_monthly_savings: Rupees,
    pub on_track: bool,
    pub savings_gap: Rupees,
}

/// One period of the goal plan: savings projected at the current rate next
/// to the on-pace milestone for that period.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectionRow {
    pub period_label: String,
    pub projected_savings: Rupees,
    pub target_milestone: Rupees,
    pub status: PaceStatus,
}

/// One month of the open-ended savings forecast. Unlike the goal plan, the
/// pace line here reads the savings goal as a monthly target, so it grows by
/// the full goal amount every month.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForecastPoint {
    pub period_label: String,
    pub projected_savings: Rupees,
    pub goal_pace: Rupees,
}

/// Computes the required monthly savings for the goal, spread evenly over
/// the target period, and how the current savings rate compares.
pub fn goal_status(profile: &FinancialProfile) -> Result<GoalStatus> {
    ensure!(
        profile.target_years >= 1,
        ErrorKind::InvalidGoalHorizon(profile.target_years)
    );
    let required_monthly_savings = profile.savings_goal.prorate(1, profile.target_months());
    let on_track = profile.monthly_savings >= required_monthly_savings;
    let savings_gap = if on_track {
        Rupees::zero()
    } else {
        required_monthly_savings - profile.monthly_savings
    };
    Ok(GoalStatus {
        required_monthly_savings,
        on_track,
        savings_gap,
    })
}

/// Projects savings over the goal's target period, one row per year or per
/// month. Milestones grow linearly to land exactly on the goal amount in the
/// final period, and a projection that ties its milestone counts as ahead.
pub fn project(profile: &FinancialProfile, granularity: Granularity) -> Result<Vec<ProjectionRow>> {
    ensure!(
        profile.target_years >= 1,
        ErrorKind::InvalidGoalHorizon(profile.target_years)
    );
    let total_periods = granularity.period_count(profile.target_years);
    let months_per_period = granularity.months_per_period();
    let mut rows = Vec::with_capacity(total_periods as usize);
    for period in 1..=total_periods {
        let projected_savings = profile.monthly_savings.over_months(period * months_per_period);
        let target_milestone = profile.savings_goal.prorate(period, total_periods);
        rows.push(ProjectionRow {
            period_label: format!("{} {}", granularity.period_noun(), period),
            projected_savings,
            target_milestone,
            status: PaceStatus::from_projection(projected_savings, target_milestone),
        });
    }
    Ok(rows)
}

/// Projects savings month by month without a goal gate, up to
/// `MAX_FORECAST_MONTHS` months out.
pub fn forecast(profile: &FinancialProfile, months: u32) -> Result<Vec<ForecastPoint>> {
    ensure!(
        months >= 1 && months <= MAX_FORECAST_MONTHS,
        "Forecast horizon must be between 1 and {} months: {}",
        MAX_FORECAST_MONTHS,
        months
    );
    let mut points = Vec::with_capacity(months as usize);
    for month in 1..=months {
        points.push(ForecastPoint {
            period_label: format!("Month {}", month),
            projected_savings: profile.monthly_savings.over_months(month),
            goal_pace: profile.savings_goal.over_months(month),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(monthly_savings: i64, savings_goal: i64, target_years: u32) -> FinancialProfile {
        FinancialProfile {
            salary: Rupees::from_i64(50_000),
            rent: Rupees::from_i64(15_000),
            food: Rupees::from_i64(8_000),
            travel: Rupees::from_i64(4_000),
            others: Rupees::from_i64(3_000),
            total_expenses: Rupees::from_i64(30_000),
            monthly_savings: Rupees::from_i64(monthly_savings),
            savings_rate: 40.0,
            savings_goal: Rupees::from_i64(savings_goal),
            goal_name: Some("Emergency Fund".to_string()),
            target_years,
            job_type: None,
            city: None,
            area: None,
            rent_budget: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_goal_status_on_track() {
        let status = goal_status(&profile(5000, 120_000, 2)).unwrap();
        assert_eq!(
            status,
            GoalStatus {
                required_monthly_savings: Rupees::from_i64(5000),
                on_track: true,
                savings_gap: Rupees::zero(),
            }
        );
    }

    #[test]
    fn test_goal_status_behind() {
        let status = goal_status(&profile(3000, 120_000, 2)).unwrap();
        assert_eq!(
            status,
            GoalStatus {
                required_monthly_savings: Rupees::from_i64(5000),
                on_track: false,
                savings_gap: Rupees::from_i64(2000),
            }
        );
    }

    #[test]
    fn test_goal_status_zero_goal_with_deficit() {
        let status = goal_status(&profile(-3000, 0, 1)).unwrap();
        assert_eq!(status.required_monthly_savings, Rupees::zero());
        assert!(!status.on_track);
        assert_eq!(status.savings_gap, Rupees::from_i64(3000));
    }

    #[test]
    fn test_goal_status_rejects_zero_target_years() {
        match goal_status(&profile(1000, 10_000, 0)) {
            Err(Error(ErrorKind::InvalidGoalHorizon(0), _)) => {}
            result => panic!("unexpected result: {:?}", result),
        }
    }

    #[test]
    fn test_project_yearly_on_track() {
        let rows = project(&profile(5000, 120_000, 2), Granularity::Yearly).unwrap();
        assert_eq!(
            rows,
            vec![
                ProjectionRow {
                    period_label: "Year 1".to_string(),
                    projected_savings: Rupees::from_i64(60_000),
                    target_milestone: Rupees::from_i64(60_000),
                    status: PaceStatus::Ahead,
                },
                ProjectionRow {
                    period_label: "Year 2".to_string(),
                    projected_savings: Rupees::from_i64(120_000),
                    target_milestone: Rupees::from_i64(120_000),
                    status: PaceStatus::Ahead,
                },
            ]
        );
    }

    #[test]
    fn test_project_monthly_behind() {
        let rows = project(&profile(3000, 120_000, 2), Granularity::Monthly).unwrap();
        assert_eq!(rows.len(), 24);
        assert_eq!(
            rows[0],
            ProjectionRow {
                period_label: "Month 1".to_string(),
                projected_savings: Rupees::from_i64(3000),
                target_milestone: Rupees::from_i64(5000),
                status: PaceStatus::Behind,
            }
        );
        assert_eq!(rows[23].projected_savings, Rupees::from_i64(72_000));
        assert_eq!(rows[23].target_milestone, Rupees::from_i64(120_000));
        assert_eq!(rows[23].status, PaceStatus::Behind);
    }

    #[test]
    fn test_project_monthly_tie_counts_as_ahead() {
        let rows = project(&profile(5000, 120_000, 2), Granularity::Monthly).unwrap();
        for row in &rows {
            assert_eq!(row.projected_savings, row.target_milestone);
            assert_eq!(row.status, PaceStatus::Ahead);
        }
    }

    #[test]
    fn test_project_negative_savings_stays_behind() {
        let rows = project(&profile(-2000, 60_000, 1), Granularity::Yearly).unwrap();
        assert_eq!(rows[0].projected_savings, Rupees::from_i64(-24_000));
        assert_eq!(rows[0].status, PaceStatus::Behind);
    }

    #[test]
    fn test_project_rejects_zero_target_years() {
        match project(&profile(1000, 10_000, 0), Granularity::Monthly) {
            Err(Error(ErrorKind::InvalidGoalHorizon(0), _)) => {}
            result => panic!("unexpected result: {:?}", result),
        }
    }

    #[test]
    fn test_forecast_points() {
        let points = forecast(&profile(3000, 5000, 2), 3).unwrap();
        assert_eq!(
            points,
            vec![
                ForecastPoint {
                    period_label: "Month 1".to_string(),
                    projected_savings: Rupees::from_i64(3000),
                    goal_pace: Rupees::from_i64(5000),
                },
                ForecastPoint {
                    period_label: "Month 2".to_string(),
                    projected_savings: Rupees::from_i64(6000),
                    goal_pace: Rupees::from_i64(10_000),
                },
                ForecastPoint {
                    period_label: "Month 3".to_string(),
                    projected_savings: Rupees::from_i64(9000),
                    goal_pace: Rupees::from_i64(15_000),
                },
            ]
        );
    }

    #[test]
    fn test_forecast_rejects_out_of_range_horizons() {
        assert!(forecast(&profile(3000, 5000, 2), 0).is_err());
        assert!(forecast(&profile(3000, 5000, 2), 61).is_err());
        assert!(forecast(&profile(3000, 5000, 2), 60).is_ok());
    }

    proptest! {
        #[test]
        fn prop_final_milestone_lands_on_goal(
            monthly in -100_000i64..100_000,
            goal in 0i64..10_000_000,
            years in 1u32..40,
        ) {
            for &granularity in &[Granularity::Yearly, Granularity::Monthly] {
                let rows = project(&profile(monthly, goal, years), granularity).unwrap();
                prop_assert_eq!(
                    rows.last().unwrap().target_milestone,
                    Rupees::from_i64(goal)
                );
            }
        }

        #[test]
        fn prop_rows_grow_monotonically(
            monthly in 0i64..100_000,
            goal in 0i64..10_000_000,
            years in 1u32..20,
        ) {
            let rows = project(&profile(monthly, goal, years), Granularity::Monthly).unwrap();
            for window in rows.windows(2) {
                prop_assert!(window[0].target_milestone <= window[1].target_milestone);
                prop_assert!(window[0].projected_savings <= window[1].projected_savings);
            }
        }

        #[test]
        fn prop_yearly_rows_match_monthly_year_ends(
            monthly in -100_000i64..100_000,
            goal in 0i64..10_000_000,
            years in 1u32..10,
        ) {
            let subject = profile(monthly, goal, years);
            let yearly = project(&subject, Granularity::Yearly).unwrap();
            let monthly_rows = project(&subject, Granularity::Monthly).unwrap();
            for (index, row) in yearly.iter().enumerate() {
                let year_end = &monthly_rows[(index + 1) * 12 - 1];
                prop_assert_eq!(row.projected_savings, year_end.projected_savings);
            }
        }

        #[test]
        fn prop_savings_gap_is_zero_exactly_when_on_track(
            monthly in -100_000i64..100_000,
            goal in 0i64..10_000_000,
            years in 1u32..40,
        ) {
            let status = goal_status(&profile(monthly, goal, years)).unwrap();
            prop_assert!(status.savings_gap >= Rupees::zero());
            prop_assert_eq!(status.on_track, status.savings_gap == Rupees::zero());
        }
    }
}
