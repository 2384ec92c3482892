//! Project (non-recurring) revenue model
//!
//! Growth is linear: the month-`b` booking is
//! `base * (1 + annual_rate / 100 / 12 * (b - 1))`. A recognition delay moves
//! each booking `delay` months later without changing its value. Project
//! revenue is not floored, so a negative growth rate can take it below zero.

use crate::inputs::ProjectRevenueInputs;
use serde::{Deserialize, Serialize};

/// One month of project revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMonth {
    pub month: u32,

    /// Value of the projects booked this month
    pub booked_revenue: f64,

    /// Revenue recognized this month (booked `delay` months earlier)
    pub revenue: f64,
}

/// Projects one-time revenue forward under linear growth
pub struct ProjectRevenueModel;

impl ProjectRevenueModel {
    pub fn project(inputs: &ProjectRevenueInputs, months: u32) -> Vec<ProjectMonth> {
        Self::project_with_delay(
            inputs.base_monthly_revenue(),
            inputs.annual_growth_rate(),
            inputs.recognition_delay_months(),
            months,
        )
    }

    /// Booked revenue for a 1-based booking month
    pub fn linear_revenue(base_revenue: f64, annual_growth_rate: f64, booking_month: u32) -> f64 {
        let monthly_increment = annual_growth_rate / 100.0 / 12.0;
        let elapsed = booking_month.saturating_sub(1) as f64;
        base_revenue * (1.0 + monthly_increment * elapsed)
    }

    pub fn project_with_delay(
        base_revenue: f64,
        annual_growth_rate: f64,
        delay_months: u32,
        months: u32,
    ) -> Vec<ProjectMonth> {
        (1..=months)
            .map(|month| {
                let booked_revenue = Self::linear_revenue(base_revenue, annual_growth_rate, month);
                // Bookings never map before month 1.
                let revenue = match month.checked_sub(delay_months) {
                    Some(booking_month) if booking_month >= 1 => {
                        Self::linear_revenue(base_revenue, annual_growth_rate, booking_month)
                    }
                    _ => 0.0,
                };

                ProjectMonth {
                    month,
                    booked_revenue,
                    revenue,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_not_compounding() {
        let rows = ProjectRevenueModel::project_with_delay(50_000.0, 12.0, 0, 13);
        assert_eq!(rows[0].revenue, 50_000.0);
        assert_relative_eq!(rows[1].revenue, 50_500.0, max_relative = 1e-12);
        assert_relative_eq!(rows[2].revenue, 51_000.0, max_relative = 1e-12);
        // One year of 12% linear growth, not 1.01^12
        assert_relative_eq!(rows[12].revenue, 56_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_growth_not_clamped() {
        let rows = ProjectRevenueModel::project_with_delay(1_000.0, -240.0, 0, 8);
        assert_relative_eq!(rows[5].revenue, 0.0, epsilon = 1e-9);
        assert!(rows[7].revenue < 0.0);
        assert_relative_eq!(rows[7].revenue, -400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_delay_shifts_attribution_only() {
        let rows = ProjectRevenueModel::project_with_delay(10_000.0, 24.0, 2, 5);
        assert_eq!(rows[0].revenue, 0.0);
        assert_eq!(rows[1].revenue, 0.0);
        // Month 3 recognizes the month-1 booking at its month-1 value
        assert_eq!(rows[2].revenue, rows[0].booked_revenue);
        assert_eq!(rows[4].revenue, rows[2].booked_revenue);
    }

    #[test]
    fn test_delay_longer_than_horizon() {
        let rows = ProjectRevenueModel::project_with_delay(10_000.0, 0.0, 12, 6);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.revenue == 0.0));
        assert!(rows.iter().all(|r| r.booked_revenue == 10_000.0));
    }

    #[test]
    fn test_pipeline_inputs() {
        let inputs = ProjectRevenueInputs::Pipeline {
            new_projects_per_month: 0.0,
            average_project_value: 40_000.0,
            average_time_to_close: 90.0,
            annual_growth_rate: 0.0,
        };
        let rows = ProjectRevenueModel::project(&inputs, 6);
        assert!(rows.iter().all(|r| r.revenue == 0.0 && r.booked_revenue == 0.0));
    }
}
