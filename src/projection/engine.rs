//! Core projection engine for monthly hybrid revenue projections

use super::calendar::month_labels;
use super::months::{MonthlyProjection, ProjectionResult};
use super::project::{ProjectMonth, ProjectRevenueModel};
use super::recurring::{RecurringMonth, RecurringRevenueModel};
use crate::error::InputError;
use crate::inputs::RevenueInputs;
use crate::metrics::{MetricsAggregator, DEFAULT_ARR_MONTH, DEFAULT_REVENUE_WINDOW_MONTHS};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Date month labels are anchored to; month 1 is the following month.
    /// `None` uses today's local date.
    pub as_of: Option<NaiveDate>,

    /// Month whose MRR is annualized into ARR
    pub arr_month: u32,

    /// Length of the short revenue-total window
    pub revenue_window_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            as_of: None,
            arr_month: DEFAULT_ARR_MONTH,
            revenue_window_months: DEFAULT_REVENUE_WINDOW_MONTHS,
        }
    }
}

impl ProjectionConfig {
    /// Default config with labels anchored to `as_of`
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self {
            as_of: Some(as_of),
            ..Default::default()
        }
    }

    /// Resolve the label anchor, reading the clock only when none was injected
    pub fn anchor_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Main projection engine
///
/// Holds configuration only; every call to `project` is independent.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a projection
    ///
    /// Inputs are validated before any arithmetic; on success the result
    /// holds exactly `inputs.projection_months` rows.
    pub fn project(&self, inputs: &RevenueInputs) -> Result<ProjectionResult, InputError> {
        inputs.validate()?;

        let months = inputs.projection_months;
        let as_of = self.config.anchor_date();
        log::debug!(
            "projecting {} months ({:?} profile) as of {}",
            months,
            inputs.profile(),
            as_of
        );

        if inputs.recurring.churn_rate() > inputs.recurring.growth_rate() {
            log::debug!(
                "churn {}% exceeds growth {}%, recurring revenue will decline",
                inputs.recurring.churn_rate(),
                inputs.recurring.growth_rate()
            );
        }

        let recurring = RecurringRevenueModel::project(&inputs.recurring, months);
        let projects = ProjectRevenueModel::project(&inputs.projects, months);
        let projections = merge_months(as_of, &recurring, &projects);
        ensure_finite(&projections)?;

        if projections.iter().any(|r| r.project_revenue < 0.0) {
            log::warn!("project revenue falls below zero within the horizon");
        }

        let metrics = MetricsAggregator::new(self.config.arr_month, self.config.revenue_window_months)
            .aggregate(&projections, months);
        if let Some(field) = metrics.non_finite_field() {
            log::warn!("{} overflowed over {} months", field, months);
            return Err(InputError::Overflow { field, month: months });
        }

        Ok(ProjectionResult {
            profile: inputs.profile(),
            as_of,
            projections,
            metrics,
        })
    }
}

/// Zip recurring and project records into labelled rows with running totals
///
/// # Panics
/// If the two sequences differ in length.
fn merge_months(
    as_of: NaiveDate,
    recurring: &[RecurringMonth],
    projects: &[ProjectMonth],
) -> Vec<MonthlyProjection> {
    assert_eq!(
        recurring.len(),
        projects.len(),
        "recurring and project sequences must cover the same months"
    );

    let labels = month_labels(as_of, recurring.len() as u32);
    let mut cumulative_revenue = 0.0;

    recurring
        .iter()
        .zip(projects)
        .zip(labels)
        .map(|((mrr, project), label)| {
            let row = MonthlyProjection::from_parts(label, mrr, project, cumulative_revenue);
            cumulative_revenue = row.cumulative_revenue;
            row
        })
        .collect()
}

/// Reject a timeline in which any amount overflowed
fn ensure_finite(projections: &[MonthlyProjection]) -> Result<(), InputError> {
    match projections
        .iter()
        .find_map(|row| row.non_finite_field().map(|field| (field, row.month)))
    {
        Some((field, month)) => {
            log::warn!("{} overflowed in month {}", field, month);
            Err(InputError::Overflow { field, month })
        }
        None => Ok(()),
    }
}

/// Project `inputs` with default settings and labels anchored to `as_of`
pub fn project_revenue(inputs: &RevenueInputs, as_of: NaiveDate) -> Result<ProjectionResult, InputError> {
    ProjectionEngine::new(ProjectionConfig::as_of(as_of)).project(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{InputProfile, ProjectRevenueInputs, RecurringRevenueInputs, SimpleInputs};
    use approx::assert_relative_eq;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn detailed(months: u32) -> RevenueInputs {
        RevenueInputs::new(
            RecurringRevenueInputs::Decomposed {
                current_mrr: 100_000.0,
                new_customers_per_month: 5.0,
                average_mrr_per_customer: 2_000.0,
                monthly_growth_from_existing: 2.0,
                monthly_churn_rate: 3.0,
            },
            ProjectRevenueInputs::Pipeline {
                new_projects_per_month: 2.0,
                average_project_value: 20_000.0,
                average_time_to_close: 60.0,
                annual_growth_rate: 0.0,
            },
            months,
        )
    }

    #[test]
    fn test_projection_runs() {
        let result = project_revenue(&SimpleInputs::default().into(), as_of()).unwrap();

        assert_eq!(result.profile, InputProfile::Simple);
        assert_eq!(result.projections.len(), 24);
        assert_eq!(result.as_of, as_of());
        assert_eq!(result.projections[0].month_label, "Nov 2026");
        assert_eq!(result.projections[0].total_mrr, 100_000.0);
        assert_eq!(result.projections[0].project_revenue, 50_000.0);
        assert_eq!(result.projections[0].total_revenue, 150_000.0);
    }

    #[test]
    fn test_cumulative_is_running_sum() {
        let result = project_revenue(&detailed(18), as_of()).unwrap();
        let rows = &result.projections;

        assert_eq!(rows[0].cumulative_revenue, rows[0].total_revenue);
        for pair in rows.windows(2) {
            assert_relative_eq!(
                pair[1].cumulative_revenue,
                pair[0].cumulative_revenue + pair[1].total_revenue,
                epsilon = 1e-6
            );
        }
        assert_relative_eq!(result.cumulative_revenue(), result.metrics.total_revenue_horizon, max_relative = 1e-12);
    }

    #[test]
    fn test_delay_leaves_early_months_without_projects() {
        let result = project_revenue(&detailed(12), as_of()).unwrap();
        assert_eq!(result.projections[0].project_revenue, 0.0);
        assert_eq!(result.projections[1].project_revenue, 0.0);
        assert_eq!(result.projections[2].project_revenue, 40_000.0);
        assert_eq!(result.projections[0].booked_project_revenue, 40_000.0);
        // Twelve months: no year in labels
        assert_eq!(result.projections[0].month_label, "Nov");
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut inputs = detailed(12);
        inputs.projects = ProjectRevenueInputs::Linear {
            monthly_revenue: -1.0,
            annual_growth_rate: 0.0,
        };
        let err = project_revenue(&inputs, as_of()).unwrap_err();
        assert_eq!(err.field(), "projectRevenue");
    }

    #[test]
    fn test_zero_horizon() {
        let result = project_revenue(&detailed(0), as_of()).unwrap();
        assert!(result.projections.is_empty());
        assert_eq!(result.metrics.projected_arr, 0.0);
        assert_eq!(result.metrics.total_revenue_horizon, 0.0);
        assert_eq!(result.cumulative_revenue(), 0.0);
    }

    #[test]
    fn test_configured_arr_month() {
        let config = ProjectionConfig {
            as_of: Some(as_of()),
            arr_month: 6,
            revenue_window_months: 3,
        };
        let result = ProjectionEngine::new(config).project(&detailed(12)).unwrap();
        assert_eq!(result.metrics.projected_arr, result.projections[5].total_mrr * 12.0);
        let first_three: f64 = result.projections[..3].iter().map(|r| r.total_revenue).sum();
        assert_eq!(result.metrics.total_revenue_window, first_three);
    }

    #[test]
    fn test_runaway_growth_is_an_error() {
        let inputs = RevenueInputs::new(
            RecurringRevenueInputs::Decomposed {
                current_mrr: 1_000.0,
                new_customers_per_month: 0.0,
                average_mrr_per_customer: 0.0,
                monthly_growth_from_existing: 1e6,
                monthly_churn_rate: 1e5,
            },
            ProjectRevenueInputs::Linear {
                monthly_revenue: 0.0,
                annual_growth_rate: 0.0,
            },
            100,
        );
        match project_revenue(&inputs, as_of()) {
            Err(InputError::Overflow { month, .. }) => assert!(month > 1 && month <= 100),
            other => panic!("expected overflow, got {:?}", other),
        }

        // Short enough to stay finite
        let mut short = inputs.clone();
        short.projection_months = 12;
        let result = project_revenue(&short, as_of()).unwrap();
        assert!(result.projections.iter().all(|r| r.total_mrr.is_finite() && r.total_mrr >= 0.0));
    }

    #[test]
    fn test_overflowing_metrics_are_an_error() {
        let inputs = RevenueInputs::new(
            RecurringRevenueInputs::NetRate {
                initial_mrr: f64::MAX / 2.0,
                growth_rate: 0.0,
                churn_rate: 0.0,
            },
            ProjectRevenueInputs::Linear {
                monthly_revenue: 0.0,
                annual_growth_rate: 0.0,
            },
            1,
        );
        let err = project_revenue(&inputs, as_of()).unwrap_err();
        assert_eq!(err, InputError::Overflow { field: "projectedARR", month: 1 });
    }

    #[test]
    #[should_panic(expected = "same months")]
    fn test_unequal_sequences_panic() {
        let recurring = vec![RecurringMonth {
            month: 1,
            existing_mrr: 0.0,
            new_mrr: 0.0,
            expansion_mrr: 0.0,
            churned_mrr: 0.0,
            total_mrr: 0.0,
        }];
        let projects: Vec<ProjectMonth> = Vec::new();
        merge_months(as_of(), &recurring, &projects);
    }
}
