//! Projection inputs: the unified `RevenueInputs` value and its two profiles
//!
//! Two parameterizations feed the same engine:
//! - the simple profile (net growth/churn on a starting MRR, flat project base)
//! - the detailed profile (customer-level recurring drivers, project pipeline)
//!
//! Both convert into `RevenueInputs`, whose recurring and project halves are
//! tagged variants dispatched inside the projection models.

mod bounds;
mod profile;
pub mod loader;

pub use bounds::{InputBounds, RateRange};
pub use profile::{DetailedInputs, DetailedProjectInputs, DetailedRecurringInputs, SimpleInputs};
pub use loader::{load_scenarios, load_scenarios_from_reader, load_inputs_json, Scenario};

use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Fixed horizon of the simple profile
pub const SIMPLE_PROFILE_MONTHS: u32 = 24;

/// Longest horizon the engine accepts
pub const MAX_PROJECTION_MONTHS: u32 = 600;

/// Days per month used to turn a closing time into a recognition delay
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Which parameterization a `RevenueInputs` value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputProfile {
    Simple,
    Detailed,
}

/// Recurring-revenue drivers
///
/// All rates are percentages per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RecurringRevenueInputs {
    /// Closed-form compounding of a starting MRR at (growth - churn) per month
    NetRate {
        #[serde(rename = "initialMRR")]
        initial_mrr: f64,
        growth_rate: f64,
        churn_rate: f64,
    },
    /// Month-by-month recurrence with new bookings, expansion and churn
    Decomposed {
        #[serde(rename = "currentMRR")]
        current_mrr: f64,
        new_customers_per_month: f64,
        #[serde(rename = "averageMRRPerCustomer")]
        average_mrr_per_customer: f64,
        monthly_growth_from_existing: f64,
        monthly_churn_rate: f64,
    },
}

impl RecurringRevenueInputs {
    /// MRR before the first projected month
    pub fn starting_mrr(&self) -> f64 {
        match self {
            RecurringRevenueInputs::NetRate { initial_mrr, .. } => *initial_mrr,
            RecurringRevenueInputs::Decomposed { current_mrr, .. } => *current_mrr,
        }
    }

    /// Monthly churn as a percentage
    pub fn churn_rate(&self) -> f64 {
        match self {
            RecurringRevenueInputs::NetRate { churn_rate, .. } => *churn_rate,
            RecurringRevenueInputs::Decomposed { monthly_churn_rate, .. } => *monthly_churn_rate,
        }
    }

    /// Monthly growth (net-rate) or expansion (decomposed) as a percentage
    pub fn growth_rate(&self) -> f64 {
        match self {
            RecurringRevenueInputs::NetRate { growth_rate, .. } => *growth_rate,
            RecurringRevenueInputs::Decomposed { monthly_growth_from_existing, .. } => {
                *monthly_growth_from_existing
            }
        }
    }
}

/// Non-recurring (project) revenue drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ProjectRevenueInputs {
    /// Month-1 project revenue growing linearly at an annual percentage
    Linear {
        monthly_revenue: f64,
        annual_growth_rate: f64,
    },
    /// Project pipeline: bookings per month at an average value, recognized
    /// after the average time to close
    Pipeline {
        new_projects_per_month: f64,
        average_project_value: f64,
        /// Days from booking to recognition
        average_time_to_close: f64,
        #[serde(default)]
        annual_growth_rate: f64,
    },
}

impl ProjectRevenueInputs {
    /// Project revenue booked in month 1, before any growth
    pub fn base_monthly_revenue(&self) -> f64 {
        match self {
            ProjectRevenueInputs::Linear { monthly_revenue, .. } => *monthly_revenue,
            ProjectRevenueInputs::Pipeline {
                new_projects_per_month,
                average_project_value,
                ..
            } => new_projects_per_month * average_project_value,
        }
    }

    /// Annual linear growth as a percentage
    pub fn annual_growth_rate(&self) -> f64 {
        match self {
            ProjectRevenueInputs::Linear { annual_growth_rate, .. }
            | ProjectRevenueInputs::Pipeline { annual_growth_rate, .. } => *annual_growth_rate,
        }
    }

    /// Whole months between booking and recognition
    pub fn recognition_delay_months(&self) -> u32 {
        match self {
            ProjectRevenueInputs::Linear { .. } => 0,
            ProjectRevenueInputs::Pipeline { average_time_to_close, .. } => {
                if *average_time_to_close > 0.0 {
                    (average_time_to_close / DAYS_PER_MONTH).floor() as u32
                } else {
                    0
                }
            }
        }
    }
}

/// Complete configuration for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueInputs {
    pub recurring: RecurringRevenueInputs,
    pub projects: ProjectRevenueInputs,
    pub projection_months: u32,
}

impl RevenueInputs {
    pub fn new(
        recurring: RecurringRevenueInputs,
        projects: ProjectRevenueInputs,
        projection_months: u32,
    ) -> Self {
        Self {
            recurring,
            projects,
            projection_months,
        }
    }

    /// Profile implied by the recurring rule
    pub fn profile(&self) -> InputProfile {
        match self.recurring {
            RecurringRevenueInputs::NetRate { .. } => InputProfile::Simple,
            RecurringRevenueInputs::Decomposed { .. } => InputProfile::Detailed,
        }
    }

    /// Reject inputs the arithmetic cannot give a meaningful answer for
    ///
    /// Rates are only required to be finite; range checks belong to the
    /// caller (see `check_bounds`).
    pub fn validate(&self) -> Result<(), InputError> {
        if self.projection_months > MAX_PROJECTION_MONTHS {
            return Err(InputError::HorizonTooLong {
                months: self.projection_months,
                max: MAX_PROJECTION_MONTHS,
            });
        }

        match &self.recurring {
            RecurringRevenueInputs::NetRate {
                initial_mrr,
                growth_rate,
                churn_rate,
            } => {
                non_negative("initialMRR", *initial_mrr)?;
                finite("mrrGrowthRate", *growth_rate)?;
                finite("churnRate", *churn_rate)?;
            }
            RecurringRevenueInputs::Decomposed {
                current_mrr,
                new_customers_per_month,
                average_mrr_per_customer,
                monthly_growth_from_existing,
                monthly_churn_rate,
            } => {
                non_negative("currentMRR", *current_mrr)?;
                non_negative("newCustomersPerMonth", *new_customers_per_month)?;
                non_negative("averageMRRPerCustomer", *average_mrr_per_customer)?;
                finite("monthlyGrowthFromExisting", *monthly_growth_from_existing)?;
                finite("monthlyChurnRate", *monthly_churn_rate)?;
                finite_product("newMRR", *new_customers_per_month, *average_mrr_per_customer)?;
            }
        }

        match &self.projects {
            ProjectRevenueInputs::Linear {
                monthly_revenue,
                annual_growth_rate,
            } => {
                non_negative("projectRevenue", *monthly_revenue)?;
                finite("projectGrowthRate", *annual_growth_rate)?;
            }
            ProjectRevenueInputs::Pipeline {
                new_projects_per_month,
                average_project_value,
                average_time_to_close,
                annual_growth_rate,
            } => {
                non_negative("newProjectsPerMonth", *new_projects_per_month)?;
                non_negative("averageProjectValue", *average_project_value)?;
                non_negative("averageTimeToClose", *average_time_to_close)?;
                finite("projectGrowthRate", *annual_growth_rate)?;
                finite_product(
                    "bookedProjectRevenue",
                    *new_projects_per_month,
                    *average_project_value,
                )?;
            }
        }

        Ok(())
    }

    /// Apply caller-side sanity bounds on top of `validate`
    pub fn check_bounds(&self, bounds: &InputBounds) -> Result<(), InputError> {
        self.validate()?;

        match &self.recurring {
            RecurringRevenueInputs::NetRate { growth_rate, churn_rate, .. } => {
                bounds.mrr_growth.check("mrrGrowthRate", *growth_rate)?;
                bounds.churn.check("churnRate", *churn_rate)?;
            }
            RecurringRevenueInputs::Decomposed {
                monthly_growth_from_existing,
                monthly_churn_rate,
                ..
            } => {
                bounds.expansion.check("monthlyGrowthFromExisting", *monthly_growth_from_existing)?;
                bounds.churn.check("monthlyChurnRate", *monthly_churn_rate)?;
            }
        }

        bounds
            .project_growth
            .check("projectGrowthRate", self.projects.annual_growth_rate())
    }
}

impl From<SimpleInputs> for RevenueInputs {
    fn from(inputs: SimpleInputs) -> Self {
        inputs.into_revenue_inputs()
    }
}

impl From<DetailedInputs> for RevenueInputs {
    fn from(inputs: DetailedInputs) -> Self {
        inputs.into_revenue_inputs()
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(())
}

/// Rejects driver pairs whose monthly product is not representable
fn finite_product(field: &'static str, count: f64, value: f64) -> Result<(), InputError> {
    if (count * value).is_finite() {
        Ok(())
    } else {
        Err(InputError::Overflow { field, month: 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
                average_project_value: 25_000.0,
                average_time_to_close: 45.0,
                annual_growth_rate: 0.0,
            },
            months,
        )
    }

    #[test]
    fn test_profile_follows_recurring_rule() {
        assert_eq!(detailed(12).profile(), InputProfile::Detailed);
        let simple: RevenueInputs = SimpleInputs::default().into();
        assert_eq!(simple.profile(), InputProfile::Simple);
    }

    #[test]
    fn test_recognition_delay_floors_to_whole_months() {
        let inputs = detailed(12);
        assert_eq!(inputs.projects.recognition_delay_months(), 1);
        assert_eq!(inputs.projects.base_monthly_revenue(), 50_000.0);

        let quick = ProjectRevenueInputs::Pipeline {
            new_projects_per_month: 1.0,
            average_project_value: 1.0,
            average_time_to_close: 29.9,
            annual_growth_rate: 0.0,
        };
        assert_eq!(quick.recognition_delay_months(), 0);
    }

    #[test]
    fn test_validate_rejects_negative_base() {
        let mut inputs = detailed(12);
        inputs.recurring = RecurringRevenueInputs::Decomposed {
            current_mrr: -5.0,
            new_customers_per_month: 0.0,
            average_mrr_per_customer: 0.0,
            monthly_growth_from_existing: 0.0,
            monthly_churn_rate: 0.0,
        };
        let err = inputs.validate().unwrap_err();
        assert_eq!(err.field(), "currentMRR");
    }

    #[test]
    fn test_validate_rejects_nan_rate() {
        let mut inputs = detailed(12);
        inputs.projects = ProjectRevenueInputs::Linear {
            monthly_revenue: 1.0,
            annual_growth_rate: f64::NAN,
        };
        assert!(matches!(
            inputs.validate(),
            Err(InputError::NotFinite { field: "projectGrowthRate", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_overflowing_new_mrr() {
        let mut inputs = detailed(3);
        inputs.recurring = RecurringRevenueInputs::Decomposed {
            current_mrr: 0.0,
            new_customers_per_month: 1e200,
            average_mrr_per_customer: 1e200,
            monthly_growth_from_existing: 0.0,
            monthly_churn_rate: 0.0,
        };
        assert_eq!(
            inputs.validate(),
            Err(InputError::Overflow { field: "newMRR", month: 1 })
        );

        inputs.recurring = RecurringRevenueInputs::Decomposed {
            current_mrr: 0.0,
            new_customers_per_month: 0.0,
            average_mrr_per_customer: 0.0,
            monthly_growth_from_existing: 0.0,
            monthly_churn_rate: 0.0,
        };
        inputs.projects = ProjectRevenueInputs::Pipeline {
            new_projects_per_month: 1e300,
            average_project_value: 1e300,
            average_time_to_close: 0.0,
            annual_growth_rate: 0.0,
        };
        assert_eq!(inputs.validate().unwrap_err().field(), "bookedProjectRevenue");
    }

    #[test]
    fn test_validate_rejects_long_horizon() {
        assert!(matches!(
            detailed(MAX_PROJECTION_MONTHS + 1).validate(),
            Err(InputError::HorizonTooLong { .. })
        ));
        assert!(detailed(0).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rates_pass_validation_but_fail_bounds() {
        let inputs: RevenueInputs = SimpleInputs {
            churn_rate: 80.0,
            ..SimpleInputs::default()
        }
        .into();

        assert!(inputs.validate().is_ok());
        let err = inputs.check_bounds(&InputBounds::default()).unwrap_err();
        assert_eq!(err.field(), "churnRate");
    }

    #[test]
    fn test_serde_tags_rules() {
        let json = serde_json::to_value(detailed(12)).unwrap();
        assert_eq!(json["recurring"]["rule"], "decomposed");
        assert_eq!(json["recurring"]["currentMRR"], 100_000.0);
        assert_eq!(json["recurring"]["averageMRRPerCustomer"], 2_000.0);
        assert_eq!(json["recurring"]["newCustomersPerMonth"], 5.0);
        assert_eq!(json["projects"]["rule"], "pipeline");
        assert_eq!(json["projectionMonths"], 12);

        let back: RevenueInputs = serde_json::from_value(json).unwrap();
        assert_eq!(back, detailed(12));
    }
}
