//! Flat input shapes for the simple and detailed profiles

use super::{ProjectRevenueInputs, RecurringRevenueInputs, RevenueInputs, SIMPLE_PROFILE_MONTHS};
use serde::{Deserialize, Serialize};

/// Simple profile: net-rate MRR plus a linearly growing project base
///
/// Always projects `SIMPLE_PROFILE_MONTHS` months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInputs {
    #[serde(rename = "initialMRR")]
    pub initial_mrr: f64,
    /// Percent per month, compounding
    #[serde(rename = "mrrGrowthRate")]
    pub mrr_growth_rate: f64,
    /// Percent per month, compounding
    pub churn_rate: f64,
    /// Month-1 project revenue
    pub project_revenue: f64,
    /// Percent per year, linear
    pub project_growth_rate: f64,
}

impl Default for SimpleInputs {
    fn default() -> Self {
        Self {
            initial_mrr: 100_000.0,
            mrr_growth_rate: 15.0,
            churn_rate: 5.0,
            project_revenue: 50_000.0,
            project_growth_rate: 10.0,
        }
    }
}

impl SimpleInputs {
    pub fn into_revenue_inputs(self) -> RevenueInputs {
        RevenueInputs::new(
            RecurringRevenueInputs::NetRate {
                initial_mrr: self.initial_mrr,
                growth_rate: self.mrr_growth_rate,
                churn_rate: self.churn_rate,
            },
            ProjectRevenueInputs::Linear {
                monthly_revenue: self.project_revenue,
                annual_growth_rate: self.project_growth_rate,
            },
            SIMPLE_PROFILE_MONTHS,
        )
    }
}

/// Recurring half of the detailed profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRecurringInputs {
    #[serde(rename = "currentMRR")]
    pub current_mrr: f64,
    pub new_customers_per_month: f64,
    #[serde(rename = "averageMRRPerCustomer")]
    pub average_mrr_per_customer: f64,
    pub monthly_growth_from_existing: f64,
    pub monthly_churn_rate: f64,
}

/// Project half of the detailed profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedProjectInputs {
    pub new_projects_per_month: f64,
    pub average_project_value: f64,
    /// Days
    pub average_time_to_close: f64,
    #[serde(default)]
    pub annual_growth_rate: f64,
}

/// Detailed profile: customer-level recurring drivers and a project pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedInputs {
    pub recurring: DetailedRecurringInputs,
    pub projects: DetailedProjectInputs,
    pub projection_months: u32,
}

impl DetailedInputs {
    pub fn into_revenue_inputs(self) -> RevenueInputs {
        let r = self.recurring;
        let p = self.projects;
        RevenueInputs::new(
            RecurringRevenueInputs::Decomposed {
                current_mrr: r.current_mrr,
                new_customers_per_month: r.new_customers_per_month,
                average_mrr_per_customer: r.average_mrr_per_customer,
                monthly_growth_from_existing: r.monthly_growth_from_existing,
                monthly_churn_rate: r.monthly_churn_rate,
            },
            ProjectRevenueInputs::Pipeline {
                new_projects_per_month: p.new_projects_per_month,
                average_project_value: p.average_project_value,
                average_time_to_close: p.average_time_to_close,
                annual_growth_rate: p.annual_growth_rate,
            },
            self.projection_months,
        )
    }
}
