//! Monthly projection output structures

use super::project::ProjectMonth;
use super::recurring::RecurringMonth;
use crate::inputs::InputProfile;
use crate::metrics::RevenueMetrics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    // Timing
    pub month: u32,
    pub month_label: String,

    // Recurring revenue
    #[serde(rename = "existingMRR")]
    pub existing_mrr: f64,
    #[serde(rename = "newMRR")]
    pub new_mrr: f64,
    #[serde(rename = "expansionMRR")]
    pub expansion_mrr: f64,
    #[serde(rename = "churnedMRR")]
    pub churned_mrr: f64,
    #[serde(rename = "totalMRR")]
    pub total_mrr: f64,

    // Project revenue
    pub booked_project_revenue: f64,
    pub project_revenue: f64,

    // Summary
    pub total_revenue: f64,
    pub cumulative_revenue: f64,
}

impl MonthlyProjection {
    /// Merge one recurring and one project record for the same month
    ///
    /// `prior_cumulative` is the previous month's cumulative revenue (0 for
    /// month 1).
    pub fn from_parts(
        month_label: String,
        recurring: &RecurringMonth,
        project: &ProjectMonth,
        prior_cumulative: f64,
    ) -> Self {
        let total_revenue = recurring.total_mrr + project.revenue;
        Self {
            month: recurring.month,
            month_label,
            existing_mrr: recurring.existing_mrr,
            new_mrr: recurring.new_mrr,
            expansion_mrr: recurring.expansion_mrr,
            churned_mrr: recurring.churned_mrr,
            total_mrr: recurring.total_mrr,
            booked_project_revenue: project.booked_revenue,
            project_revenue: project.revenue,
            total_revenue,
            cumulative_revenue: prior_cumulative + total_revenue,
        }
    }

    /// New plus expansion minus churn
    pub fn net_new_mrr(&self) -> f64 {
        self.new_mrr + self.expansion_mrr - self.churned_mrr
    }
    /// First amount in this row that is not a finite number, by output name
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("existingMRR", self.existing_mrr),
            ("newMRR", self.new_mrr),
            ("expansionMRR", self.expansion_mrr),
            ("churnedMRR", self.churned_mrr),
            ("totalMRR", self.total_mrr),
            ("bookedProjectRevenue", self.booked_project_revenue),
            ("projectRevenue", self.project_revenue),
            ("totalRevenue", self.total_revenue),
            ("cumulativeRevenue", self.cumulative_revenue),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| field)
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Parameterization the inputs came from
    pub profile: InputProfile,

    /// Date the calendar labels are anchored to
    pub as_of: NaiveDate,

    /// Monthly rows, month 1 first
    pub projections: Vec<MonthlyProjection>,

    /// Summary KPIs derived from `projections`
    pub metrics: RevenueMetrics,
}

impl ProjectionResult {
    /// Row for a 1-based month
    pub fn month(&self, month: u32) -> Option<&MonthlyProjection> {
        month
            .checked_sub(1)
            .and_then(|idx| self.projections.get(idx as usize))
    }

    pub fn horizon(&self) -> u32 {
        self.projections.len() as u32
    }

    /// Final cumulative revenue (0 for an empty projection)
    pub fn cumulative_revenue(&self) -> f64 {
        self.projections.last().map(|r| r.cumulative_revenue).unwrap_or(0.0)
    }
}
