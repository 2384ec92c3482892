//! Summary KPIs derived from a completed projection
//!
//! Every ratio in here maps an empty or zero base to 0 so no NaN or infinity
//! reaches the caller.

use crate::projection::MonthlyProjection;
use serde::{Deserialize, Serialize};

/// Month whose MRR is annualized into ARR by default
pub const DEFAULT_ARR_MONTH: u32 = 12;

/// Length of the short revenue window by default
pub const DEFAULT_REVENUE_WINDOW_MONTHS: u32 = 12;

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    /// Months the projection covers
    pub horizon_months: u32,

    /// MRR at the ARR month (or the last month when the horizon is shorter) x 12
    #[serde(rename = "projectedARR")]
    pub projected_arr: f64,

    /// Last month's MRR
    #[serde(rename = "endingMRR")]
    pub ending_mrr: f64,

    /// Sum of total revenue over the short window (whole horizon if shorter)
    pub total_revenue_window: f64,

    /// Sum of total revenue over the whole horizon
    pub total_revenue_horizon: f64,

    pub total_recurring_revenue: f64,
    pub total_project_revenue: f64,

    /// Share of recurring revenue, percent
    pub recurring_percentage: f64,

    /// Share of project revenue, percent
    pub project_percentage: f64,

    /// Compound monthly growth of total revenue from month 1 to the last month, percent
    pub monthly_growth_rate: f64,

    /// Month-1 total revenue x 12
    pub current_run_rate: f64,
}

impl RevenueMetrics {
    /// First metric that is not a finite number, by output name
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("projectedARR", self.projected_arr),
            ("endingMRR", self.ending_mrr),
            ("totalRevenueWindow", self.total_revenue_window),
            ("totalRevenueHorizon", self.total_revenue_horizon),
            ("totalRecurringRevenue", self.total_recurring_revenue),
            ("totalProjectRevenue", self.total_project_revenue),
            ("monthlyGrowthRate", self.monthly_growth_rate),
            ("currentRunRate", self.current_run_rate),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| field)
    }
}

/// Reduces a monthly timeline to `RevenueMetrics`
#[derive(Debug, Clone, Copy)]
pub struct MetricsAggregator {
    arr_month: u32,
    window_months: u32,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ARR_MONTH, DEFAULT_REVENUE_WINDOW_MONTHS)
    }
}

impl MetricsAggregator {
    pub fn new(arr_month: u32, window_months: u32) -> Self {
        Self {
            arr_month: arr_month.max(1),
            window_months,
        }
    }

    /// Compute metrics over `projections`
    ///
    /// `horizon` is the requested projection length; it must match the
    /// number of rows.
    pub fn aggregate(&self, projections: &[MonthlyProjection], horizon: u32) -> RevenueMetrics {
        debug_assert_eq!(projections.len(), horizon as usize);

        let total_revenue_window: f64 = projections
            .iter()
            .take(self.window_months as usize)
            .map(|r| r.total_revenue)
            .sum();
        let total_revenue_horizon: f64 = projections.iter().map(|r| r.total_revenue).sum();

        let total_recurring_revenue: f64 = projections.iter().map(|r| r.total_mrr).sum();
        let total_project_revenue: f64 = projections.iter().map(|r| r.project_revenue).sum();
        let (recurring_percentage, project_percentage) =
            revenue_mix(total_recurring_revenue, total_project_revenue);

        // Short horizons fall back to the last available month.
        let arr_row = projections
            .get(self.arr_month as usize - 1)
            .or_else(|| projections.last());
        let projected_arr = annualize(arr_row.map(|r| r.total_mrr).unwrap_or(0.0));

        let ending_mrr = projections.last().map(|r| r.total_mrr).unwrap_or(0.0);

        let monthly_growth_rate = match (projections.first(), projections.last()) {
            (Some(first), Some(last)) => compound_monthly_growth_rate(
                first.total_revenue,
                last.total_revenue,
                projections.len().saturating_sub(1) as u32,
            ),
            _ => 0.0,
        };

        let current_run_rate = annualize(projections.first().map(|r| r.total_revenue).unwrap_or(0.0));

        RevenueMetrics {
            horizon_months: horizon,
            projected_arr,
            ending_mrr,
            total_revenue_window,
            total_revenue_horizon,
            total_recurring_revenue,
            total_project_revenue,
            recurring_percentage,
            project_percentage,
            monthly_growth_rate,
            current_run_rate,
        }
    }
}

/// Monthly figure x 12
pub fn annualize(monthly: f64) -> f64 {
    monthly * 12.0
}

/// Recurring and project shares in percent; (0, 0) when the total is zero
pub fn revenue_mix(recurring: f64, project: f64) -> (f64, f64) {
    let total = recurring + project;
    if total == 0.0 || !total.is_finite() {
        return (0.0, 0.0);
    }
    (recurring / total * 100.0, project / total * 100.0)
}

/// `((end / start)^(1 / periods) - 1) * 100`
///
/// Returns 0 when `start <= 0` or there are no periods. An `end <= 0`
/// reports a full loss (-100).
pub fn compound_monthly_growth_rate(start: f64, end: f64, periods: u32) -> f64 {
    if start <= 0.0 || periods == 0 {
        return 0.0;
    }
    let ratio = (end / start).max(0.0);
    (ratio.powf(1.0 / periods as f64) - 1.0) * 100.0
}
