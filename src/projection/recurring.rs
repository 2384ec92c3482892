//! Recurring revenue (MRR) model
//!
//! Two rules produce the same per-month record:
//! - net-rate: closed-form compounding of the starting MRR at
//!   `(growth - churn) / 100` per month. Month `m` reports `MRR(m - 1)`, so
//!   month 1 equals the starting MRR. Each month is computed from the
//!   starting MRR, never from the previous month's rounded value.
//! - decomposed: recurrence on the prior month's close with new bookings,
//!   expansion and churn applied inside every month, including month 1.

use super::state::MrrState;
use crate::inputs::RecurringRevenueInputs;
use serde::{Deserialize, Serialize};

/// One month of recurring revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringMonth {
    pub month: u32,

    /// Prior month's closing MRR (starting MRR for month 1)
    #[serde(rename = "existingMRR")]
    pub existing_mrr: f64,

    /// MRR from new customers
    #[serde(rename = "newMRR")]
    pub new_mrr: f64,

    /// MRR added by existing customers
    #[serde(rename = "expansionMRR")]
    pub expansion_mrr: f64,

    /// MRR lost to churn
    #[serde(rename = "churnedMRR")]
    pub churned_mrr: f64,

    /// Closing MRR, never negative
    #[serde(rename = "totalMRR")]
    pub total_mrr: f64,
}

impl RecurringMonth {
    /// New plus expansion minus churn
    pub fn net_new_mrr(&self) -> f64 {
        self.new_mrr + self.expansion_mrr - self.churned_mrr
    }
}

/// Projects MRR forward under compounding growth and churn
pub struct RecurringRevenueModel;

impl RecurringRevenueModel {
    /// Produce `months` records using the rule selected by `inputs`
    pub fn project(inputs: &RecurringRevenueInputs, months: u32) -> Vec<RecurringMonth> {
        match inputs {
            RecurringRevenueInputs::NetRate {
                initial_mrr,
                growth_rate,
                churn_rate,
            } => Self::project_net_rate(*initial_mrr, *growth_rate, *churn_rate, months),
            RecurringRevenueInputs::Decomposed {
                current_mrr,
                new_customers_per_month,
                average_mrr_per_customer,
                monthly_growth_from_existing,
                monthly_churn_rate,
            } => Self::project_decomposed(
                *current_mrr,
                new_customers_per_month * average_mrr_per_customer,
                *monthly_growth_from_existing,
                *monthly_churn_rate,
                months,
            ),
        }
    }

    /// MRR after `periods` months of compounding at the net rate
    ///
    /// A net multiplier below zero (churn exceeding growth by more than 100
    /// points) is floored, so the result is never negative.
    pub fn net_rate_mrr(initial_mrr: f64, growth_rate: f64, churn_rate: f64, periods: u32) -> f64 {
        if periods == 0 {
            return initial_mrr;
        }
        let multiplier = (1.0 + (growth_rate - churn_rate) / 100.0).max(0.0);
        (initial_mrr * multiplier.powi(periods as i32)).max(0.0)
    }

    fn project_net_rate(
        initial_mrr: f64,
        growth_rate: f64,
        churn_rate: f64,
        months: u32,
    ) -> Vec<RecurringMonth> {
        let growth = growth_rate / 100.0;
        let churn = churn_rate / 100.0;
        let multiplier_floored = 1.0 + growth - churn < 0.0;

        (1..=months)
            .map(|month| {
                let total_mrr = Self::net_rate_mrr(initial_mrr, growth_rate, churn_rate, month - 1);
                if month == 1 {
                    return RecurringMonth {
                        month,
                        existing_mrr: initial_mrr,
                        new_mrr: 0.0,
                        expansion_mrr: 0.0,
                        churned_mrr: 0.0,
                        total_mrr,
                    };
                }

                let existing_mrr = Self::net_rate_mrr(initial_mrr, growth_rate, churn_rate, month - 2);
                let expansion_mrr = existing_mrr * growth;
                // Churn cannot remove more than the month started with plus expansion
                let churned_mrr = if multiplier_floored {
                    existing_mrr + expansion_mrr - total_mrr
                } else {
                    existing_mrr * churn
                };
                RecurringMonth {
                    month,
                    existing_mrr,
                    new_mrr: 0.0,
                    expansion_mrr,
                    churned_mrr,
                    total_mrr,
                }
            })
            .collect()
    }

    fn project_decomposed(
        current_mrr: f64,
        new_mrr_per_month: f64,
        expansion_rate: f64,
        churn_rate: f64,
        months: u32,
    ) -> Vec<RecurringMonth> {
        let expansion = expansion_rate / 100.0;
        let churn = churn_rate / 100.0;

        let mut state = MrrState::new(current_mrr);
        let mut rows = Vec::with_capacity(months as usize);

        for _ in 0..months {
            let expansion_mrr = state.current_mrr * expansion;
            let churned_mrr = state.current_mrr * churn;
            let net_new_mrr = new_mrr_per_month + expansion_mrr - churned_mrr;

            let existing_mrr = state.advance_month(net_new_mrr);

            rows.push(RecurringMonth {
                month: state.projection_month,
                existing_mrr,
                new_mrr: new_mrr_per_month,
                expansion_mrr,
                churned_mrr,
                total_mrr: state.current_mrr,
            });
        }

        if state.floored {
            log::debug!("recurring revenue floored at zero within {} months", months);
        }

        rows
    }
}
