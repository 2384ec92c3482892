//! MRR state carried from one month to the next

/// Recurring-revenue position at a point in time during projection
#[derive(Debug, Clone)]
pub struct MrrState {
    /// Current projection month (0 before the first month is computed)
    pub projection_month: u32,

    /// Closing MRR of the most recent month
    pub current_mrr: f64,

    /// Set once the floor at zero has been applied
    pub floored: bool,
}

impl MrrState {
    /// Initialize state from the starting MRR
    pub fn new(starting_mrr: f64) -> Self {
        Self {
            projection_month: 0,
            current_mrr: starting_mrr.max(0.0),
            floored: false,
        }
    }

    /// Apply one month of net movement and return the prior month's closing MRR
    ///
    /// MRR never goes below zero.
    pub fn advance_month(&mut self, net_new_mrr: f64) -> f64 {
        let existing = self.current_mrr;
        let next = existing + net_new_mrr;

        self.projection_month += 1;
        if next.is_nan() || next < 0.0 {
            self.floored = true;
        }
        self.current_mrr = next.max(0.0);

        existing
    }
}
