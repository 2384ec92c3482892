//! Caller-side sanity bounds for rate inputs

use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Inclusive range for a percentage input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub(crate) fn check(&self, field: &'static str, value: f64) -> Result<(), InputError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(InputError::OutOfBounds {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Domain limits for rate inputs
///
/// Defaults match the calculator form limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    /// Monthly MRR growth (net-rate rule)
    pub mrr_growth: RateRange,
    /// Monthly churn (both rules)
    pub churn: RateRange,
    /// Monthly expansion from existing customers
    pub expansion: RateRange,
    /// Annual project growth
    pub project_growth: RateRange,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            mrr_growth: RateRange::new(0.0, 100.0),
            churn: RateRange::new(0.0, 50.0),
            expansion: RateRange::new(0.0, 100.0),
            project_growth: RateRange::new(-50.0, 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        let range = RateRange::new(0.0, 50.0);
        assert!(range.contains(0.0));
        assert!(range.contains(50.0));
        assert!(!range.contains(50.5));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_negative_project_growth_allowed_by_default() {
        let bounds = InputBounds::default();
        assert!(bounds.project_growth.check("projectGrowthRate", -20.0).is_ok());
        assert!(bounds.mrr_growth.check("mrrGrowthRate", -1.0).is_err());
    }
}
