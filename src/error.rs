//! Error types for input validation and scenario loading

use thiserror::Error;

/// Rejection of a `RevenueInputs` value before any arithmetic runs
///
/// Every variant names the offending field so callers can report the failure
/// next to the input it came from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("projection horizon of {months} months exceeds the maximum of {max}")]
    HorizonTooLong { months: u32, max: u32 },

    #[error("{field} overflows in month {month}")]
    Overflow { field: &'static str, month: u32 },
}

impl InputError {
    /// Name of the input field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            InputError::NotFinite { field, .. }
            | InputError::Negative { field, .. }
            | InputError::OutOfBounds { field, .. }
            | InputError::Overflow { field, .. } => field,
            InputError::HorizonTooLong { .. } => "projectionMonths",
        }
    }
}

/// Failure while reading saved scenarios or input documents
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse input json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario {row} is invalid: {source}")]
    Invalid {
        row: usize,
        #[source]
        source: InputError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_is_reported() {
        let err = InputError::Negative { field: "initialMRR", value: -1.0 };
        assert_eq!(err.field(), "initialMRR");
        assert_eq!(err.to_string(), "initialMRR must not be negative, got -1");

        let err = InputError::HorizonTooLong { months: 700, max: 600 };
        assert_eq!(err.field(), "projectionMonths");
    }
}
