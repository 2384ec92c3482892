//! Revenue Projection - hybrid recurring + project revenue forecasting engine
//!
//! This library provides:
//! - Month-by-month MRR projection (net-rate or decomposed rules)
//! - Linear project revenue with optional recognition delay
//! - A merged, calendar-labelled timeline with running totals
//! - Summary KPIs (ARR, revenue totals, revenue mix, growth, run-rate)
//! - Batch scenario runs and a recompute-on-change calculator session
//!
//! Every projection is a pure function of its inputs.

pub mod error;
pub mod inputs;
pub mod projection;
pub mod metrics;
pub mod format;
pub mod output;
pub mod scenario;

// Re-export commonly used types
pub use error::{InputError, LoadError};
pub use inputs::{
    DetailedInputs, InputBounds, InputProfile, ProjectRevenueInputs, RecurringRevenueInputs,
    RevenueInputs, Scenario, SimpleInputs,
};
pub use metrics::{MetricsAggregator, RevenueMetrics};
pub use projection::{project_revenue, MonthlyProjection, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::{Calculator, ScenarioRunner};
