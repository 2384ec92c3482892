//! Projection engine and the two revenue models it combines

mod state;
mod engine;
mod months;
mod recurring;
mod project;
pub mod calendar;

pub use state::MrrState;
pub use engine::{project_revenue, ProjectionConfig, ProjectionEngine};
pub use months::{MonthlyProjection, ProjectionResult};
pub use recurring::{RecurringMonth, RecurringRevenueModel};
pub use project::{ProjectMonth, ProjectRevenueModel};
