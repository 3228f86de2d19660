//! Projection engine for price and income-statement line items

mod engine;
mod request;
mod rows;
mod screen;

pub use engine::project;
pub use request::{Projection, ProjectionRequest};
pub use rows::{MissingReason, Notice, ProjectionResult, ProjectionRow};
pub use screen::screen;

// ============================================================================
// Defaults
// ============================================================================

/// Parameter name of the stock price row
pub const PRICE_PARAMETER: &str = "Projected Stock Price";

/// Default expected rate (%) offered when the user gives none
pub const DEFAULT_EXPECTED_RATE: f64 = 3.65;
