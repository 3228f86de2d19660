//! Event Projection - stock sensitivity to macro events
//!
//! This library provides:
//! - Typed event, baseline and statement records loaded from CSV exports
//! - An immutable data source answering keyed lookups
//! - A linear projection engine driven by a single event delta
//! - Qualitative interpretation and table/CSV/JSON reports

pub mod config;
pub mod error;
pub mod interpret;
pub mod projection;
pub mod records;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use config::DataConfig;
pub use error::{LoadError, LookupError, ParseError};
pub use projection::{project, Projection, ProjectionRequest, ProjectionResult, ProjectionRow};
pub use records::{BaselineRecord, EventRecord, EventType};
pub use source::DataSource;
