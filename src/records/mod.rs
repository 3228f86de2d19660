//! Record structures and CSV loading for the reference tables

mod data;
pub mod loader;

pub use data::{
    parse_numeric, BaselineRecord, EventRecord, EventType, LineItem, StatementEntry,
};
pub use loader::{load_baseline_records, load_event_records, load_statements};
