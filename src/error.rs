//! Error types for loading reference tables, parsing cells and looking up records

use std::path::PathBuf;

use thiserror::Error;

use crate::records::EventType;

/// Failure to read a cell as a number
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("value is empty")]
    Empty,

    #[error("value `{0}` is a not-available marker")]
    NotAvailable(String),

    #[error("value `{0}` is not a number")]
    Invalid(String),

    #[error("value `{0}` is not finite")]
    NotFinite(String),
}

/// Failure to build the data source from its files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path} line {line}, column `{column}`: {source}")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: String,
        #[source]
        source: ParseError,
    },

    #[error("{path} line {line}: invalid date `{value}`: {source}")]
    InvalidDate {
        path: PathBuf,
        line: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Failure to resolve a request against the data source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("stock `{symbol}` not found in the {event_type} data")]
    NotFound { symbol: String, event_type: EventType },
}
