//! Projection output rows and per-field notices

use std::fmt;

use serde::Serialize;

use crate::error::ParseError;

/// One projected value.
///
/// Fields are read-only outside this module so `change` can only come from
/// [`ProjectionRow::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    parameter: String,
    current_value: f64,
    projected_value: f64,
    /// Always `projected_value - current_value`
    change: f64,
}

impl ProjectionRow {
    pub fn new(parameter: impl Into<String>, current_value: f64, projected_value: f64) -> Self {
        Self {
            parameter: parameter.into(),
            current_value,
            projected_value,
            change: projected_value - current_value,
        }
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn projected_value(&self) -> f64 {
        self.projected_value
    }

    pub fn change(&self) -> f64 {
        self.change
    }
}

/// Why a field produced no row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MissingReason {
    /// The record has no usable value for the field
    Absent,
    /// The current value could not be read as a number
    NotNumeric(String),
    /// The sensitivity column exists but its value is not a number
    SensitivityNotNumeric(String),
}

/// Non-fatal problem found while projecting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    MissingField { field: String, reason: MissingReason },
}

impl Notice {
    pub fn absent(field: impl Into<String>) -> Self {
        Notice::MissingField {
            field: field.into(),
            reason: MissingReason::Absent,
        }
    }

    pub(crate) fn not_numeric(field: impl Into<String>, error: &ParseError) -> Self {
        Notice::MissingField {
            field: field.into(),
            reason: MissingReason::NotNumeric(error.to_string()),
        }
    }

    pub(crate) fn sensitivity_not_numeric(field: impl Into<String>, error: &ParseError) -> Self {
        Notice::MissingField {
            field: field.into(),
            reason: MissingReason::SensitivityNotNumeric(error.to_string()),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Notice::MissingField { field, .. } => field,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MissingField { field, reason } => match reason {
                MissingReason::Absent => write!(f, "{field}: data not available"),
                MissingReason::NotNumeric(detail) => {
                    write!(f, "{field}: could not convert current value to numeric ({detail})")
                }
                MissingReason::SensitivityNotNumeric(detail) => {
                    write!(f, "{field}: sensitivity is not numeric ({detail})")
                }
            },
        }
    }
}

/// Engine output for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// Expected rate minus the baseline's latest event value
    pub event_delta: f64,
    /// Price row first (when available), then line items in baseline order
    pub rows: Vec<ProjectionRow>,
    pub notices: Vec<Notice>,
}

impl ProjectionResult {
    pub fn row(&self, parameter: &str) -> Option<&ProjectionRow> {
        self.rows.iter().find(|row| row.parameter == parameter)
    }

    /// Projected stock price row, if the close price was known
    pub fn price_row(&self) -> Option<&ProjectionRow> {
        self.row(super::PRICE_PARAMETER)
    }
}
