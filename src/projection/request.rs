//! Resolve a user query against the data source and run the engine

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use super::engine::project;
use super::rows::ProjectionResult;
use crate::error::LookupError;
use crate::interpret::{interpret, Interpretation};
use crate::records::{BaselineRecord, EventRecord, EventType};
use crate::source::DataSource;

/// One user query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub symbol: String,
    pub event_type: EventType,
    /// Forecast for the macro rate, in percent
    pub expected_rate: f64,
}

impl ProjectionRequest {
    pub fn new(symbol: impl Into<String>, event_type: EventType, expected_rate: f64) -> Self {
        Self {
            symbol: symbol.into(),
            event_type,
            expected_rate,
        }
    }

    /// Look up the stock's records and project them.
    ///
    /// Returns [`LookupError::NotFound`] without projecting anything when
    /// either the event or the baseline record is missing. When the stock
    /// has statement history, the most recent entry refreshes the baseline
    /// line items before projecting.
    pub fn run(&self, source: &DataSource) -> Result<Projection, LookupError> {
        let not_found = || LookupError::NotFound {
            symbol: self.symbol.clone(),
            event_type: self.event_type,
        };

        let event = source.event(self.event_type, &self.symbol).ok_or_else(not_found)?;
        let baseline = source.baseline(self.event_type, &self.symbol).ok_or_else(not_found)?;

        let statement = source.latest_statement(&self.symbol);
        let baseline = match statement {
            Some(entry) => {
                debug!("{}: refreshing baseline from statement dated {}", self.symbol, entry.date);
                baseline.refreshed(entry)
            }
            None => baseline.clone(),
        };

        let result = project(event, &baseline, self.expected_rate);
        debug!(
            "{}: {} rows, {} notices, event delta {}",
            self.symbol,
            result.rows.len(),
            result.notices.len(),
            result.event_delta
        );

        Ok(Projection {
            request: self.clone(),
            latest_event_value: baseline.latest_event_value,
            statement_date: statement.map(|entry| entry.date),
            interpretations: interpret(event, &baseline),
            result,
            event: event.clone(),
            baseline,
        })
    }
}

/// A completed request: what was asked, what was found, what was projected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub request: ProjectionRequest,
    /// Rate the baseline was captured at
    pub latest_event_value: f64,
    /// Date of the statement entry that refreshed the baseline, if any
    pub statement_date: Option<NaiveDate>,
    pub result: ProjectionResult,
    pub interpretations: Vec<Interpretation>,
    /// Event record the projection was computed from
    pub event: EventRecord,
    /// Baseline after any statement refresh
    pub baseline: BaselineRecord,
}

impl Projection {
    /// Change in projected stock price, if a price row was produced
    pub fn price_change(&self) -> Option<f64> {
        self.result.price_row().map(|row| row.change())
    }
}
