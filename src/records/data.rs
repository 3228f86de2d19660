//! Core record structures for event sensitivities and baseline financials

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Markers that spreadsheet exports use for "no value"
const NOT_AVAILABLE_MARKERS: [&str; 6] = ["n/a", "na", "none", "null", "-", "--"];

/// Macro-economic driver being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Inflation,
    #[serde(alias = "interest_rate", alias = "rate")]
    InterestRate,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::Inflation, EventType::InterestRate];

    /// Label of the rate the user forecasts for this event
    pub fn rate_label(&self) -> &'static str {
        match self {
            EventType::Inflation => "inflation rate",
            EventType::InterestRate => "interest rate",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Inflation => write!(f, "Inflation"),
            EventType::InterestRate => write!(f, "Interest Rate"),
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inflation" => Ok(EventType::Inflation),
            "interest-rate" | "interest_rate" | "interest rate" | "rate" => {
                Ok(EventType::InterestRate)
            }
            other => Err(format!(
                "unknown event type `{other}` (expected `inflation` or `interest-rate`)"
            )),
        }
    }
}

/// Parse a raw cell as a finite number.
///
/// Surrounding whitespace and thousands separators are ignored. Blank cells,
/// not-available markers and non-finite values are rejected so that callers
/// can treat them as absent instead of zero.
pub fn parse_numeric(raw: &str) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if NOT_AVAILABLE_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return Err(ParseError::NotAvailable(trimmed.to_string()));
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| ParseError::Invalid(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(ParseError::NotFinite(trimmed.to_string()));
    }
    Ok(value)
}

/// A named financial-statement value, kept as the raw cell text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub value: String,
}

impl LineItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// How one stock's price historically responded to a macro event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub symbol: String,

    /// Price change per unit of rate change
    pub event_coefficient: f64,

    /// Most recent close; `None` when the column is missing or not numeric
    pub latest_close_price: Option<f64>,

    /// Line-item sensitivities in source column order, as raw cell text
    sensitivities: Vec<LineItem>,
}

impl EventRecord {
    pub fn new(
        symbol: impl Into<String>,
        event_coefficient: f64,
        latest_close_price: Option<f64>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            event_coefficient,
            latest_close_price,
            sensitivities: Vec::new(),
        }
    }

    pub fn with_sensitivity(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_sensitivity(field, value);
        self
    }

    /// Add a sensitivity column. A repeated column name keeps its first value,
    /// matching [`BaselineRecord::line_item`].
    pub(crate) fn insert_sensitivity(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        if self.sensitivity(&field).is_none() {
            self.sensitivities.push(LineItem::new(field, value));
        }
    }

    /// Raw sensitivity for `field`, if the event table has that column
    pub fn sensitivity(&self, field: &str) -> Option<&str> {
        self.sensitivities
            .iter()
            .find(|item| item.name == field)
            .map(|item| item.value.as_str())
    }

    pub fn sensitivities(&self) -> &[LineItem] {
        &self.sensitivities
    }

    pub fn sensitivity_count(&self) -> usize {
        self.sensitivities.len()
    }
}

/// Current financial-statement values for one stock
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineRecord {
    pub stock_name: String,

    /// Macro rate in effect when the baseline was captured
    pub latest_event_value: f64,

    /// Line items in source column order
    pub line_items: Vec<LineItem>,
}

impl BaselineRecord {
    pub fn new(stock_name: impl Into<String>, latest_event_value: f64) -> Self {
        Self {
            stock_name: stock_name.into(),
            latest_event_value,
            line_items: Vec::new(),
        }
    }

    pub fn with_line_item(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.line_items.push(LineItem::new(name, value));
        self
    }

    /// Raw value of the first line item called `name`
    pub fn line_item(&self, name: &str) -> Option<&str> {
        self.line_items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.value.as_str())
    }

    /// Copy of this baseline with values taken from a newer statement entry.
    ///
    /// Items the entry reports replace baseline values of the same name in
    /// place; items the baseline lacks are appended in entry order. Blank
    /// entry cells mean "not reported" and leave the baseline value alone.
    pub fn refreshed(&self, entry: &StatementEntry) -> BaselineRecord {
        let mut refreshed = self.clone();
        for item in entry.line_items.iter().filter(|item| !item.value.trim().is_empty()) {
            match refreshed
                .line_items
                .iter_mut()
                .find(|existing| existing.name == item.name)
            {
                Some(existing) => existing.value = item.value.clone(),
                None => refreshed.line_items.push(item.clone()),
            }
        }
        refreshed
    }
}

/// One dated row of a stock's financial-statement history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementEntry {
    pub symbol: String,
    pub date: NaiveDate,
    pub line_items: Vec<LineItem>,
}
