//! Linear projection of price and line items from an expected rate

use log::debug;

use super::rows::{Notice, ProjectionResult, ProjectionRow};
use super::PRICE_PARAMETER;
use crate::records::loader::LATEST_CLOSE_PRICE;
use crate::records::{parse_numeric, BaselineRecord, EventRecord};

/// Project a stock's price and baseline line items to `expected_rate`.
///
/// A single event delta (`expected_rate - baseline.latest_event_value`)
/// drives every row:
///
/// - price: `close + event_coefficient * delta`
/// - line item with a sensitivity column: `current + current * factor * delta / 100`
/// - line item without one: `current * (1 + delta / 100)`
///
/// A field that cannot be projected produces a [`Notice`] instead of a row
/// and never stops the remaining fields. The function is pure; identical
/// inputs give identical results.
pub fn project(event: &EventRecord, baseline: &BaselineRecord, expected_rate: f64) -> ProjectionResult {
    let event_delta = expected_rate - baseline.latest_event_value;

    let mut rows = Vec::with_capacity(baseline.line_items.len() + 1);
    let mut notices = Vec::new();

    match event.latest_close_price {
        Some(close) => {
            let projected = close + event.event_coefficient * event_delta;
            rows.push(ProjectionRow::new(PRICE_PARAMETER, close, projected));
        }
        None => {
            debug!("{}: no close price, skipping price projection", event.symbol);
            notices.push(Notice::absent(LATEST_CLOSE_PRICE));
        }
    }

    for item in &baseline.line_items {
        let current = match parse_numeric(&item.value) {
            Ok(value) => value,
            Err(err) => {
                debug!("{}: skipping `{}`: {}", baseline.stock_name, item.name, err);
                notices.push(Notice::not_numeric(&item.name, &err));
                continue;
            }
        };

        let projected = match event.sensitivity(&item.name) {
            Some(raw) => match parse_numeric(raw) {
                Ok(factor) => current + current * factor * event_delta / 100.0,
                Err(err) => {
                    debug!(
                        "{}: sensitivity for `{}` unusable: {}",
                        event.symbol, item.name, err
                    );
                    notices.push(Notice::sensitivity_not_numeric(&item.name, &err));
                    continue;
                }
            },
            None => current * (1.0 + event_delta / 100.0),
        };

        rows.push(ProjectionRow::new(&item.name, current, projected));
    }

    ProjectionResult {
        event_delta,
        rows,
        notices,
    }
}
