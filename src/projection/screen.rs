//! Project every stock of an event type and rank the results

use std::cmp::Ordering;

use rayon::prelude::*;

use super::request::{Projection, ProjectionRequest};
use crate::records::EventType;
use crate::source::DataSource;

/// Project all symbols that have both records, largest price gain first.
///
/// Each symbol is an independent request over the shared read-only source,
/// so they run in parallel. Projections without a price row rank last, in
/// event-table order.
pub fn screen(source: &DataSource, event_type: EventType, expected_rate: f64) -> Vec<Projection> {
    let mut projections: Vec<Projection> = source
        .symbols(event_type)
        .par_iter()
        .filter_map(|symbol| {
            ProjectionRequest::new(*symbol, event_type, expected_rate)
                .run(source)
                .ok()
        })
        .collect();

    // Stable sort keeps table order among equals
    projections.sort_by(|a, b| compare_price_change(a.price_change(), b.price_change()));
    projections
}

fn compare_price_change(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
