//! Qualitative commentary on a stock's event sensitivity and margins

use std::fmt;

use serde::Serialize;

use crate::records::{parse_numeric, BaselineRecord, EventRecord};

/// Baseline line item carrying the average operating margin
pub const OPERATING_MARGIN_FIELD: &str = "Average Operating Margin";

/// Event coefficients beyond ±1 are considered material
const COEFFICIENT_THRESHOLD: f64 = 1.0;
const HIGH_MARGIN: f64 = 0.2;
const LOW_MARGIN: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    /// Price falls sharply as the rate rises
    PriceHurtByRise,
    /// Price benefits from a rising rate
    PriceBenefitsFromRise,
    HighOperatingMargin,
    LowOperatingMargin,
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Interpretation::PriceHurtByRise => {
                "1% increase in the rate: stock price decreases significantly. Increases portfolio risk."
            }
            Interpretation::PriceBenefitsFromRise => {
                "1% increase in the rate: stock price increases, benefiting from the event."
            }
            Interpretation::HighOperatingMargin => {
                "High operating margin: indicates strong management effectiveness."
            }
            Interpretation::LowOperatingMargin => {
                "Low operating margin: reflects risk in profitability."
            }
        };
        f.write_str(text)
    }
}

pub fn interpret_event(event: &EventRecord) -> Option<Interpretation> {
    if event.event_coefficient < -COEFFICIENT_THRESHOLD {
        Some(Interpretation::PriceHurtByRise)
    } else if event.event_coefficient > COEFFICIENT_THRESHOLD {
        Some(Interpretation::PriceBenefitsFromRise)
    } else {
        None
    }
}

pub fn interpret_baseline(baseline: &BaselineRecord) -> Option<Interpretation> {
    let margin = parse_numeric(baseline.line_item(OPERATING_MARGIN_FIELD)?).ok()?;
    if margin > HIGH_MARGIN {
        Some(Interpretation::HighOperatingMargin)
    } else if margin < LOW_MARGIN {
        Some(Interpretation::LowOperatingMargin)
    } else {
        None
    }
}

/// All commentary for one stock, event first
pub fn interpret(event: &EventRecord, baseline: &BaselineRecord) -> Vec<Interpretation> {
    interpret_event(event)
        .into_iter()
        .chain(interpret_baseline(baseline))
        .collect()
}
