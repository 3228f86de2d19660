//! Rendering of projections as text tables, CSV and JSON

use std::io::{self, Write};

use crate::projection::Projection;
use crate::records::loader::{EVENT_COEFFICIENT, LATEST_CLOSE_PRICE};
use crate::records::LineItem;

const CSV_HEADER: [&str; 4] = ["Parameter", "Current Value", "Projected Value", "Change"];

/// Write the matched records, then the projection as a fixed-width table
/// followed by notices and commentary
pub fn render_table<W: Write>(out: &mut W, projection: &Projection) -> io::Result<()> {
    let request = &projection.request;

    writeln!(out, "Details for {} ({})", request.symbol, request.event_type)?;
    writeln!(
        out,
        "Expected {}: {:.2}%  (latest {:.2}%, delta {:+.2})",
        request.event_type.rate_label(),
        request.expected_rate,
        projection.latest_event_value,
        projection.result.event_delta
    )?;
    if let Some(date) = projection.statement_date {
        writeln!(out, "Line items from statement dated {date}")?;
    }
    writeln!(out)?;

    let event = &projection.event;
    let close = event
        .latest_close_price
        .map_or_else(|| "n/a".to_string(), |close| close.to_string());
    let mut event_fields = vec![
        LineItem::new(EVENT_COEFFICIENT, event.event_coefficient.to_string()),
        LineItem::new(LATEST_CLOSE_PRICE, close),
    ];
    event_fields.extend(event.sensitivities().iter().cloned());
    render_fields(out, "Event data:", &event_fields)?;
    render_fields(out, "Statement data:", &projection.baseline.line_items)?;

    let width = projection
        .result
        .rows
        .iter()
        .map(|row| row.parameter().len())
        .chain(std::iter::once(CSV_HEADER[0].len()))
        .max()
        .unwrap_or(0);

    writeln!(
        out,
        "{:<width$} | {:>18} | {:>18} | {:>16}",
        CSV_HEADER[0], CSV_HEADER[1], CSV_HEADER[2], CSV_HEADER[3]
    )?;
    writeln!(out, "{}", "-".repeat(width + 61))?;
    for row in &projection.result.rows {
        writeln!(
            out,
            "{:<width$} | {:>18.4} | {:>18.4} | {:>+16.4}",
            row.parameter(), row.current_value(), row.projected_value(), row.change()
        )?;
    }

    if !projection.result.notices.is_empty() {
        writeln!(out)?;
        writeln!(out, "Notices:")?;
        for notice in &projection.result.notices {
            writeln!(out, "  ! {notice}")?;
        }
    }

    if !projection.interpretations.is_empty() {
        writeln!(out)?;
        writeln!(out, "Interpretation:")?;
        for interpretation in &projection.interpretations {
            writeln!(out, "  - {interpretation}")?;
        }
    }

    Ok(())
}

fn render_fields<W: Write>(out: &mut W, title: &str, fields: &[LineItem]) -> io::Result<()> {
    let width = fields.iter().map(|item| item.name.len()).max().unwrap_or(0);
    writeln!(out, "{title}")?;
    for item in fields {
        let value = if item.value.is_empty() { "(blank)" } else { item.value.as_str() };
        writeln!(out, "  {:<width$}  {}", item.name, value)?;
    }
    writeln!(out)
}

/// Write the projection rows as CSV
pub fn write_csv<W: Write>(out: W, projection: &Projection) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for row in &projection.result.rows {
        writer.write_record([
            row.parameter().to_string(),
            row.current_value().to_string(),
            row.projected_value().to_string(),
            row.change().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Pretty JSON of the whole projection
pub fn to_json(projection: &Projection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(projection)
}

/// Write a ranked screen as one line per stock
pub fn render_screen<W: Write>(out: &mut W, projections: &[Projection]) -> io::Result<()> {
    writeln!(
        out,
        "{:<4} {:<10} {:>12} {:>14} {:>12} {:>8}",
        "Rank", "Symbol", "Close", "Projected", "Change", "Notices"
    )?;
    for (rank, projection) in projections.iter().enumerate() {
        let symbol = &projection.request.symbol;
        let notices = projection.result.notices.len();
        match projection.result.price_row() {
            Some(price) => writeln!(
                out,
                "{:<4} {:<10} {:>12.2} {:>14.2} {:>+12.2} {:>8}",
                rank + 1,
                symbol,
                price.current_value(),
                price.projected_value(),
                price.change(),
                notices
            )?,
            None => writeln!(
                out,
                "{:<4} {:<10} {:>12} {:>14} {:>12} {:>8}",
                rank + 1,
                symbol,
                "-",
                "-",
                "-",
                notices
            )?,
        }
    }
    Ok(())
}
