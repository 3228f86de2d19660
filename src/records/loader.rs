//! CSV loading for event, baseline and statement tables
//!
//! Column layouts follow the spreadsheet exports the dashboards were built on:
//! a handful of named metadata columns, every other column is a line item
//! (baseline, statement) or a line-item sensitivity (event).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};

use super::{parse_numeric, BaselineRecord, EventRecord, EventType, LineItem, StatementEntry};
use crate::error::LoadError;

pub const SYMBOL: &str = "Symbol";
pub const STOCK_NAME: &str = "Stock Name";
pub const EVENT_COEFFICIENT: &str = "Event Coefficient";
pub const LATEST_CLOSE_PRICE: &str = "Latest Close Price";
pub const LATEST_EVENT_VALUE: &str = "Latest Event Value";
pub const EVENT_TYPE: &str = "Event Type";
pub const DATE: &str = "Date";

/// Statement dates are ISO formatted
const DATE_FORMAT: &str = "%Y-%m-%d";

const EVENT_METADATA: [&str; 5] = [SYMBOL, EVENT_COEFFICIENT, LATEST_CLOSE_PRICE, EVENT_TYPE, DATE];
const BASELINE_METADATA: [&str; 4] = [STOCK_NAME, SYMBOL, DATE, LATEST_EVENT_VALUE];
const STATEMENT_METADATA: [&str; 2] = [SYMBOL, DATE];

/// Load the `expected` event table from a CSV file
pub fn load_event_records(path: &Path, expected: EventType) -> Result<Vec<EventRecord>, LoadError> {
    let file = open(path)?;
    let records = load_event_records_from_reader(file, path, expected)?;
    info!("Loaded {} event records from {}", records.len(), path.display());
    Ok(records)
}

/// Load event records from any reader; `origin` names the source in errors.
///
/// When the table has an `Event Type` column, rows tagged with a different
/// event type are skipped with a warning. Blank or unrecognized tags keep
/// the row.
pub fn load_event_records_from_reader<R: Read>(
    reader: R,
    origin: &Path,
    expected: EventType,
) -> Result<Vec<EventRecord>, LoadError> {
    let mut rdr = csv_reader(reader);
    let headers = read_headers(&mut rdr, origin)?;

    let symbol_idx = require_column(&headers, SYMBOL, origin)?;
    let coefficient_idx = require_column(&headers, EVENT_COEFFICIENT, origin)?;
    let close_idx = column_index(&headers, LATEST_CLOSE_PRICE);
    let event_type_idx = column_index(&headers, EVENT_TYPE);

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|source| csv_error(origin, source))?;
        let symbol = cell(&row, symbol_idx);
        if symbol.is_empty() {
            debug!("Skipping event row without a symbol at line {}", line_of(&row));
            continue;
        }

        if let Some(idx) = event_type_idx {
            let tag = cell(&row, idx);
            if !tag.is_empty() {
                match tag.parse::<EventType>() {
                    Ok(found) if found != expected => {
                        warn!(
                            "{}: skipping {} row at line {} tagged `{}` in the {} table",
                            origin.display(),
                            symbol,
                            line_of(&row),
                            tag,
                            expected
                        );
                        continue;
                    }
                    Ok(_) => {}
                    Err(err) => warn!("{}: line {}: {}", origin.display(), line_of(&row), err),
                }
            }
        }

        let event_coefficient = required_number(&row, coefficient_idx, EVENT_COEFFICIENT, origin)?;
        let latest_close_price = close_idx.and_then(|idx| parse_numeric(cell(&row, idx)).ok());

        let mut record = EventRecord::new(symbol, event_coefficient, latest_close_price);
        for (idx, name) in headers.iter().enumerate() {
            if !EVENT_METADATA.contains(&name.as_str()) {
                record.insert_sensitivity(name.clone(), cell(&row, idx));
            }
        }
        records.push(record);
    }

    Ok(records)
}

/// Load baseline records from a CSV file
pub fn load_baseline_records(path: &Path) -> Result<Vec<BaselineRecord>, LoadError> {
    let file = open(path)?;
    let records = load_baseline_records_from_reader(file, path)?;
    info!("Loaded {} baseline records from {}", records.len(), path.display());
    Ok(records)
}

/// Load baseline records from any reader; `origin` names the source in errors
pub fn load_baseline_records_from_reader<R: Read>(
    reader: R,
    origin: &Path,
) -> Result<Vec<BaselineRecord>, LoadError> {
    let mut rdr = csv_reader(reader);
    let headers = read_headers(&mut rdr, origin)?;

    let name_idx = require_column(&headers, STOCK_NAME, origin)?;
    let event_value_idx = require_column(&headers, LATEST_EVENT_VALUE, origin)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|source| csv_error(origin, source))?;
        let stock_name = cell(&row, name_idx);
        if stock_name.is_empty() {
            debug!("Skipping baseline row without a stock name at line {}", line_of(&row));
            continue;
        }

        let latest_event_value = required_number(&row, event_value_idx, LATEST_EVENT_VALUE, origin)?;
        let mut record = BaselineRecord::new(stock_name, latest_event_value);
        record.line_items = line_items(&headers, &row, &BASELINE_METADATA);
        records.push(record);
    }

    Ok(records)
}

/// Load statement history from a CSV file, in file order
pub fn load_statements(path: &Path) -> Result<Vec<StatementEntry>, LoadError> {
    let file = open(path)?;
    let entries = load_statements_from_reader(file, path)?;
    info!("Loaded {} statement entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Load statement history from any reader; `origin` names the source in errors
pub fn load_statements_from_reader<R: Read>(
    reader: R,
    origin: &Path,
) -> Result<Vec<StatementEntry>, LoadError> {
    let mut rdr = csv_reader(reader);
    let headers = read_headers(&mut rdr, origin)?;

    let symbol_idx = require_column(&headers, SYMBOL, origin)?;
    let date_idx = require_column(&headers, DATE, origin)?;

    let mut entries = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|source| csv_error(origin, source))?;
        let symbol = cell(&row, symbol_idx);
        if symbol.is_empty() {
            continue;
        }

        let raw_date = cell(&row, date_idx);
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|source| {
            LoadError::InvalidDate {
                path: origin.to_path_buf(),
                line: line_of(&row),
                value: raw_date.to_string(),
                source,
            }
        })?;

        entries.push(StatementEntry {
            symbol: symbol.to_string(),
            date,
            line_items: line_items(&headers, &row, &STATEMENT_METADATA),
        });
    }

    Ok(entries)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn csv_error(origin: &Path, source: csv::Error) -> LoadError {
    LoadError::Csv {
        path: origin.to_path_buf(),
        source,
    }
}

fn read_headers<R: Read>(rdr: &mut csv::Reader<R>, origin: &Path) -> Result<Vec<String>, LoadError> {
    let headers = rdr.headers().map_err(|source| csv_error(origin, source))?;
    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

fn column_index(headers: &[String], column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

fn require_column(headers: &[String], column: &str, origin: &Path) -> Result<usize, LoadError> {
    column_index(headers, column).ok_or_else(|| LoadError::MissingColumn {
        path: origin.to_path_buf(),
        column: column.to_string(),
    })
}

/// Cell text, empty when a flexible row is short
fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

fn required_number(
    row: &StringRecord,
    idx: usize,
    column: &str,
    origin: &Path,
) -> Result<f64, LoadError> {
    parse_numeric(cell(row, idx)).map_err(|source| LoadError::InvalidValue {
        path: origin.to_path_buf(),
        line: line_of(row),
        column: column.to_string(),
        source,
    })
}

fn line_items(headers: &[String], row: &StringRecord, metadata: &[&str]) -> Vec<LineItem> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !metadata.contains(&name.as_str()))
        .map(|(idx, name)| LineItem::new(name.clone(), cell(row, idx)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn origin() -> &'static Path {
        Path::new("fixture.csv")
    }

    #[test]
    fn test_load_event_records() {
        let csv = "\
Symbol,Event Coefficient,Latest Close Price,Revenue,Net Income
ACME,1.5,100,0.8,
BETA,-2.25,N/A,1.1,0.4
";
        let records = load_event_records_from_reader(csv.as_bytes(), origin(), EventType::Inflation).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "ACME");
        assert_eq!(records[0].event_coefficient, 1.5);
        assert_eq!(records[0].latest_close_price, Some(100.0));
        assert_eq!(records[0].sensitivity("Revenue"), Some("0.8"));
        // Column exists, cell blank
        assert_eq!(records[0].sensitivity("Net Income"), Some(""));
        assert_eq!(records[0].sensitivity(SYMBOL), None);
        assert_eq!(records[0].sensitivity_count(), 2);

        assert_eq!(records[1].latest_close_price, None);
    }

    #[test]
    fn test_repeated_sensitivity_column_keeps_first() {
        let csv = "\
Symbol,Event Coefficient,Revenue,Net Income,Revenue
ACME,1.5,0.8,2.0,9.9
";
        let records = load_event_records_from_reader(csv.as_bytes(), origin(), EventType::Inflation).unwrap();
        let baselines = load_baseline_records_from_reader(
            "Stock Name,Latest Event Value,Revenue,Revenue\nACME,2.0,1000,5\n".as_bytes(),
            origin(),
        )
        .unwrap();

        assert_eq!(records[0].sensitivity("Revenue"), Some("0.8"));
        assert_eq!(records[0].sensitivity_count(), 2);
        // Same rule on both sides
        assert_eq!(baselines[0].line_item("Revenue"), Some("1000"));
    }

    #[test]
    fn test_event_type_column_filters_rows() {
        let csv = "\
Symbol,Event Type,Event Coefficient,Revenue
ACME,Inflation,1.5,0.8
BETA,Interest Rate,-0.4,0.1
GAMMA,,0.3,0.2
DELTA,gdp,0.7,0.5
";
        let inflation = load_event_records_from_reader(csv.as_bytes(), origin(), EventType::Inflation).unwrap();
        let symbols: Vec<&str> = inflation.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["ACME", "GAMMA", "DELTA"]);
        assert_eq!(inflation[0].sensitivity(EVENT_TYPE), None);

        let rates = load_event_records_from_reader(csv.as_bytes(), origin(), EventType::InterestRate).unwrap();
        let symbols: Vec<&str> = rates.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["BETA", "GAMMA", "DELTA"]);
    }

    #[test]
    fn test_event_records_without_close_column() {
        let csv = "Symbol,Event Coefficient\nACME,0.5\n";
        let records = load_event_records_from_reader(csv.as_bytes(), origin(), EventType::Inflation).unwrap();

        assert_eq!(records[0].latest_close_price, None);
        assert_eq!(records[0].sensitivity_count(), 0);
    }

    #[test]
    fn test_invalid_coefficient_is_reported() {
        let csv = "Symbol,Event Coefficient\nACME,abc\n";
        let err = load_event_records_from_reader(csv.as_bytes(), origin(), EventType::Inflation).unwrap_err();

        match err {
            LoadError::InvalidValue { line, column, source, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, EVENT_COEFFICIENT);
                assert_eq!(source, ParseError::Invalid("abc".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column_is_reported() {
        let csv = "Symbol,Coefficient\nACME,1\n";
        let err = load_event_records_from_reader(csv.as_bytes(), origin(), EventType::Inflation).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == EVENT_COEFFICIENT));
    }

    #[test]
    fn test_load_baseline_records_keeps_column_order() {
        let csv = "\
Stock Name,Latest Event Value,Revenue,Operating Income,Average Operating Margin
ACME,2.0,1000,N/A,0.25
";
        let records = load_baseline_records_from_reader(csv.as_bytes(), origin()).unwrap();
        let names: Vec<&str> = records[0].line_items.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(records[0].stock_name, "ACME");
        assert_eq!(records[0].latest_event_value, 2.0);
        assert_eq!(names, ["Revenue", "Operating Income", "Average Operating Margin"]);
        assert_eq!(records[0].line_item("Operating Income"), Some("N/A"));
    }

    #[test]
    fn test_load_statements() {
        let csv = "\
Symbol,Date,Revenue
ACME,2023-12-31,950
ACME,2024-03-31,1000
";
        let entries = load_statements_from_reader(csv.as_bytes(), origin()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(entries[1].line_items, vec![LineItem::new("Revenue", "1000")]);
    }

    #[test]
    fn test_invalid_statement_date() {
        let csv = "Symbol,Date,Revenue\nACME,31/03/2024,1000\n";
        let err = load_statements_from_reader(csv.as_bytes(), origin()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { line: 2, .. }));
    }
}
