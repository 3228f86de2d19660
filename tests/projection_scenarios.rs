use std::path::PathBuf;

use approx::assert_relative_eq;
use event_projection::interpret::Interpretation;
use event_projection::projection::{screen, MissingReason, Notice, PRICE_PARAMETER};
use event_projection::{DataConfig, DataSource, EventType, LookupError, ProjectionRequest};

fn sample_source() -> DataSource {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let config = DataConfig::default().with_base_dir(data_dir);
    DataSource::load(&config).expect("sample tables load")
}

fn parameters(request: &ProjectionRequest, source: &DataSource) -> Vec<String> {
    request
        .run(source)
        .unwrap()
        .result
        .rows
        .into_iter()
        .map(|row| row.parameter().to_string())
        .collect()
}

#[test]
fn inflation_projection_uses_latest_statement() {
    let source = sample_source();
    let request = ProjectionRequest::new("ACME", EventType::Inflation, 3.0);
    let projection = request.run(&source).unwrap();
    let result = &projection.result;

    assert_eq!(result.event_delta, 1.0);
    assert_eq!(
        parameters(&request, &source),
        [
            PRICE_PARAMETER,
            "Net Income",
            "Gross Profit",
            "Average Operating Margin",
            "Research and Development",
        ]
    );

    let price = result.price_row().unwrap();
    assert_relative_eq!(price.projected_value(), 101.5);

    // Sensitivity 2.5 applied to the statement value 125
    assert_relative_eq!(result.row("Net Income").unwrap().projected_value(), 128.125);
    assert_relative_eq!(result.row("Gross Profit").unwrap().projected_value(), 454.5, epsilon = 1e-9);
    assert_relative_eq!(
        result.row("Research and Development").unwrap().projected_value(),
        85.85,
        epsilon = 1e-9
    );

    // Blank sensitivity cell for Total Revenue
    assert_eq!(result.notices.len(), 1);
    assert!(matches!(
        &result.notices[0],
        Notice::MissingField { field, reason: MissingReason::SensitivityNotNumeric(_) } if field == "Total Revenue"
    ));

    assert_eq!(
        projection.interpretations,
        vec![Interpretation::PriceBenefitsFromRise, Interpretation::HighOperatingMargin]
    );
}

#[test]
fn missing_close_price_still_projects_line_items() {
    let source = sample_source();
    let projection = ProjectionRequest::new("CRUX", EventType::Inflation, 3.0)
        .run(&source)
        .unwrap();

    assert!(projection.result.price_row().is_none());
    assert_eq!(projection.result.notices, vec![Notice::absent("Latest Close Price")]);
    assert_relative_eq!(
        projection.result.row("Total Revenue").unwrap().projected_value(),
        880.88,
        epsilon = 1e-9
    );
    assert_eq!(projection.result.rows.len(), 4);
}

#[test]
fn non_numeric_cells_become_notices() {
    let source = sample_source();
    let projection = ProjectionRequest::new("BOLT", EventType::Inflation, 3.0)
        .run(&source)
        .unwrap();
    let skipped: Vec<&str> = projection.result.notices.iter().map(Notice::field).collect();

    assert_eq!(skipped, ["Gross Profit"]);
    assert_relative_eq!(projection.result.price_row().unwrap().projected_value(), 45.8, epsilon = 1e-9);
    assert_eq!(projection.result.row("Total Revenue").unwrap().current_value(), 5500.0);
    // Blank in the latest statement and never in the baseline
    assert!(projection.result.row("Research and Development").is_none());
    assert_eq!(projection.baseline.line_item("Research and Development"), None);
    assert_eq!(
        projection.interpretations,
        vec![Interpretation::PriceHurtByRise, Interpretation::LowOperatingMargin]
    );
}

#[test]
fn interest_rate_tables_are_separate() {
    let source = sample_source();
    let projection = ProjectionRequest::new("ACME", EventType::InterestRate, 4.25)
        .run(&source)
        .unwrap();
    let result = &projection.result;

    assert_eq!(result.event_delta, -1.0);
    assert_relative_eq!(result.price_row().unwrap().projected_value(), 100.8, epsilon = 1e-9);
    assert_relative_eq!(result.row("Total Revenue").unwrap().projected_value(), 1047.9, epsilon = 1e-9);
    assert_relative_eq!(result.row("Interest Expense").unwrap().projected_value(), 33.915, epsilon = 1e-9);
    assert_relative_eq!(result.row("Net Income").unwrap().projected_value(), 123.75, epsilon = 1e-9);
    assert!(result.notices.is_empty());
}

#[test]
fn unknown_symbol_is_not_found() {
    let source = sample_source();
    let err = ProjectionRequest::new("ZZZ", EventType::Inflation, 3.0)
        .run(&source)
        .unwrap_err();

    assert_eq!(
        err,
        LookupError::NotFound {
            symbol: "ZZZ".to_string(),
            event_type: EventType::Inflation,
        }
    );
    // Lookups stay exact
    assert!(ProjectionRequest::new("acme", EventType::Inflation, 3.0).run(&source).is_err());
}

#[test]
fn screen_ranks_sample_stocks() {
    let source = sample_source();
    let ranked = screen(&source, EventType::Inflation, 3.0);
    let symbols: Vec<&str> = ranked.iter().map(|p| p.request.symbol.as_str()).collect();

    assert_eq!(symbols, ["ACME", "BOLT", "CRUX"]);
}
