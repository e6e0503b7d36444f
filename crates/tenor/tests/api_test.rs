//! Smoke test of the umbrella crate's public API surface.

use polars::df;
use tenor::{ColumnRole, ExportFormat, PortfolioAnalyzer, SummaryReport, normalize, write_report};

#[test]
fn public_api_covers_the_analysis_workflow() {
    let table = df!(
        "Market Value" => [100.0, 50.0],
        "Issuer Sector" => ["Govt", "Corp"],
        "2Y" => [0.1, 0.2],
    )
    .unwrap();
    let table = normalize(table).unwrap();
    assert_eq!(
        tenor::primary_column(&table, ColumnRole::Sector).as_deref(),
        Some("Issuer Sector")
    );

    let analyzer = PortfolioAnalyzer::new(table, "Smoke Portfolio").unwrap();
    assert_eq!(analyzer.positions(), 2);
    assert_eq!(analyzer.krd_profile().unwrap().len(), 1);

    let mut buffer = Vec::new();
    let report = SummaryReport::new(analyzer.summary().unwrap());
    write_report(&report, &mut buffer, ExportFormat::Csv).unwrap();
    assert!(!buffer.is_empty());
}
