//! Integration tests: engine results through report construction to export.

use approx::assert_relative_eq;
use polars::df;
use tenor_analytics::PortfolioAnalyzer;
use tenor_output::{
    DistributionReport, ExportFormat, KrdReport, ReportTable, SummaryReport, TopHoldingsReport,
    write_combined_csv, write_report,
};

fn sample_analyzer(name: &str) -> PortfolioAnalyzer {
    let df = df!(
        "Market Value" => [100.0, 50.0, 30.0],
        "Issuer Name" => ["Acme", "Acme", "Zeta"],
        "Issuer Sector" => ["Corp", "Corp", "Govt"],
        "Fitch Rating" => ["AA", "A", "AA"],
        "KRD Contribution 2Y" => [0.10, 0.20, 0.05],
    )
    .unwrap();
    PortfolioAnalyzer::new(df, name).unwrap()
}

#[test]
fn full_report_workflow() {
    let analyzer = sample_analyzer("USD Portfolio");

    let summary = SummaryReport::new(analyzer.summary().unwrap());
    let mut buffer = Vec::new();
    write_report(&summary, &mut buffer, ExportFormat::Csv).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("Portfolio,Total Market Value,"));
    assert!(text.contains("USD Portfolio,180"));

    let credit_dist = analyzer.credit_distribution().unwrap();
    assert_relative_eq!(credit_dist.total_pct(), 100.0, epsilon = 1e-9);
    let credit = DistributionReport::new("Rating", analyzer.name(), credit_dist);
    assert_eq!(credit.records().len(), 2);

    let holdings = TopHoldingsReport::new(analyzer.name(), analyzer.top_holdings(10).unwrap());
    let records = holdings.records();
    assert_eq!(records[0][0], "Acme");
    assert_eq!(records[0][1], "150");

    let krd = KrdReport::new(analyzer.name(), analyzer.krd_profile().unwrap());
    assert_eq!(krd.records().len(), 1);
    assert_eq!(krd.records()[0][0], "2Y");
}

#[test]
fn combined_reports_concatenate_portfolios() {
    let usd = sample_analyzer("USD Portfolio");
    let eur = sample_analyzer("EUR Portfolio");

    let reports: Vec<DistributionReport> = [&usd, &eur]
        .iter()
        .map(|analyzer| {
            DistributionReport::new(
                "Sector",
                analyzer.name(),
                analyzer.sector_exposure().unwrap(),
            )
        })
        .collect();

    let mut buffer = Vec::new();
    write_combined_csv(&reports, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Sector,Market Value %,Portfolio");
    assert_eq!(lines.len(), 5);
    assert!(lines[1].ends_with("USD Portfolio"));
    assert!(lines[3].ends_with("EUR Portfolio"));
}

#[test]
fn pretty_json_is_parseable() {
    let analyzer = sample_analyzer("USD Portfolio");
    let report = DistributionReport::new(
        "Rating",
        analyzer.name(),
        analyzer.credit_distribution().unwrap(),
    );
    let mut buffer = Vec::new();
    write_report(&report, &mut buffer, ExportFormat::PrettyJson).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["key_title"], "Rating");
    assert_eq!(value["entries"].as_array().unwrap().len(), 2);
}
