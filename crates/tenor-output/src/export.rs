//! Report serialization to CSV and JSON writers.
//!
//! Writers are injected by the caller; this module never opens files or
//! decides names. CSV output carries the report's own header row, JSON
//! output mirrors the report structure.

use crate::report::ReportTable;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reports with different headers cannot be combined.
    #[error("report shape mismatch: expected columns {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Header of the first report.
        expected: Vec<String>,
        /// The differing header.
        found: Vec<String>,
    },
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Write one report in the requested format.
pub fn write_report<W, R>(report: &R, writer: W, format: ExportFormat) -> Result<(), ExportError>
where
    W: Write,
    R: ReportTable + Serialize,
{
    match format {
        ExportFormat::Csv => write_csv(&report.header(), &report.records(), writer),
        ExportFormat::Json => Ok(serde_json::to_writer(writer, report)?),
        ExportFormat::PrettyJson => Ok(serde_json::to_writer_pretty(writer, report)?),
    }
}

fn write_csv<W: Write>(
    header: &[String],
    records: &[Vec<String>],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header)?;
    for record in records {
        csv_writer.write_record(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Concatenate same-shaped reports into one CSV table.
///
/// The combined table carries the first report's header followed by every
/// report's records in input order; a header mismatch is an error. An
/// empty report list writes nothing.
pub fn write_combined_csv<W, R>(reports: &[R], writer: W) -> Result<(), ExportError>
where
    W: Write,
    R: ReportTable,
{
    let Some(first) = reports.first() else {
        return Ok(());
    };
    let header = first.header();
    for report in reports {
        let found = report.header();
        if found != header {
            return Err(ExportError::ShapeMismatch {
                expected: header.clone(),
                found,
            });
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&header)?;
    for report in reports {
        for record in report.records() {
            csv_writer.write_record(&record)?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DistributionReport;
    use tenor_analytics::{Distribution, DistributionEntry};

    fn sample_report(portfolio: &str, label: &str, pct: f64) -> DistributionReport {
        DistributionReport::new(
            "Sector",
            portfolio,
            Distribution {
                entries: vec![DistributionEntry {
                    label: Some(label.to_string()),
                    weight_pct: pct,
                }],
            },
        )
    }

    #[test]
    fn csv_export_has_header_and_records() {
        let report = sample_report("USD Portfolio", "Govt", 62.5);
        let mut buffer = Vec::new();
        write_report(&report, &mut buffer, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "Sector,Market Value %,Portfolio\nGovt,62.5,USD Portfolio\n"
        );
    }

    #[test]
    fn json_export_round_trips() {
        let report = sample_report("USD Portfolio", "Govt", 62.5);
        let mut buffer = Vec::new();
        write_report(&report, &mut buffer, ExportFormat::Json).unwrap();
        let parsed: DistributionReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn combined_csv_concatenates_in_order() {
        let reports = vec![
            sample_report("USD Portfolio", "Govt", 62.5),
            sample_report("EUR Portfolio", "Corp", 100.0),
        ];
        let mut buffer = Vec::new();
        write_combined_csv(&reports, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "Sector,Market Value %,Portfolio\n\
             Govt,62.5,USD Portfolio\n\
             Corp,100,EUR Portfolio\n"
        );
    }

    #[test]
    fn combining_mismatched_shapes_fails() {
        let sector = sample_report("USD Portfolio", "Govt", 62.5);
        let mut rating = sample_report("USD Portfolio", "AA", 100.0);
        rating.key_title = "Rating".to_string();
        let result = write_combined_csv(&[sector, rating], Vec::new());
        assert!(matches!(result, Err(ExportError::ShapeMismatch { .. })));
    }

    #[rstest::rstest]
    #[case(ExportFormat::Csv, "csv")]
    #[case(ExportFormat::Json, "json")]
    #[case(ExportFormat::PrettyJson, "json")]
    fn extension_matches_format(#[case] format: ExportFormat, #[case] expected: &str) {
        assert_eq!(format.extension(), expected);
    }
}
