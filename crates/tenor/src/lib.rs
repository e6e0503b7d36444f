#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenor/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use tenor_analytics::{
    AnalyticsError, COMPOSITE_RATING, DEFAULT_TOP_N, Distribution, DistributionEntry,
    DurationSummary, IssuerHolding, MaturityBucket, PortfolioAnalyzer, PortfolioSummary,
    RatingAgency, TenorContribution, derive_composite_rating,
};
pub use tenor_output::{
    DistributionReport, DurationReport, ExportError, ExportFormat, KrdReport, ReportTable,
    SummaryReport, TopHoldingsReport, write_combined_csv, write_report,
};
pub use tenor_table::{
    ColumnRole, TableError, find_columns, load_holdings, normalize, primary_column,
};

/// The tabular structure holdings are carried in.
pub use polars::prelude::DataFrame;
