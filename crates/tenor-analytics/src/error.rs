//! Error types for portfolio analytics.

use thiserror::Error;

/// Result type for portfolio analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur while analyzing a holdings table.
///
/// Absence of an optional column is never an error: those queries return
/// empty distributions or `None` fields instead.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The holdings table carries no `Market Value` column at all.
    #[error("holdings table has no Market Value column")]
    MissingMarketValue,

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
