//! Error types for holdings table operations.

use thiserror::Error;

/// Result type for holdings table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while loading or normalizing a holdings table.
#[derive(Debug, Error)]
pub enum TableError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
