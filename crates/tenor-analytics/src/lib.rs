#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenor/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analyzer;
pub mod distribution;
pub mod error;
pub mod maturity;
pub mod rating;

pub use analyzer::{
    DEFAULT_TOP_N, DurationSummary, IssuerHolding, PortfolioAnalyzer, PortfolioSummary,
    TenorContribution,
};
pub use distribution::{Distribution, DistributionEntry};
pub use error::{AnalyticsError, Result};
pub use maturity::MaturityBucket;
pub use rating::{COMPOSITE_RATING, RatingAgency, derive_composite_rating};
