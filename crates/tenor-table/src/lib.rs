#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenor/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod ingest;
pub mod resolve;

pub use error::{Result, TableError};
pub use ingest::{load_holdings, normalize};
pub use resolve::{
    ColumnRole, KRD_PREFIX, MARKET_VALUE, MATURITY, YIELD_TO_WORST, find_columns, is_tenor_label,
    krd_column_name, primary_column, tenor_from_krd_column,
};
