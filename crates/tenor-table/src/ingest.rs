//! Loading and normalizing cleaned holdings files.
//!
//! The upstream cleaning step hands over a flat CSV with one row per bond
//! position. Normalization settles the naming conventions the analytics
//! engine relies on: trimmed column names, `KRD Contribution <tenor>`
//! columns for bare tenor labels, and a `Date`-typed maturity column.

use crate::error::Result;
use crate::resolve::{MATURITY, is_tenor_label, krd_column_name};
use polars::prelude::*;
use std::path::Path;

/// Read a cleaned holdings CSV into a `DataFrame`.
///
/// The file must carry a header row; column types are inferred. This is not
/// a spreadsheet parser; raw workbook layouts are cleaned upstream.
pub fn load_holdings(path: impl AsRef<Path>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(500))
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Normalize a holdings table's column naming and maturity dtype.
///
/// - trims surrounding whitespace from every column name;
/// - renames bare tenor columns (`2Y`, `6M`, ...) to `KRD Contribution <tenor>`;
/// - parses a string-typed `Maturity` column to the `Date` dtype, turning
///   unparseable cells into nulls.
pub fn normalize(mut df: DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in &names {
        let trimmed = name.trim();
        if trimmed != name {
            df.rename(name, trimmed.into())?;
        }
    }

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in &names {
        if is_tenor_label(name) {
            df.rename(name, krd_column_name(name).into())?;
        }
    }

    let maturity_is_text = df
        .column(MATURITY)
        .map(|column| matches!(column.dtype(), DataType::String))
        .unwrap_or(false);
    if maturity_is_text {
        df = df
            .lazy()
            .with_column(col(MATURITY).cast(DataType::Date))
            .collect()?;
    }

    Ok(df)
}
