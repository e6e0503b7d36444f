//! Composite credit rating construction.
//!
//! Multiple agency rating columns may coexist on one holdings table. The
//! composite rating picks, per position, the first non-missing value in
//! fixed agency priority order; within one agency, the first matching
//! column in dataset order wins.

use crate::error::Result;
use polars::prelude::*;

/// Name of the derived composite rating column.
pub const COMPOSITE_RATING: &str = "Composite Rating";

/// Rating agencies recognized in rating column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingAgency {
    /// Fitch Ratings
    Fitch,

    /// Moody's
    Moody,

    /// S&P Global Ratings
    SAndP,

    /// MSCI ESG Ratings
    Msci,
}

impl RatingAgency {
    /// Agencies in composite priority order. Fixed and total.
    pub const PRIORITY: [Self; 4] = [Self::Fitch, Self::Moody, Self::SAndP, Self::Msci];

    /// Substring identifying this agency in a column name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fitch => "Fitch",
            Self::Moody => "Moody",
            Self::SAndP => "S&P",
            Self::Msci => "MSCI",
        }
    }

    /// Whether a column name refers to this agency (case-insensitive).
    pub fn matches_column(&self, column: &str) -> bool {
        column.to_lowercase().contains(&self.name().to_lowercase())
    }
}

/// Derive the composite rating column for a holdings table.
///
/// `rating_cols` lists all rating columns in dataset order. Per row, the
/// agencies are walked in [`RatingAgency::PRIORITY`] order and the first
/// non-null value from a matching column is taken; a row with no value
/// from any agency stays null. Pure: the input table is not modified.
pub fn derive_composite_rating(df: &DataFrame, rating_cols: &[String]) -> Result<Column> {
    let columns: Vec<Column> = rating_cols
        .iter()
        .map(|name| df.column(name)?.cast(&DataType::String))
        .collect::<PolarsResult<_>>()?;
    let values: Vec<&StringChunked> = columns
        .iter()
        .map(|column| column.str())
        .collect::<PolarsResult<_>>()?;

    // Column scan order per agency, resolved once.
    let agency_order: Vec<Vec<usize>> = RatingAgency::PRIORITY
        .iter()
        .map(|agency| {
            rating_cols
                .iter()
                .enumerate()
                .filter(|(_, name)| agency.matches_column(name))
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();

    let composite: Vec<Option<&str>> = (0..df.height())
        .map(|row| {
            agency_order
                .iter()
                .flat_map(|cols| cols.iter())
                .find_map(|&idx| values[idx].get(row))
        })
        .collect();

    Ok(Series::new(COMPOSITE_RATING.into(), composite).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn priority_order_is_fitch_first() {
        assert_eq!(
            RatingAgency::PRIORITY,
            [
                RatingAgency::Fitch,
                RatingAgency::Moody,
                RatingAgency::SAndP,
                RatingAgency::Msci,
            ]
        );
    }

    #[test]
    fn agency_matching_is_case_insensitive() {
        assert!(RatingAgency::SAndP.matches_column("s&p rating"));
        assert!(RatingAgency::Moody.matches_column("Moody's Rating"));
        assert!(!RatingAgency::Fitch.matches_column("S&P Rating"));
    }

    #[test]
    fn fitch_wins_over_sandp_regardless_of_column_order() {
        let df = df!(
            "S&P Rating" => [Some("A")],
            "Fitch Rating" => [Some("AA")],
            "Moody Rating" => [None::<&str>],
        )
        .unwrap();
        let cols = vec![
            "S&P Rating".to_string(),
            "Fitch Rating".to_string(),
            "Moody Rating".to_string(),
        ];
        let composite = derive_composite_rating(&df, &cols).unwrap();
        assert_eq!(composite.str().unwrap().get(0), Some("AA"));
    }

    #[test]
    fn falls_through_missing_agencies() {
        let df = df!(
            "Fitch Rating" => [None::<&str>, None::<&str>],
            "S&P Rating" => [Some("BBB"), None::<&str>],
        )
        .unwrap();
        let cols = vec!["Fitch Rating".to_string(), "S&P Rating".to_string()];
        let composite = derive_composite_rating(&df, &cols).unwrap();
        let composite = composite.str().unwrap();
        assert_eq!(composite.get(0), Some("BBB"));
        assert_eq!(composite.get(1), None);
    }

    #[test]
    fn first_matching_column_wins_within_an_agency() {
        let df = df!(
            "Fitch Rating" => [Some("AA")],
            "Fitch Underlying Rating" => [Some("A")],
        )
        .unwrap();
        let cols = vec![
            "Fitch Rating".to_string(),
            "Fitch Underlying Rating".to_string(),
        ];
        let composite = derive_composite_rating(&df, &cols).unwrap();
        assert_eq!(composite.str().unwrap().get(0), Some("AA"));
    }
}
