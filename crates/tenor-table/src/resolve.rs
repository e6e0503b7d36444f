//! Column naming conventions and semantic role resolution.
//!
//! Holdings files arrive without a fixed schema; the relevant columns are
//! discovered by case-insensitive substring matching against a small alias
//! set per semantic role. Resolution is pure: it never fails, and an absent
//! role is a valid outcome the consumer must handle.

use polars::prelude::DataFrame;

/// Name of the market value column. The only column a holdings table must have.
pub const MARKET_VALUE: &str = "Market Value";

/// Name of the yield-to-worst column, when present.
pub const YIELD_TO_WORST: &str = "Yield to Worst";

/// Name of the maturity date column, when present.
pub const MATURITY: &str = "Maturity";

/// Prefix used for key-rate-duration contribution columns after normalization.
pub const KRD_PREFIX: &str = "KRD Contribution";

/// Semantic column roles resolved by alias matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Credit rating columns; all matches are retained (agencies coexist).
    Rating,

    /// Sector or industry classification.
    Sector,

    /// Issuer or security identification.
    Issuer,

    /// Denomination currency.
    Currency,
}

impl ColumnRole {
    /// Alias candidates for this role, matched case-insensitively as substrings.
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Rating => &["Rating", "Composite Rating", "Moody", "S&P", "Fitch", "MSCI"],
            Self::Sector => &["Sector", "Issuer Sector", "Industry", "GICS Sector"],
            Self::Issuer => &["Issuer Name", "Issuer", "Security Name", "Description", "Ticker"],
            Self::Currency => &["Currency", "Ccy", "Base Currency", "Trade Currency"],
        }
    }

    /// Whether a column name matches this role.
    pub fn matches(&self, column: &str) -> bool {
        let column = column.to_lowercase();
        self.aliases()
            .iter()
            .any(|alias| column.contains(&alias.to_lowercase()))
    }
}

/// All column names matching a role, preserving dataset column order.
pub fn find_columns(df: &DataFrame, role: ColumnRole) -> Vec<String> {
    df.get_column_names()
        .iter()
        .filter(|name| role.matches(name.as_str()))
        .map(|name| name.to_string())
        .collect()
}

/// The primary (first-matching) column for a role, if any.
pub fn primary_column(df: &DataFrame, role: ColumnRole) -> Option<String> {
    find_columns(df, role).into_iter().next()
}

/// Whether a column name is a bare tenor label such as `6M` or `2Y`.
pub fn is_tenor_label(name: &str) -> bool {
    let Some(unit) = name.chars().last() else {
        return false;
    };
    if !matches!(unit, 'M' | 'Y') {
        return false;
    }
    let digits = &name[..name.len() - 1];
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// The normalized KRD contribution column name for a tenor label.
pub fn krd_column_name(tenor: &str) -> String {
    format!("{KRD_PREFIX} {tenor}")
}

/// Recover the tenor label from a KRD contribution column name.
pub fn tenor_from_krd_column(column: &str) -> &str {
    column
        .strip_prefix(KRD_PREFIX)
        .map(str::trim_start)
        .filter(|tenor| !tenor.is_empty())
        .unwrap_or(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use rstest::rstest;

    fn sample_frame() -> DataFrame {
        df!(
            "Security Name" => ["T 4.25 2030", "AAPL 3.0 2029"],
            "Market Value" => [100.0, 50.0],
            "S&P Rating" => ["AA", "A"],
            "Moody Rating" => ["Aa2", "A2"],
            "Issuer Sector" => ["Govt", "Tech"],
            "FX Currency Code" => ["USD", "USD"],
        )
        .unwrap()
    }

    #[test]
    fn rating_matches_all_agency_columns_in_order() {
        let df = sample_frame();
        let cols = find_columns(&df, ColumnRole::Rating);
        assert_eq!(cols, vec!["S&P Rating", "Moody Rating"]);
    }

    #[test]
    fn primary_column_takes_first_match() {
        let df = sample_frame();
        assert_eq!(
            primary_column(&df, ColumnRole::Issuer).as_deref(),
            Some("Security Name")
        );
        assert_eq!(
            primary_column(&df, ColumnRole::Currency).as_deref(),
            Some("FX Currency Code")
        );
    }

    #[test]
    fn missing_role_resolves_to_none() {
        let df = df!("Market Value" => [1.0]).unwrap();
        assert!(find_columns(&df, ColumnRole::Rating).is_empty());
        assert_eq!(primary_column(&df, ColumnRole::Sector), None);
    }

    #[rstest]
    #[case("2Y", true)]
    #[case("6M", true)]
    #[case("30Y", true)]
    #[case("Y", false)]
    #[case("2y", false)]
    #[case("2X", false)]
    #[case("2Y KRD", false)]
    #[case("", false)]
    fn tenor_label_pattern(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_tenor_label(name), expected);
    }

    #[test]
    fn krd_column_round_trip() {
        let column = krd_column_name("2Y");
        assert_eq!(column, "KRD Contribution 2Y");
        assert_eq!(tenor_from_krd_column(&column), "2Y");
    }

    #[test]
    fn tenor_from_unprefixed_column_falls_back_to_full_name() {
        assert_eq!(tenor_from_krd_column("Partial Duration 2Y"), "Partial Duration 2Y");
    }
}
