//! The portfolio analytics engine.
//!
//! [`PortfolioAnalyzer`] owns one portfolio's holdings table and answers
//! independent, synchronous queries against it. Every weighted statistic
//! shares the same formula family: market-value-weighted sums over rows,
//! with nulls excluded from numerator and denominator.

use crate::distribution::{Distribution, DistributionEntry};
use crate::error::{AnalyticsError, Result};
use crate::maturity::MaturityBucket;
use crate::rating::{COMPOSITE_RATING, derive_composite_rating};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tenor_table::resolve::{
    ColumnRole, KRD_PREFIX, MARKET_VALUE, MATURITY, YIELD_TO_WORST, find_columns, primary_column,
    tenor_from_krd_column,
};

/// Default number of groups kept by [`PortfolioAnalyzer::categorical_breakdowns`]
/// and default length of [`PortfolioAnalyzer::top_holdings`].
pub const DEFAULT_TOP_N: usize = 10;

/// Verbose identifier columns excluded from generic categorical breakdowns.
const BREAKDOWN_EXCLUDED: [&str; 2] = ["Issuer Name", "Description"];

const DAYS_PER_YEAR: f64 = 365.0;

/// Headline statistics for one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Portfolio label.
    pub portfolio: String,

    /// Sum of market values over all positions.
    pub total_market_value: f64,

    /// Market-value-weighted yield to worst; `None` without a
    /// `Yield to Worst` column.
    pub weighted_yield_to_worst: Option<f64>,

    /// Mean years to maturity over positions with a parseable maturity
    /// date; `None` without a `Maturity` column. Matured positions count
    /// with negative years.
    pub average_maturity_years: Option<f64>,
}

/// Weighted duration for one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationSummary {
    /// Portfolio label.
    pub portfolio: String,

    /// Market-value-weighted duration; `None` when no column name
    /// contains "duration".
    pub weighted_duration: Option<f64>,
}

/// One issuer's aggregate position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuerHolding {
    /// Issuer label; `None` for positions with a missing issuer.
    pub issuer: Option<String>,

    /// Total market value across the issuer's positions.
    pub market_value: f64,
}

/// Portfolio-level weighted key-rate-duration contribution for one tenor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenorContribution {
    /// Tenor label, e.g. `2Y` or `6M`.
    pub tenor: String,

    /// Market-value-weighted KRD contribution.
    pub contribution: f64,
}

/// Analytics engine over one portfolio's holdings table.
///
/// The analyzer takes ownership of its table at construction and never
/// mutates it afterwards; the composite rating is derived eagerly once
/// and held as a separate column. Queries are plain reads, so concurrent
/// portfolios run one analyzer each without interference.
#[derive(Debug, Clone)]
pub struct PortfolioAnalyzer {
    df: DataFrame,
    name: String,
    as_of: NaiveDate,
    rating_cols: Vec<String>,
    sector_col: Option<String>,
    issuer_col: Option<String>,
    currency_col: Option<String>,
    composite_rating: Option<Column>,
}

impl PortfolioAnalyzer {
    /// Build an analyzer over a holdings table.
    ///
    /// `Market Value` is coerced to `Float64` (non-numeric cells become
    /// null). The evaluation date defaults to today; pin it with
    /// [`Self::with_evaluation_date`].
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::MissingMarketValue`] when the table has no
    /// `Market Value` column; polars errors for a malformed table.
    pub fn new(df: DataFrame, name: impl Into<String>) -> Result<Self> {
        if df.get_column_index(MARKET_VALUE).is_none() {
            return Err(AnalyticsError::MissingMarketValue);
        }
        let df = df
            .lazy()
            .with_column(col(MARKET_VALUE).cast(DataType::Float64))
            .collect()?;

        let rating_cols = find_columns(&df, ColumnRole::Rating);
        let sector_col = primary_column(&df, ColumnRole::Sector);
        let issuer_col = primary_column(&df, ColumnRole::Issuer);
        let currency_col = primary_column(&df, ColumnRole::Currency);
        let composite_rating = if rating_cols.is_empty() {
            None
        } else {
            Some(derive_composite_rating(&df, &rating_cols)?)
        };

        Ok(Self {
            df,
            name: name.into(),
            as_of: Local::now().date_naive(),
            rating_cols,
            sector_col,
            issuer_col,
            currency_col,
            composite_rating,
        })
    }

    /// Pin the evaluation date used by maturity statistics.
    ///
    /// Maturity metrics measure distance from the evaluation date, so
    /// they drift as time passes; pinning makes them reproducible.
    pub fn with_evaluation_date(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Portfolio label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The evaluation date maturity statistics measure from.
    pub const fn evaluation_date(&self) -> NaiveDate {
        self.as_of
    }

    /// Number of positions in the table.
    pub fn positions(&self) -> usize {
        self.df.height()
    }

    /// All rating columns, in dataset order.
    pub fn rating_columns(&self) -> &[String] {
        &self.rating_cols
    }

    /// Primary sector column, if resolved.
    pub fn sector_column(&self) -> Option<&str> {
        self.sector_col.as_deref()
    }

    /// Primary issuer column, if resolved.
    pub fn issuer_column(&self) -> Option<&str> {
        self.issuer_col.as_deref()
    }

    /// Primary currency column, if resolved.
    pub fn currency_column(&self) -> Option<&str> {
        self.currency_col.as_deref()
    }

    /// The derived composite rating column; `None` without rating columns.
    pub const fn composite_rating(&self) -> Option<&Column> {
        self.composite_rating.as_ref()
    }

    /// Sum of market values over all positions. Nulls contribute nothing.
    pub fn total_market_value(&self) -> Result<f64> {
        Ok(self.market_values()?.sum().unwrap_or(0.0))
    }

    /// Headline statistics: total market value, weighted yield to worst,
    /// average maturity. Optional columns degrade to `None` fields.
    pub fn summary(&self) -> Result<PortfolioSummary> {
        let weighted_yield_to_worst = if self.has_column(YIELD_TO_WORST) {
            self.weighted_mean(YIELD_TO_WORST)?
        } else {
            None
        };
        Ok(PortfolioSummary {
            portfolio: self.name.clone(),
            total_market_value: self.total_market_value()?,
            weighted_yield_to_worst,
            average_maturity_years: self.average_maturity_years()?,
        })
    }

    /// Market-value-weighted duration. The duration column is located by
    /// case-insensitive substring match; absence yields a `None` field.
    pub fn duration(&self) -> Result<DurationSummary> {
        let weighted_duration = match self.duration_column() {
            Some(column) => self.weighted_mean(&column)?,
            None => None,
        };
        Ok(DurationSummary {
            portfolio: self.name.clone(),
            weighted_duration,
        })
    }

    /// Credit quality distribution over the composite rating.
    /// Label-ascending; empty when the table has no rating columns.
    pub fn credit_distribution(&self) -> Result<Distribution> {
        let Some(composite) = &self.composite_rating else {
            return Ok(Distribution::default());
        };
        let frame = DataFrame::new(vec![
            composite.clone(),
            self.df.column(MARKET_VALUE)?.clone(),
        ])?;
        let mut dist = weighted_distribution(&frame, COMPOSITE_RATING)?;
        dist.sort_by_label();
        Ok(dist)
    }

    /// One label-ascending distribution per individual rating column, in
    /// dataset column order, keyed by the original column name.
    pub fn rating_distributions(&self) -> Result<Vec<(String, Distribution)>> {
        let mut out = Vec::with_capacity(self.rating_cols.len());
        for column in &self.rating_cols {
            let mut dist = weighted_distribution(&self.df, column)?;
            dist.sort_by_label();
            out.push((column.clone(), dist));
        }
        Ok(out)
    }

    /// Sector exposure, descending by weight. Empty without a sector column.
    pub fn sector_exposure(&self) -> Result<Distribution> {
        self.primary_exposure(self.sector_col.as_deref())
    }

    /// Currency exposure, descending by weight. Empty without a currency column.
    pub fn currency_exposure(&self) -> Result<Distribution> {
        self.primary_exposure(self.currency_col.as_deref())
    }

    /// Weighted breakdown of every text column not otherwise handled,
    /// excluding verbose identifiers. Each distribution is descending by
    /// weight and truncated to `top_n`; results follow dataset column order.
    pub fn categorical_breakdowns(&self, top_n: usize) -> Result<Vec<(String, Distribution)>> {
        let mut out = Vec::new();
        for (name, dtype) in self.df.get_column_names().iter().zip(self.df.dtypes()) {
            if dtype != DataType::String {
                continue;
            }
            let name = name.as_str();
            if BREAKDOWN_EXCLUDED.contains(&name) {
                continue;
            }
            let mut dist = weighted_distribution(&self.df, name)?;
            dist.sort_by_weight_desc();
            dist.entries.truncate(top_n);
            out.push((name.to_string(), dist));
        }
        Ok(out)
    }

    /// The `n` largest issuers by total market value, descending.
    /// Empty when no issuer column resolves.
    pub fn top_holdings(&self, n: usize) -> Result<Vec<IssuerHolding>> {
        let Some(issuer_col) = self.issuer_col.as_deref() else {
            return Ok(Vec::new());
        };
        let grouped = self
            .df
            .clone()
            .lazy()
            .group_by([col(issuer_col).cast(DataType::String).alias("issuer")])
            .agg([col(MARKET_VALUE).sum().alias("market_value")])
            .collect()?;
        let issuers = grouped.column("issuer")?.str()?;
        let values = grouped.column("market_value")?.f64()?;

        let mut holdings: Vec<IssuerHolding> = issuers
            .into_iter()
            .zip(values)
            .map(|(issuer, market_value)| IssuerHolding {
                issuer: issuer.map(String::from),
                market_value: market_value.unwrap_or(0.0),
            })
            .collect();
        holdings.sort_by(|a, b| {
            b.market_value
                .partial_cmp(&a.market_value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.issuer.cmp(&b.issuer))
        });
        holdings.truncate(n);
        Ok(holdings)
    }

    /// Portfolio-level weighted KRD contribution per tenor, in dataset
    /// column order. Empty when no KRD contribution columns exist.
    pub fn krd_profile(&self) -> Result<Vec<TenorContribution>> {
        let krd_cols: Vec<String> = self
            .df
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .filter(|name| name.contains(KRD_PREFIX))
            .map(String::from)
            .collect();
        if krd_cols.is_empty() || self.total_market_value()? == 0.0 {
            return Ok(Vec::new());
        }

        let mut profile = Vec::with_capacity(krd_cols.len());
        for column in &krd_cols {
            let contribution = self.weighted_mean(column)?.unwrap_or(0.0);
            profile.push(TenorContribution {
                tenor: tenor_from_krd_column(column).to_string(),
                contribution,
            });
        }
        Ok(profile)
    }

    /// Weighted percentage distribution over the fixed maturity buckets,
    /// in bucket definition order (empty buckets report 0%).
    ///
    /// Already-matured positions (negative years to maturity) and rows
    /// with unparseable maturities are excluded from both numerator and
    /// denominator. Empty without a `Maturity` column.
    pub fn maturity_buckets(&self) -> Result<Distribution> {
        let Some(years) = self.years_to_maturity()? else {
            return Ok(Distribution::default());
        };
        let market_values = self.market_values()?;

        let mut sums = [0.0_f64; MaturityBucket::ALL.len()];
        let mut total = 0.0_f64;
        for (years, value) in years.iter().copied().zip(market_values) {
            let (Some(years), Some(value)) = (years, value) else {
                continue;
            };
            let Some(bucket) = MaturityBucket::from_years(years) else {
                continue;
            };
            sums[bucket.index()] += value;
            total += value;
        }
        if total == 0.0 {
            return Ok(Distribution::default());
        }

        let entries = MaturityBucket::ALL
            .iter()
            .map(|bucket| DistributionEntry {
                label: Some(bucket.label().to_string()),
                weight_pct: sums[bucket.index()] / total * 100.0,
            })
            .collect();
        Ok(Distribution { entries })
    }

    fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    fn market_values(&self) -> Result<&Float64Chunked> {
        Ok(self.df.column(MARKET_VALUE)?.f64()?)
    }

    fn duration_column(&self) -> Option<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .find(|name| name.to_lowercase().contains("duration"))
            .map(String::from)
    }

    /// `sum(value · mv) / sum(mv)`. Rows where the value is null drop out
    /// of the numerator only; `None` when total market value is zero.
    fn weighted_mean(&self, value_col: &str) -> Result<Option<f64>> {
        let out = self
            .df
            .clone()
            .lazy()
            .select([
                (col(value_col).cast(DataType::Float64) * col(MARKET_VALUE))
                    .sum()
                    .alias("weighted"),
                col(MARKET_VALUE).sum().alias("total"),
            ])
            .collect()?;
        let weighted = out.column("weighted")?.f64()?.get(0);
        let total = out.column("total")?.f64()?.get(0);
        Ok(match (weighted, total) {
            (Some(weighted), Some(total)) if total != 0.0 => Some(weighted / total),
            _ => None,
        })
    }

    fn primary_exposure(&self, key_col: Option<&str>) -> Result<Distribution> {
        let Some(key_col) = key_col else {
            return Ok(Distribution::default());
        };
        let mut dist = weighted_distribution(&self.df, key_col)?;
        dist.sort_by_weight_desc();
        Ok(dist)
    }

    /// Years to maturity per row; `None` when the table has no `Maturity`
    /// column, null entries for unparseable dates.
    fn years_to_maturity(&self) -> Result<Option<Vec<Option<f64>>>> {
        let Ok(column) = self.df.column(MATURITY) else {
            return Ok(None);
        };
        let dates: Vec<Option<NaiveDate>> = match column.dtype() {
            DataType::Date | DataType::Datetime(_, _) => {
                let days = column.cast(&DataType::Date)?.cast(&DataType::Int32)?;
                let days = days.i32()?;
                days.into_iter()
                    .map(|days| days.and_then(date_from_epoch_days))
                    .collect()
            }
            _ => {
                let text = column.cast(&DataType::String)?;
                let text = text.str()?;
                text.into_iter()
                    .map(|value| value.and_then(parse_maturity_date))
                    .collect()
            }
        };
        Ok(Some(
            dates
                .into_iter()
                .map(|date| {
                    date.map(|date| {
                        date.signed_duration_since(self.as_of).num_days() as f64 / DAYS_PER_YEAR
                    })
                })
                .collect(),
        ))
    }

    fn average_maturity_years(&self) -> Result<Option<f64>> {
        let Some(years) = self.years_to_maturity()? else {
            return Ok(None);
        };
        let known: Vec<f64> = years.into_iter().flatten().collect();
        if known.is_empty() {
            return Ok(None);
        }
        Ok(Some(known.iter().sum::<f64>() / known.len() as f64))
    }
}

/// Group `df` by `key_col`, sum market value per group, and express each
/// group as a percentage of the grand total. A null key forms its own
/// group. The entry order is unspecified; callers sort.
fn weighted_distribution(df: &DataFrame, key_col: &str) -> Result<Distribution> {
    let grouped = df
        .clone()
        .lazy()
        .group_by([col(key_col).cast(DataType::String).alias("label")])
        .agg([col(MARKET_VALUE).sum().alias("weight")])
        .collect()?;
    let labels = grouped.column("label")?.str()?;
    let weights = grouped.column("weight")?.f64()?;

    let total: f64 = weights.into_iter().flatten().sum();
    if total == 0.0 {
        return Ok(Distribution::default());
    }
    let entries = labels
        .into_iter()
        .zip(weights)
        .map(|(label, weight)| DistributionEntry {
            label: label.map(String::from),
            weight_pct: weight.unwrap_or(0.0) / total * 100.0,
        })
        .collect();
    Ok(Distribution { entries })
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(i64::from(days))))
}

fn parse_maturity_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    None
}
