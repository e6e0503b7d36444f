//! Flat report tables built from engine results.
//!
//! Every report renders to the same shape downstream consumers expect:
//! a header row plus data records, with the portfolio label carried on
//! each record so combined multi-portfolio tables stay self-describing.

use serde::{Deserialize, Serialize};
use tenor_analytics::{
    Distribution, DistributionEntry, DurationSummary, IssuerHolding, PortfolioSummary,
    TenorContribution,
};

/// A report that renders as a flat table of text records.
pub trait ReportTable {
    /// Column titles, in order.
    fn header(&self) -> Vec<String>;

    /// Data records, in report order.
    fn records(&self) -> Vec<Vec<String>>;
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_label(label: &Option<String>) -> String {
    label.clone().unwrap_or_default()
}

/// Single-row report of a portfolio's headline statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// The summary being reported.
    pub summary: PortfolioSummary,
}

impl SummaryReport {
    /// Wrap an engine summary.
    pub const fn new(summary: PortfolioSummary) -> Self {
        Self { summary }
    }
}

impl ReportTable for SummaryReport {
    fn header(&self) -> Vec<String> {
        vec![
            "Portfolio".to_string(),
            "Total Market Value".to_string(),
            "Weighted Yield to Worst".to_string(),
            "Average Maturity (yrs)".to_string(),
        ]
    }

    fn records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.summary.portfolio.clone(),
            self.summary.total_market_value.to_string(),
            fmt_opt(self.summary.weighted_yield_to_worst),
            fmt_opt(self.summary.average_maturity_years),
        ]]
    }
}

/// Single-row report of a portfolio's weighted duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationReport {
    /// The duration summary being reported.
    pub duration: DurationSummary,
}

impl DurationReport {
    /// Wrap an engine duration summary.
    pub const fn new(duration: DurationSummary) -> Self {
        Self { duration }
    }
}

impl ReportTable for DurationReport {
    fn header(&self) -> Vec<String> {
        vec!["Portfolio".to_string(), "Weighted Duration".to_string()]
    }

    fn records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.duration.portfolio.clone(),
            fmt_opt(self.duration.weighted_duration),
        ]]
    }
}

/// A weighted distribution as a flat table: key, percentage, portfolio.
///
/// `key_title` names the key column in the rendered table (`Rating`,
/// `Sector`, `Currency`, ...). Entry order is taken from the engine and
/// preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Title of the key column.
    pub key_title: String,

    /// Portfolio label stamped on every record.
    pub portfolio: String,

    /// Distribution groups in report order.
    pub entries: Vec<DistributionEntry>,
}

impl DistributionReport {
    /// Build from an engine distribution, preserving its ordering.
    pub fn new(
        key_title: impl Into<String>,
        portfolio: impl Into<String>,
        distribution: Distribution,
    ) -> Self {
        Self {
            key_title: key_title.into(),
            portfolio: portfolio.into(),
            entries: distribution.entries,
        }
    }
}

impl ReportTable for DistributionReport {
    fn header(&self) -> Vec<String> {
        vec![
            self.key_title.clone(),
            "Market Value %".to_string(),
            "Portfolio".to_string(),
        ]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|entry| {
                vec![
                    fmt_label(&entry.label),
                    entry.weight_pct.to_string(),
                    self.portfolio.clone(),
                ]
            })
            .collect()
    }
}

/// Top holdings as a flat table: issuer, market value, portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHoldingsReport {
    /// Portfolio label stamped on every record.
    pub portfolio: String,

    /// Issuer aggregates, largest first.
    pub holdings: Vec<IssuerHolding>,
}

impl TopHoldingsReport {
    /// Build from engine top holdings.
    pub fn new(portfolio: impl Into<String>, holdings: Vec<IssuerHolding>) -> Self {
        Self {
            portfolio: portfolio.into(),
            holdings,
        }
    }
}

impl ReportTable for TopHoldingsReport {
    fn header(&self) -> Vec<String> {
        vec![
            "Issuer".to_string(),
            "Market Value".to_string(),
            "Portfolio".to_string(),
        ]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.holdings
            .iter()
            .map(|holding| {
                vec![
                    fmt_label(&holding.issuer),
                    holding.market_value.to_string(),
                    self.portfolio.clone(),
                ]
            })
            .collect()
    }
}

/// KRD profile as a flat table: tenor, contribution, portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KrdReport {
    /// Portfolio label stamped on every record.
    pub portfolio: String,

    /// Weighted contributions in tenor column order.
    pub profile: Vec<TenorContribution>,
}

impl KrdReport {
    /// Build from an engine KRD profile.
    pub fn new(portfolio: impl Into<String>, profile: Vec<TenorContribution>) -> Self {
        Self {
            portfolio: portfolio.into(),
            profile,
        }
    }
}

impl ReportTable for KrdReport {
    fn header(&self) -> Vec<String> {
        vec![
            "Tenor".to_string(),
            "Contribution".to_string(),
            "Portfolio".to_string(),
        ]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.profile
            .iter()
            .map(|tenor| {
                vec![
                    tenor.tenor.clone(),
                    tenor.contribution.to_string(),
                    self.portfolio.clone(),
                ]
            })
            .collect()
    }
}
