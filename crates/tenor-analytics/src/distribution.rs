//! Market-value-weighted percentage distributions.

use serde::{Deserialize, Serialize};

/// One group of a weighted distribution.
///
/// `label` is `None` when the grouping key was missing for the group's
/// rows; a missing key forms its own group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    /// Group label, `None` for the missing-key group.
    pub label: Option<String>,

    /// The group's share of portfolio market value, in percent.
    pub weight_pct: f64,
}

/// An ordered market-value-weighted percentage distribution.
///
/// Ordering is part of the contract: it drives the row order of the
/// consumer report and differs by query (label-ascending for credit
/// distributions, weight-descending for exposures).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Groups in report order.
    pub entries: Vec<DistributionEntry>,
}

impl Distribution {
    /// Whether the distribution has no groups.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all group percentages. 100 (within float tolerance) for any
    /// non-empty distribution.
    pub fn total_pct(&self) -> f64 {
        self.entries.iter().map(|entry| entry.weight_pct).sum()
    }

    /// The percentage for a given label, if that group exists.
    pub fn weight_of(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.label.as_deref() == Some(label))
            .map(|entry| entry.weight_pct)
    }

    /// Sort groups by label ascending; the missing-key group sorts first.
    pub fn sort_by_label(&mut self) {
        self.entries.sort_by(|a, b| a.label.cmp(&b.label));
    }

    /// Sort groups by percentage descending, label ascending on ties.
    pub fn sort_by_weight_desc(&mut self) {
        self.entries.sort_by(|a, b| {
            b.weight_pct
                .partial_cmp(&a.weight_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.label.cmp(&b.label))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(label: Option<&str>, weight_pct: f64) -> DistributionEntry {
        DistributionEntry {
            label: label.map(String::from),
            weight_pct,
        }
    }

    #[test]
    fn sort_by_label_puts_missing_group_first() {
        let mut dist = Distribution {
            entries: vec![entry(Some("BBB"), 30.0), entry(None, 10.0), entry(Some("AA"), 60.0)],
        };
        dist.sort_by_label();
        let labels: Vec<Option<&str>> =
            dist.entries.iter().map(|e| e.label.as_deref()).collect();
        assert_eq!(labels, vec![None, Some("AA"), Some("BBB")]);
    }

    #[test]
    fn sort_by_weight_breaks_ties_by_label() {
        let mut dist = Distribution {
            entries: vec![entry(Some("EUR"), 20.0), entry(Some("USD"), 60.0), entry(Some("CHF"), 20.0)],
        };
        dist.sort_by_weight_desc();
        let labels: Vec<Option<&str>> =
            dist.entries.iter().map(|e| e.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("USD"), Some("CHF"), Some("EUR")]);
    }

    #[test]
    fn total_pct_sums_entries() {
        let dist = Distribution {
            entries: vec![entry(Some("A"), 62.5), entry(Some("B"), 37.5)],
        };
        assert_relative_eq!(dist.total_pct(), 100.0);
        assert_eq!(dist.weight_of("B"), Some(37.5));
        assert_eq!(dist.weight_of("C"), None);
    }
}
