//! Fixed maturity buckets.

use std::fmt;

/// Maturity buckets over years-to-maturity. Half-open, lower-inclusive;
/// the last bucket is unbounded above. Negative years-to-maturity
/// (already-matured positions) fall outside every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaturityBucket {
    /// [0, 3) years
    UpTo3y,

    /// [3, 5) years
    From3To5y,

    /// [5, 10) years
    From5To10y,

    /// [10, 30) years
    From10To30y,

    /// [30, ∞) years
    Beyond30y,
}

impl MaturityBucket {
    /// All buckets in definition order.
    pub const ALL: [Self; 5] = [
        Self::UpTo3y,
        Self::From3To5y,
        Self::From5To10y,
        Self::From10To30y,
        Self::Beyond30y,
    ];

    /// Report label for this bucket.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UpTo3y => "0-3y",
            Self::From3To5y => "3-5y",
            Self::From5To10y => "5-10y",
            Self::From10To30y => "10-30y",
            Self::Beyond30y => "30y+",
        }
    }

    /// Position of this bucket in [`Self::ALL`].
    pub const fn index(&self) -> usize {
        match self {
            Self::UpTo3y => 0,
            Self::From3To5y => 1,
            Self::From5To10y => 2,
            Self::From10To30y => 3,
            Self::Beyond30y => 4,
        }
    }

    /// Bucket a years-to-maturity value. Negative and NaN values have no bucket.
    pub fn from_years(years: f64) -> Option<Self> {
        if years.is_nan() || years < 0.0 {
            return None;
        }
        if years < 3.0 {
            Some(Self::UpTo3y)
        } else if years < 5.0 {
            Some(Self::From3To5y)
        } else if years < 10.0 {
            Some(Self::From5To10y)
        } else if years < 30.0 {
            Some(Self::From10To30y)
        } else {
            Some(Self::Beyond30y)
        }
    }
}

impl fmt::Display for MaturityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Some(MaturityBucket::UpTo3y))]
    #[case(2.9, Some(MaturityBucket::UpTo3y))]
    #[case(3.0, Some(MaturityBucket::From3To5y))]
    #[case(5.0, Some(MaturityBucket::From5To10y))]
    #[case(10.0, Some(MaturityBucket::From10To30y))]
    #[case(29.99, Some(MaturityBucket::From10To30y))]
    #[case(30.0, Some(MaturityBucket::Beyond30y))]
    #[case(120.0, Some(MaturityBucket::Beyond30y))]
    #[case(-0.5, None)]
    #[case(f64::NAN, None)]
    fn bucket_boundaries_are_lower_inclusive(
        #[case] years: f64,
        #[case] expected: Option<MaturityBucket>,
    ) {
        assert_eq!(MaturityBucket::from_years(years), expected);
    }

    #[test]
    fn all_is_in_definition_order() {
        let labels: Vec<&str> = MaturityBucket::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["0-3y", "3-5y", "5-10y", "10-30y", "30y+"]);
        for (i, bucket) in MaturityBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), i);
        }
    }
}
