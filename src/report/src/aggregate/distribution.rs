use itertools::Itertools;
use serde::Serialize;

/// Five-number summary plus sample size, ready for a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStats {
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxStats {
    /// `None` for an empty sample. Quantiles interpolate linearly between ranks.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted: Vec<f64> = values
            .iter()
            .copied()
            .sorted_by(|a, b| a.total_cmp(b))
            .collect();
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        Some(Self {
            n: sorted.len(),
            min,
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

/// Largest value, ignoring nothing but the absence of values.
pub fn peak(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions_sorted::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_empty_sample() {
        assert_eq!(BoxStats::from_values(&[]), None);
        assert_eq!(peak(Vec::new()), None);
    }

    #[test]
    fn test_single_value() {
        let stats = BoxStats::from_values(&[42.0]).unwrap();
        assert_eq!(
            stats,
            BoxStats {
                n: 1,
                min: 42.0,
                q1: 42.0,
                median: 42.0,
                q3: 42.0,
                max: 42.0
            }
        );
    }

    #[test]
    fn test_unsorted_input() {
        let stats = BoxStats::from_values(&[9.0, 1.0, 5.0, 3.0, 7.0]).unwrap();
        assert_eq!(
            stats,
            BoxStats {
                n: 5,
                min: 1.0,
                q1: 3.0,
                median: 5.0,
                q3: 7.0,
                max: 9.0
            }
        );
        assert_eq!(stats.iqr(), 4.0);
    }

    #[rstest]
    #[case::lower(0.25, 1.75)]
    #[case::median(0.5, 2.5)]
    #[case::upper(0.75, 3.25)]
    #[case::ends(1.0, 4.0)]
    fn test_interpolated_quantile(#[case] p: f64, #[case] expected: f64) {
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], p), expected);
    }

    #[test]
    fn test_peak() {
        assert_eq!(peak([50.0, 80.0]), Some(80.0));
        assert_eq!(peak([-3.0]), Some(-3.0));
    }
}
