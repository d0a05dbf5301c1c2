//! Descriptive statistics over one metric's values.

use serde::{Deserialize, Serialize};

use crate::metrics::Direction;

/// Average, median, spread and extremes of one metric across attempts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub standard_deviation: f64,
    pub count: usize,
}

impl NumericSummary {
    /// Summarize `values`, or `None` when there is nothing to summarize.
    ///
    /// The median of an even count is the mean of the two central values.
    ///
    /// ```
    /// use perf_budget::stats::NumericSummary;
    ///
    /// let summary = NumericSummary::from_values(&[100.0, 300.0, 500.0, 700.0]).unwrap();
    /// assert_eq!(summary.median, 400.0);
    /// assert_eq!(summary.average, 400.0);
    /// ```
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let average = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|&x| (x - average).powi(2)).sum::<f64>() / count as f64;

        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(NumericSummary {
            average,
            median,
            min: sorted[0],
            max: sorted[count - 1],
            standard_deviation: variance.sqrt(),
            count,
        })
    }

    /// The least favourable value for a metric with the given direction.
    pub fn worst(&self, direction: Direction) -> f64 {
        match direction {
            Direction::LowerIsBetter => self.max,
            Direction::HigherIsBetter => self.min,
        }
    }
}
