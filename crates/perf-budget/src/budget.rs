//! Budget evaluation
//!
//! Every attempt is checked on its own, so a slow cold start and a borderline
//! warm run surface as separate breaches. Unavailable values are never
//! evaluated.
//!
//! # Example
//!
//! ```
//! use perf_budget::budget::BudgetEvaluator;
//! use perf_budget::config::Thresholds;
//! use perf_budget::metrics::Sample;
//!
//! # fn example(thresholds: Thresholds) {
//! let mut cold = Sample::new(0);
//! cold.timings.ttfb = Some(500.0);
//! let mut warm = Sample::new(1);
//! warm.timings.ttfb = Some(650.0);
//!
//! let breaches = BudgetEvaluator::new(&thresholds).collect_breaches(&[cold, warm]);
//! for breach in &breaches {
//!     println!("{}", breach);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Thresholds;
use crate::metrics::{Direction, Metric, Sample};

/// One attempt's metric on the wrong side of its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    pub run_label: String,
    pub attempt: u32,
    pub metric: Metric,
    pub observed: f64,
    pub threshold: f64,
    pub direction: Direction,
}

impl Breach {
    /// How far the observed value is past the threshold, always positive.
    pub fn amount(&self) -> f64 {
        match self.direction {
            Direction::LowerIsBetter => self.observed - self.threshold,
            Direction::HigherIsBetter => self.threshold - self.observed,
        }
    }
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.direction {
            Direction::LowerIsBetter => "exceeds",
            Direction::HigherIsBetter => "is below",
        };
        write!(
            f,
            "{}: {} {} {} budget {} {} by {}",
            self.run_label,
            self.metric.label(),
            self.metric.format(self.observed),
            verb,
            self.direction.symbol(),
            self.metric.format(self.threshold),
            self.metric.format(self.amount()),
        )
    }
}

/// Checks samples against one scenario's resolved thresholds.
#[derive(Debug, Clone)]
pub struct BudgetEvaluator<'a> {
    thresholds: &'a Thresholds,
    cold_ttfb: Option<f64>,
}

impl<'a> BudgetEvaluator<'a> {
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self {
            thresholds,
            cold_ttfb: None,
        }
    }

    /// Evaluate the cold attempt's TTFB against `budget` instead of the
    /// regular TTFB threshold.
    pub fn with_cold_ttfb(mut self, budget: f64) -> Self {
        self.cold_ttfb = Some(budget);
        self
    }

    /// The bound `sample`'s value of `metric` is checked against.
    pub fn threshold_for(&self, metric: Metric, sample: &Sample) -> Option<f64> {
        match (metric, self.cold_ttfb) {
            (Metric::Ttfb, Some(cold)) if sample.is_cold() => Some(cold),
            _ => metric.threshold(self.thresholds),
        }
    }

    /// Breaches of a single sample, in catalogue order.
    pub fn evaluate_sample(&self, sample: &Sample) -> Vec<Breach> {
        Metric::ALL
            .iter()
            .filter_map(|&metric| {
                let observed = metric.value(sample)?;
                let threshold = self.threshold_for(metric, sample)?;
                let direction = metric.direction();
                if direction.within(observed, threshold) {
                    return None;
                }
                Some(Breach {
                    run_label: sample.run_label.clone(),
                    attempt: sample.attempt,
                    metric,
                    observed,
                    threshold,
                    direction,
                })
            })
            .collect()
    }

    /// Breaches of every sample, sample by sample.
    pub fn collect_breaches(&self, samples: &[Sample]) -> Vec<Breach> {
        samples
            .iter()
            .flat_map(|sample| self.evaluate_sample(sample))
            .collect()
    }
}
