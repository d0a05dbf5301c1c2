//! Per-scenario aggregation of samples.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::numeric::NumericSummary;
use crate::metrics::sample::SLOW_RESOURCE_LIMIT;
use crate::metrics::{Metric, Sample, SlowResource};

/// Aggregated view of all attempts of one scenario.
///
/// A metric with no available value in any attempt has no entry, so absence
/// stays distinguishable from a zero reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub metrics: BTreeMap<Metric, NumericSummary>,
    /// Slowest resources over all attempts, longest first
    pub slowest_resources: Vec<SlowResource>,
    pub runs: usize,
}

impl ScenarioSummary {
    pub fn compute(samples: &[Sample]) -> Self {
        let metrics = Metric::ALL
            .iter()
            .filter_map(|&metric| {
                let values: Vec<f64> = samples.iter().filter_map(|s| metric.value(s)).collect();
                NumericSummary::from_values(&values).map(|summary| (metric, summary))
            })
            .collect();

        let mut slowest_resources: Vec<SlowResource> = samples
            .iter()
            .flat_map(|s| s.slowest_resources.iter().cloned())
            .collect();
        slowest_resources.sort_by(|a, b| b.entry.duration.total_cmp(&a.entry.duration));
        slowest_resources.truncate(SLOW_RESOURCE_LIMIT);

        Self {
            metrics,
            slowest_resources,
            runs: samples.len(),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<&NumericSummary> {
        self.metrics.get(&metric)
    }

    /// The least favourable observed value of `metric`.
    pub fn worst(&self, metric: Metric) -> Option<f64> {
        self.get(metric).map(|s| s.worst(metric.direction()))
    }

    pub fn average(&self, metric: Metric) -> Option<f64> {
        self.get(metric).map(|s| s.average)
    }
}
