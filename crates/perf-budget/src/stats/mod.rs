//! Statistical reduction of repeated page loads
//!
//! Each metric is reduced to average, median, min, max and population
//! standard deviation over the attempts where it was available.
//!
//! # Examples
//!
//! ```
//! use perf_budget::metrics::{Metric, Sample};
//! use perf_budget::stats::ScenarioSummary;
//!
//! let mut cold = Sample::new(0);
//! cold.timings.ttfb = Some(500.0);
//! let mut warm = Sample::new(1);
//! warm.timings.ttfb = Some(300.0);
//!
//! let summary = ScenarioSummary::compute(&[cold, warm]);
//! assert_eq!(summary.average(Metric::Ttfb), Some(400.0));
//! assert!(summary.get(Metric::LargestContentfulPaint).is_none());
//! ```

pub mod numeric;
pub mod summary;

pub use numeric::NumericSummary;
pub use summary::ScenarioSummary;
