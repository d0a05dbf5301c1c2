//! The catalogue of tracked metrics
//!
//! Every metric knows how to read itself from a [`Sample`], which threshold
//! bounds it, which way the bound points, and how it is displayed.

use serde::{Deserialize, Serialize};

use super::sample::Sample;
use crate::config::Thresholds;
use crate::reporter::format::{format_bytes, format_count, format_float, format_ms};

/// Which side of a threshold is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Acceptable when `value <= threshold`
    LowerIsBetter,
    /// Acceptable when `value >= threshold`
    HigherIsBetter,
}

impl Direction {
    /// Whether `value` is within `threshold`.
    pub fn within(self, value: f64, threshold: f64) -> bool {
        match self {
            Direction::LowerIsBetter => value <= threshold,
            Direction::HigherIsBetter => value >= threshold,
        }
    }

    /// Comparison symbol used when printing a budget.
    pub fn symbol(self) -> &'static str {
        match self {
            Direction::LowerIsBetter => "≤",
            Direction::HigherIsBetter => "≥",
        }
    }
}

/// A tracked metric.
///
/// Declaration order is the order breaches and summaries are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Ttfb,
    DomContentLoaded,
    FirstContentfulPaint,
    LargestContentfulPaint,
    LoadComplete,
    CumulativeLayoutShift,
    TotalBlockingTime,
    RequestCount,
    TransferSize,
    QualityPerformance,
    QualityAccessibility,
    QualityBestPractices,
    QualitySeo,
}

impl Metric {
    pub const ALL: [Metric; 13] = [
        Metric::Ttfb,
        Metric::DomContentLoaded,
        Metric::FirstContentfulPaint,
        Metric::LargestContentfulPaint,
        Metric::LoadComplete,
        Metric::CumulativeLayoutShift,
        Metric::TotalBlockingTime,
        Metric::RequestCount,
        Metric::TransferSize,
        Metric::QualityPerformance,
        Metric::QualityAccessibility,
        Metric::QualityBestPractices,
        Metric::QualitySeo,
    ];

    /// Page-load metrics, i.e. everything except quality scores.
    pub const LOAD: [Metric; 9] = [
        Metric::Ttfb,
        Metric::DomContentLoaded,
        Metric::FirstContentfulPaint,
        Metric::LargestContentfulPaint,
        Metric::LoadComplete,
        Metric::CumulativeLayoutShift,
        Metric::TotalBlockingTime,
        Metric::RequestCount,
        Metric::TransferSize,
    ];

    pub const QUALITY: [Metric; 4] = [
        Metric::QualityPerformance,
        Metric::QualityAccessibility,
        Metric::QualityBestPractices,
        Metric::QualitySeo,
    ];

    /// Full display name.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Ttfb => "TTFB",
            Metric::DomContentLoaded => "DOM Content Loaded",
            Metric::FirstContentfulPaint => "First Contentful Paint",
            Metric::LargestContentfulPaint => "Largest Contentful Paint",
            Metric::LoadComplete => "Load Complete",
            Metric::CumulativeLayoutShift => "Cumulative Layout Shift",
            Metric::TotalBlockingTime => "Total Blocking Time",
            Metric::RequestCount => "Request Count",
            Metric::TransferSize => "Transfer Size",
            Metric::QualityPerformance => "Lighthouse Performance",
            Metric::QualityAccessibility => "Lighthouse Accessibility",
            Metric::QualityBestPractices => "Lighthouse Best Practices",
            Metric::QualitySeo => "Lighthouse SEO",
        }
    }

    /// Abbreviation used in suite-wide tables.
    pub fn short_label(self) -> &'static str {
        match self {
            Metric::Ttfb => "TTFB",
            Metric::DomContentLoaded => "DCL",
            Metric::FirstContentfulPaint => "FCP",
            Metric::LargestContentfulPaint => "LCP",
            Metric::LoadComplete => "Load",
            Metric::CumulativeLayoutShift => "CLS",
            Metric::TotalBlockingTime => "TBT",
            Metric::RequestCount => "Requests",
            Metric::TransferSize => "Bytes",
            Metric::QualityPerformance => "Perf",
            Metric::QualityAccessibility => "A11y",
            Metric::QualityBestPractices => "BestPractices",
            Metric::QualitySeo => "SEO",
        }
    }

    /// Column stem used in CSV headers.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Ttfb => "TTFB_ms",
            Metric::DomContentLoaded => "DCL_ms",
            Metric::FirstContentfulPaint => "FCP_ms",
            Metric::LargestContentfulPaint => "LCP_ms",
            Metric::LoadComplete => "Load_ms",
            Metric::CumulativeLayoutShift => "CLS",
            Metric::TotalBlockingTime => "TBT_ms",
            Metric::RequestCount => "Requests",
            Metric::TransferSize => "Bytes",
            Metric::QualityPerformance => "Lighthouse_Perf",
            Metric::QualityAccessibility => "Lighthouse_A11y",
            Metric::QualityBestPractices => "Lighthouse_BestPractices",
            Metric::QualitySeo => "Lighthouse_SEO",
        }
    }

    pub fn direction(self) -> Direction {
        if self.is_quality() {
            Direction::HigherIsBetter
        } else {
            Direction::LowerIsBetter
        }
    }

    pub fn is_quality(self) -> bool {
        Metric::QUALITY.contains(&self)
    }

    /// The metric's value in `sample`, `None` when unavailable.
    pub fn value(self, sample: &Sample) -> Option<f64> {
        let value = match self {
            Metric::Ttfb => sample.timings.ttfb,
            Metric::DomContentLoaded => sample.timings.dom_content_loaded,
            Metric::FirstContentfulPaint => sample.timings.first_contentful_paint,
            Metric::LargestContentfulPaint => sample.timings.largest_contentful_paint,
            Metric::LoadComplete => sample.timings.load_event_end,
            Metric::CumulativeLayoutShift => sample.cls,
            Metric::TotalBlockingTime => sample.total_blocking_time,
            Metric::RequestCount => Some(sample.request_count as f64),
            Metric::TransferSize => Some(sample.transfer_size as f64),
            Metric::QualityPerformance => sample.quality.map(|q| q.performance as f64),
            Metric::QualityAccessibility => sample.quality.map(|q| q.accessibility as f64),
            Metric::QualityBestPractices => sample.quality.map(|q| q.best_practices as f64),
            Metric::QualitySeo => sample.quality.map(|q| q.seo as f64),
        };
        value.filter(|v| v.is_finite())
    }

    /// The bound for this metric, `None` for quality scores without floors.
    pub fn threshold(self, thresholds: &Thresholds) -> Option<f64> {
        match self {
            Metric::Ttfb => Some(thresholds.ttfb),
            Metric::DomContentLoaded => Some(thresholds.dom_content_loaded),
            Metric::FirstContentfulPaint => Some(thresholds.first_contentful_paint),
            Metric::LargestContentfulPaint => Some(thresholds.largest_contentful_paint),
            Metric::LoadComplete => Some(thresholds.load_event_end),
            Metric::CumulativeLayoutShift => Some(thresholds.cumulative_layout_shift),
            Metric::TotalBlockingTime => Some(thresholds.total_blocking_time),
            Metric::RequestCount => Some(thresholds.request_count),
            Metric::TransferSize => Some(thresholds.transfer_size),
            Metric::QualityPerformance => thresholds.lighthouse.as_ref().map(|l| l.performance),
            Metric::QualityAccessibility => {
                thresholds.lighthouse.as_ref().map(|l| l.accessibility)
            }
            Metric::QualityBestPractices => {
                thresholds.lighthouse.as_ref().map(|l| l.best_practices)
            }
            Metric::QualitySeo => thresholds.lighthouse.as_ref().map(|l| l.seo),
        }
    }

    /// Render a value of this metric for humans.
    pub fn format(self, value: f64) -> String {
        match self {
            Metric::CumulativeLayoutShift => format_float(value, 3),
            Metric::RequestCount => format_count(value),
            Metric::TransferSize => format_bytes(value),
            m if m.is_quality() => format_count(value),
            _ => format_ms(value),
        }
    }
}
