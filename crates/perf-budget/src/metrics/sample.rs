//! Page-load samples
//!
//! A [`Sample`] is one page-load measurement. It is built once per attempt and
//! never mutated afterwards, except for attaching the optional quality scores
//! to the last attempt of a scenario.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resources faster than this are not recorded as slow.
pub const SLOW_RESOURCE_MS: f64 = 300.0;

/// Maximum number of slow resources kept per sample and per summary.
pub const SLOW_RESOURCE_LIMIT: usize = 5;

/// Label for attempt `attempt` of a scenario: the first is cold, the rest warm.
pub fn run_label(attempt: u32) -> String {
    if attempt == 0 {
        "Cold start".to_string()
    } else {
        format!("Warm #{}", attempt)
    }
}

/// Navigation and paint timings in milliseconds.
///
/// `None` means the browser never produced the underlying entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTimings {
    pub ttfb: Option<f64>,
    pub dom_content_loaded: Option<f64>,
    pub first_contentful_paint: Option<f64>,
    pub largest_contentful_paint: Option<f64>,
    pub load_event_end: Option<f64>,
}

/// One sub-resource fetched by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    pub name: String,
    pub initiator_type: String,
    #[serde(default)]
    pub transfer_size: u64,
    #[serde(default)]
    pub encoded_body_size: u64,
    #[serde(default)]
    pub decoded_body_size: u64,
    #[serde(default)]
    pub duration: f64,
}

/// A slow resource tagged with the attempt it was observed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowResource {
    #[serde(flatten)]
    pub entry: ResourceEntry,
    pub run_label: String,
}

/// Aggregate of all resources sharing an initiator type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub count: u32,
    pub transfer_size: u64,
    pub max_duration: f64,
}

/// A `Server-Timing` entry from the navigation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTimingEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: f64,
}

/// External page-quality scores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScores {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
}

/// One page-load measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Zero-based attempt index; attempt 0 is the cold start
    pub attempt: u32,
    /// "Cold start" or "Warm #n"
    pub run_label: String,
    pub timings: MetricTimings,
    /// Cumulative layout shift, `None` when layout shifts could not be observed
    pub cls: Option<f64>,
    /// Total blocking time in ms, `None` when long tasks could not be observed
    pub total_blocking_time: Option<f64>,
    /// Navigation plus sub-resource requests
    pub request_count: u32,
    /// Bytes transferred for the document and all sub-resources
    pub transfer_size: u64,
    pub encoded_body_size: u64,
    pub decoded_body_size: u64,
    pub resource_breakdown: BTreeMap<String, ResourceSummary>,
    /// At most [`SLOW_RESOURCE_LIMIT`] resources of at least [`SLOW_RESOURCE_MS`]
    pub slowest_resources: Vec<SlowResource>,
    pub server_timing: Vec<ServerTimingEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityScores>,
}

impl Sample {
    /// An empty sample for `attempt`, with every optional metric unavailable.
    pub fn new(attempt: u32) -> Self {
        Self {
            attempt,
            run_label: run_label(attempt),
            timings: MetricTimings::default(),
            cls: None,
            total_blocking_time: None,
            request_count: 0,
            transfer_size: 0,
            encoded_body_size: 0,
            decoded_body_size: 0,
            resource_breakdown: BTreeMap::new(),
            slowest_resources: Vec::new(),
            server_timing: Vec::new(),
            quality: None,
        }
    }

    /// Whether this sample is the cold-cache attempt.
    pub fn is_cold(&self) -> bool {
        self.attempt == 0
    }
}

/// Sum of the blocking portion of each long task (time beyond 50 ms).
pub fn total_blocking_time(long_tasks: &[f64]) -> f64 {
    long_tasks.iter().map(|d| (d - 50.0).max(0.0)).sum()
}

/// Group resources by initiator type.
pub fn resource_breakdown(entries: &[ResourceEntry]) -> BTreeMap<String, ResourceSummary> {
    let mut breakdown: BTreeMap<String, ResourceSummary> = BTreeMap::new();
    for entry in entries {
        let key = if entry.initiator_type.is_empty() {
            "other"
        } else {
            entry.initiator_type.as_str()
        };
        let summary = breakdown.entry(key.to_string()).or_default();
        summary.count += 1;
        summary.transfer_size += entry.transfer_size;
        summary.max_duration = summary.max_duration.max(entry.duration);
    }
    breakdown
}

/// The slowest resources at or above [`SLOW_RESOURCE_MS`], longest first.
pub fn slowest_resources(entries: &[ResourceEntry], run_label: &str) -> Vec<SlowResource> {
    let mut slow: Vec<&ResourceEntry> = entries
        .iter()
        .filter(|e| e.duration >= SLOW_RESOURCE_MS)
        .collect();
    slow.sort_by(|a, b| b.duration.total_cmp(&a.duration));
    slow.into_iter()
        .take(SLOW_RESOURCE_LIMIT)
        .map(|entry| SlowResource {
            entry: entry.clone(),
            run_label: run_label.to_string(),
        })
        .collect()
}
