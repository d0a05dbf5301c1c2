//! Decoding of the metrics payload read back from the browser

use serde::Deserialize;

use super::sample::{
    resource_breakdown, run_label, slowest_resources, total_blocking_time, MetricTimings,
    ResourceEntry, Sample, ServerTimingEntry,
};

/// Everything the page reports about one load, as returned by
/// [`READ_METRICS_SCRIPT`](super::chromium::READ_METRICS_SCRIPT).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPageMetrics {
    pub navigation: Option<RawNavigation>,
    pub paints: RawPaints,
    pub largest_contentful_paint: Option<f64>,
    /// `None` when the layout-shift observer could not be attached
    pub cls: Option<f64>,
    /// `None` when the long-task observer could not be attached
    pub long_tasks: Option<Vec<f64>>,
    pub resource_entries: Vec<ResourceEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNavigation {
    pub dom_content_loaded_event_end: Option<f64>,
    pub load_event_end: Option<f64>,
    pub response_start: Option<f64>,
    pub request_start: Option<f64>,
    pub transfer_size: Option<u64>,
    pub encoded_body_size: Option<u64>,
    pub decoded_body_size: Option<u64>,
    pub server_timing: Option<Vec<ServerTimingEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPaints {
    pub first_paint: Option<f64>,
    pub first_contentful_paint: Option<f64>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl RawPageMetrics {
    /// Build the [`Sample`] for attempt `attempt` from this payload.
    pub fn into_sample(self, attempt: u32) -> Sample {
        let label = run_label(attempt);
        let nav = self.navigation.as_ref();

        let ttfb = nav.and_then(|n| {
            match (finite(n.response_start), finite(n.request_start)) {
                (Some(response), Some(request)) => Some(response - request),
                _ => None,
            }
        });

        let timings = MetricTimings {
            ttfb,
            dom_content_loaded: nav.and_then(|n| finite(n.dom_content_loaded_event_end)),
            first_contentful_paint: finite(self.paints.first_contentful_paint),
            largest_contentful_paint: finite(self.largest_contentful_paint),
            load_event_end: nav.and_then(|n| finite(n.load_event_end)),
        };

        let request_count = self.resource_entries.len() as u32 + u32::from(nav.is_some());
        let transfer_size = nav.and_then(|n| n.transfer_size).unwrap_or(0)
            + self
                .resource_entries
                .iter()
                .map(|e| e.transfer_size)
                .sum::<u64>();

        Sample {
            attempt,
            timings,
            cls: finite(self.cls),
            total_blocking_time: self.long_tasks.as_deref().map(total_blocking_time),
            request_count,
            transfer_size,
            encoded_body_size: nav.and_then(|n| n.encoded_body_size).unwrap_or(0),
            decoded_body_size: nav.and_then(|n| n.decoded_body_size).unwrap_or(0),
            resource_breakdown: resource_breakdown(&self.resource_entries),
            slowest_resources: slowest_resources(&self.resource_entries, &label),
            server_timing: nav
                .and_then(|n| n.server_timing.clone())
                .unwrap_or_default(),
            quality: None,
            run_label: label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "navigation": {
            "domContentLoadedEventEnd": 812.4,
            "loadEventEnd": 1640.0,
            "responseStart": 310.0,
            "requestStart": 40.0,
            "transferSize": 15000,
            "encodedBodySize": 14000,
            "decodedBodySize": 52000,
            "serverTiming": [{ "name": "db", "description": "query", "duration": 12.5 }]
        },
        "paints": { "firstPaint": 500.0, "firstContentfulPaint": 540.0 },
        "largestContentfulPaint": 910.0,
        "cls": 0.02,
        "longTasks": [120.0, 45.0, 70.0],
        "resourceEntries": [
            { "name": "https://cdn.example.com/app.js", "initiatorType": "script",
              "transferSize": 90000, "encodedBodySize": 90000, "decodedBodySize": 250000, "duration": 420.0 },
            { "name": "https://cdn.example.com/logo.svg", "initiatorType": "img",
              "transferSize": 3000, "encodedBodySize": 3000, "decodedBodySize": 3000, "duration": 35.0 }
        ]
    }"#;

    #[test]
    fn test_payload_to_sample() {
        let raw: RawPageMetrics = serde_json::from_str(PAYLOAD).unwrap();
        let sample = raw.into_sample(1);

        assert_eq!(sample.run_label, "Warm #1");
        assert_eq!(sample.timings.ttfb, Some(270.0));
        assert_eq!(sample.timings.dom_content_loaded, Some(812.4));
        assert_eq!(sample.timings.first_contentful_paint, Some(540.0));
        assert_eq!(sample.timings.largest_contentful_paint, Some(910.0));
        assert_eq!(sample.timings.load_event_end, Some(1640.0));
        assert_eq!(sample.cls, Some(0.02));
        assert_eq!(sample.total_blocking_time, Some(90.0));
        assert_eq!(sample.request_count, 3);
        assert_eq!(sample.transfer_size, 108_000);
        assert_eq!(sample.decoded_body_size, 52_000);
        assert_eq!(sample.server_timing.len(), 1);
        assert_eq!(sample.slowest_resources.len(), 1);
        assert_eq!(sample.slowest_resources[0].run_label, "Warm #1");
        assert_eq!(sample.resource_breakdown["script"].count, 1);
    }

    #[test]
    fn test_missing_apis_are_unavailable_not_zero() {
        let raw: RawPageMetrics = serde_json::from_str(
            r#"{ "navigation": null, "paints": {}, "largestContentfulPaint": null,
                 "cls": null, "longTasks": null, "resourceEntries": [] }"#,
        )
        .unwrap();
        let sample = raw.into_sample(0);

        assert_eq!(sample.timings.ttfb, None);
        assert_eq!(sample.timings.first_contentful_paint, None);
        assert_eq!(sample.cls, None);
        assert_eq!(sample.total_blocking_time, None);
        assert_eq!(sample.request_count, 0);
        assert_eq!(sample.transfer_size, 0);
    }

    #[test]
    fn test_observer_attached_without_entries_is_zero() {
        let raw: RawPageMetrics =
            serde_json::from_str(r#"{ "cls": 0, "longTasks": [] }"#).unwrap();
        let sample = raw.into_sample(0);

        assert_eq!(sample.cls, Some(0.0));
        assert_eq!(sample.total_blocking_time, Some(0.0));
    }

    #[test]
    fn test_ttfb_needs_both_timestamps() {
        let raw: RawPageMetrics = serde_json::from_str(
            r#"{ "navigation": { "responseStart": 300.0, "loadEventEnd": 900.0 } }"#,
        )
        .unwrap();
        let sample = raw.into_sample(0);

        assert_eq!(sample.timings.ttfb, None);
        assert_eq!(sample.timings.load_event_end, Some(900.0));
        assert_eq!(sample.request_count, 1);
    }
}
