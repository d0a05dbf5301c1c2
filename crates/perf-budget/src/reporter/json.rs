//! Machine-readable scenario artifact

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::budget::Breach;
use crate::config::{Scenario, Thresholds};
use crate::metrics::Sample;
use crate::stats::ScenarioSummary;

/// Everything measured and decided for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioArtifact {
    pub scenario: Scenario,
    pub thresholds: Thresholds,
    pub runs: Vec<Sample>,
    pub summary: ScenarioSummary,
    pub breaches: Vec<Breach>,
    /// Breaches as printed in the text report
    pub alerts: Vec<String>,
    pub meta: ArtifactMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub constrained: bool,
    pub lighthouse: bool,
    pub generated_at: String,
}

impl ScenarioArtifact {
    pub fn new(
        scenario: Scenario,
        thresholds: Thresholds,
        runs: Vec<Sample>,
        summary: ScenarioSummary,
        breaches: Vec<Breach>,
        meta: ArtifactMeta,
    ) -> Self {
        let alerts = breaches.iter().map(|b| b.to_string()).collect();
        Self {
            scenario,
            thresholds,
            runs,
            summary,
            breaches,
            alerts,
            meta,
        }
    }
}

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format a scenario artifact as JSON, optionally pretty-printed.
    pub fn format(artifact: &ScenarioArtifact, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(artifact)?
        } else {
            serde_json::to_string(artifact)?
        };
        Ok(output)
    }
}
