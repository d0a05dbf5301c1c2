//! Scenario execution and suite orchestration
//!
//! ```text
//!  SuiteRunner ── buffer_unordered(parallel) ──┬── ScenarioRunner (page A)
//!      │                                       ├── ScenarioRunner (page B)
//!      │                                       └── ...
//!      │        each: Cold start → Warm #1 → ... → quality score
//!      │              → summary → breaches → reports
//!      ▼
//!  OutcomeCollector (one slot per scenario) → leaderboard + CSV
//! ```
//!
//! # Example
//!
//! ```no_run
//! use perf_budget::config::{Budgets, RunSettings, SuiteConfig};
//! use perf_budget::lighthouse::LighthouseCli;
//! use perf_budget::runner::{session_cookies, BrowserSessions, DirectorySink, SuiteRunner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let suite = SuiteConfig::from_file("suite.toml")?;
//! let budgets = Budgets::from_file("performance-budgets.json")?;
//! let settings = RunSettings::from_env()?;
//! let sink = DirectorySink::new("perf-reports")?;
//!
//! let sessions = BrowserSessions::launch(session_cookies(&settings, &suite.suite)?).await?;
//! let results = SuiteRunner::new(&budgets, &settings, &sink)
//!     .run(
//!         &suite.suite.name,
//!         &suite.scenarios(),
//!         suite.suite.parallel_sessions as usize,
//!         &sessions,
//!         &LighthouseCli::default(),
//!     )
//!     .await?;
//! println!("{} breaches", results.breach_count());
//! # Ok(())
//! # }
//! ```

mod collector;
mod scenario;
mod sink;
mod suite;

use serde::{Deserialize, Serialize};

use crate::budget::Breach;
use crate::stats::ScenarioSummary;

pub use collector::OutcomeCollector;
pub use scenario::ScenarioRunner;
pub use sink::{ArtifactSink, DirectorySink, MemorySink};
pub use suite::{
    session_cookies, BrowserSessions, SessionFactory, SuiteRunner, SUMMARY_CSV, SUMMARY_TEXT,
};

/// What one scenario left behind for the suite reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub url: String,
    pub label: String,
    pub summary: ScenarioSummary,
    pub breaches: Vec<Breach>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.breaches.is_empty()
    }
}

/// Results from a complete suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResults {
    pub suite_name: String,
    /// Completed scenarios, in suite order
    pub outcomes: Vec<ScenarioOutcome>,
    /// One message per scenario that could not be measured
    pub failures: Vec<String>,
    /// No failed scenarios and no breaches
    pub passed: bool,
    /// Timestamp when the suite started
    pub started_at: String,
    pub total_duration_ms: u64,
}

impl SuiteResults {
    pub fn breach_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.breaches.len()).sum()
    }
}
