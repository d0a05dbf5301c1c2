//! Scenario and suite reporting
//!
//! # Output Formats
//!
//! - **Text**: per-scenario report and suite leaderboard for humans
//! - **JSON**: per-scenario artifact with thresholds, raw runs, summary and breaches
//! - **CSV**: one row per page with its worst value against budget
//!
//! All formatting is presentation only; budget checks work on raw values.
//!
//! # Example
//!
//! ```no_run
//! use perf_budget::reporter::{CsvReporter, LeaderboardReporter, ReportContext};
//! use perf_budget::runner::SuiteResults;
//! use perf_budget::config::Thresholds;
//!
//! # fn example(results: SuiteResults, defaults: Thresholds) -> anyhow::Result<()> {
//! let context = ReportContext::default();
//! let leaderboard = LeaderboardReporter {
//!     outcomes: &results.outcomes,
//!     thresholds: &defaults,
//!     context: &context,
//! }
//! .render()?;
//! println!("{}", leaderboard);
//!
//! std::fs::write("overall-performance-summary.csv", CsvReporter::format(&results.outcomes, &defaults))?;
//! # Ok(())
//! # }
//! ```

mod csv;
pub mod format;
mod json;
mod leaderboard;
mod scenario;

pub use csv::CsvReporter;
pub use json::{ArtifactMeta, JsonReporter, ScenarioArtifact};
pub use leaderboard::{worst_pages, LeaderboardReporter, PageRow, PassRate, TRACKED};
pub use scenario::{ReportContext, ScenarioReport};
