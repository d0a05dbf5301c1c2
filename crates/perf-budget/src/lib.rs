//! Page performance budgets for web applications
//!
//! This crate loads pages in a real browser, measures each load, and checks
//! the measurements against a budget document.
//!
//! # Features
//!
//! - **Sampling**: TTFB, DOM content loaded, FCP, LCP, load, CLS, TBT, request
//!   count and transfer size per page load, with slow sub-resources
//! - **Cold and warm runs**: the first load follows a cache clear, later loads are warm
//! - **Statistics**: average, median, min, max, standard deviation per metric
//! - **Budgets**: every run is checked on its own; absent metrics never breach
//! - **Quality scores**: optional Lighthouse performance/accessibility/best-practices/SEO
//! - **Reports**: per-page text and JSON, suite leaderboard and CSV
//!
//! # Example
//!
//! ```no_run
//! use perf_budget::{Budgets, RunSettings, SuiteConfig};
//! use perf_budget::lighthouse::LighthouseCli;
//! use perf_budget::runner::{session_cookies, BrowserSessions, DirectorySink, SuiteRunner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let suite = SuiteConfig::from_file("suite.toml")?;
//! let budgets = Budgets::from_file("performance-budgets.json")?;
//! let settings = RunSettings::from_env()?;
//!
//! let sink = DirectorySink::new("perf-reports")?;
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
//!
//! for outcome in &results.outcomes {
//!     println!("{}: {} breaches", outcome.name, outcome.breaches.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Budgets
//!
//! ```json
//! {
//!   "default": {
//!     "ttfb": 600, "domContentLoaded": 2500, "firstContentfulPaint": 1800,
//!     "largestContentfulPaint": 2500, "loadEventEnd": 4000,
//!     "cumulativeLayoutShift": 0.1, "totalBlockingTime": 200,
//!     "requestCount": 80, "transferSize": 2000000,
//!     "lighthouse": { "performance": 75, "accessibility": 90, "bestPractices": 80, "seo": 90 }
//!   },
//!   "pages": {
//!     "performance-library": { "largestContentfulPaint": 3500 }
//!   }
//! }
//! ```

pub mod budget;
pub mod config;
pub mod error;
pub mod lighthouse;
pub mod metrics;
pub mod reporter;
pub mod runner;
pub mod stats;
pub mod throttling;

// Re-export main types for convenience
pub use budget::{Breach, BudgetEvaluator};
pub use config::{Budgets, RunSettings, Scenario, SuiteConfig, Thresholds};
pub use error::{ConfigError, SampleError};
pub use metrics::{Metric, PageSession, Sample};
pub use runner::{ScenarioOutcome, ScenarioRunner, SuiteResults, SuiteRunner};
pub use stats::ScenarioSummary;
