//! Suite orchestration over a shared browser
//!
//! One browser process serves the whole suite. Each scenario gets its own
//! page, and up to `parallel` scenarios are measured at the same time. Within
//! a scenario the attempts stay sequential.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use super::collector::OutcomeCollector;
use super::scenario::ScenarioRunner;
use super::sink::ArtifactSink;
use super::{ScenarioOutcome, SuiteResults};
use crate::config::{Budgets, RunSettings, Scenario, SuiteSettings};
use crate::error::ConfigError;
use crate::lighthouse::QualityScorer;
use crate::metrics::{ChromiumSession, PageSession, StorageState};
use crate::reporter::{CsvReporter, LeaderboardReporter, ReportContext};

/// Leaderboard text artifact name.
pub const SUMMARY_TEXT: &str = "overall-performance-summary.txt";
/// Leaderboard CSV artifact name.
pub const SUMMARY_CSV: &str = "overall-performance-summary.csv";

/// Opens one measurable session per scenario.
pub trait SessionFactory: Sync {
    type Session: PageSession;

    fn open(&self, scenario: &Scenario) -> impl Future<Output = Result<Self::Session>> + Send;

    /// Release a session once its scenario is done. Failures are logged.
    fn close(&self, session: Self::Session) -> impl Future<Output = ()> + Send;
}

/// Pages of one headless Chromium, each carrying the suite's cookies.
pub struct BrowserSessions {
    browser: Browser,
    _handle: tokio::task::JoinHandle<()>,
    cookies: Vec<CookieParam>,
}

impl BrowserSessions {
    /// Launch a headless browser with default settings.
    pub async fn launch(cookies: Vec<CookieParam>) -> Result<Self> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Self::with_config(config, cookies).await
    }

    /// Launch a browser with custom configuration.
    ///
    /// ```no_run
    /// use chromiumoxide::browser::BrowserConfig;
    /// use perf_budget::runner::BrowserSessions;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let config = BrowserConfig::builder().with_head().build().map_err(anyhow::Error::msg)?;
    /// let sessions = BrowserSessions::with_config(config, Vec::new()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_config(config: BrowserConfig, cookies: Vec<CookieParam>) -> Result<Self> {
        info!("Launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch browser")?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!("Browser launched successfully");
        Ok(Self {
            browser,
            _handle: handle,
            cookies,
        })
    }
}

impl SessionFactory for BrowserSessions {
    type Session = ChromiumSession;

    #[instrument(skip_all, fields(scenario = %scenario.name))]
    async fn open(&self, scenario: &Scenario) -> Result<ChromiumSession> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Failed to open page")?;
        let session = ChromiumSession::new(page);
        session
            .install_cookies(self.cookies.clone())
            .await
            .context("Failed to install session cookies")?;
        Ok(session)
    }

    async fn close(&self, session: ChromiumSession) {
        if let Err(e) = session.into_page().close().await {
            warn!("Failed to close page: {}", e);
        }
    }
}

/// Cookies from the storage-state file, if one is configured.
///
/// The environment's `FRONTEND_STATE` wins over the suite file.
pub fn session_cookies(
    settings: &RunSettings,
    suite: &SuiteSettings,
) -> Result<Vec<CookieParam>, ConfigError> {
    match settings.storage_state.as_ref().or(suite.storage_state.as_ref()) {
        Some(path) => Ok(StorageState::from_file(path)?.cookie_params()),
        None => Ok(Vec::new()),
    }
}

/// Runs every scenario of a suite and writes the suite-wide reports.
pub struct SuiteRunner<'a> {
    budgets: &'a Budgets,
    settings: &'a RunSettings,
    sink: &'a dyn ArtifactSink,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(budgets: &'a Budgets, settings: &'a RunSettings, sink: &'a dyn ArtifactSink) -> Self {
        Self {
            budgets,
            settings,
            sink,
        }
    }

    /// Measure `scenarios`, at most `parallel` at a time.
    ///
    /// A scenario that fails (browser error, login page) is recorded in
    /// `failures` and does not stop the others.
    #[instrument(skip_all, fields(suite = %name))]
    pub async fn run<F, Q>(
        &self,
        name: &str,
        scenarios: &[Scenario],
        parallel: usize,
        sessions: &F,
        scorer: &Q,
    ) -> Result<SuiteResults>
    where
        F: SessionFactory,
        Q: QualityScorer,
    {
        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();
        let parallel = parallel.max(1);

        info!(
            "Starting suite '{}' with {} scenarios ({} at a time)",
            name,
            scenarios.len(),
            parallel
        );

        let runner = ScenarioRunner::new(self.budgets, self.settings);
        let runner = &runner;
        let mut collector = OutcomeCollector::new(scenarios.len());
        let mut failures = Vec::new();

        let mut completed = stream::iter(scenarios.iter().enumerate())
            .map(move |(index, scenario)| async move {
                (index, self.run_one(runner, scenario, sessions, scorer).await)
            })
            .buffer_unordered(parallel);

        while let Some((index, result)) = completed.next().await {
            match result {
                Ok(outcome) => collector.record(index, outcome),
                Err(e) => {
                    error!("Scenario '{}' failed: {:#}", scenarios[index].name, e);
                    failures.push(format!("{}: {:#}", scenarios[index].name, e));
                }
            }
        }

        let outcomes = collector.into_outcomes();
        if !outcomes.is_empty() {
            self.write_summary(&outcomes)?;
        }

        let passed = failures.is_empty() && outcomes.iter().all(ScenarioOutcome::passed);
        let results = SuiteResults {
            suite_name: name.to_string(),
            outcomes,
            failures,
            passed,
            started_at,
            total_duration_ms: start_time.elapsed().as_millis() as u64,
        };

        if results.passed {
            info!(
                "Suite '{}' completed within budget in {}ms",
                name, results.total_duration_ms
            );
        } else {
            warn!(
                "Suite '{}' completed with {} breaches and {} failed scenarios",
                name,
                results.breach_count(),
                results.failures.len()
            );
        }

        Ok(results)
    }

    async fn run_one<F, Q>(
        &self,
        runner: &ScenarioRunner<'_>,
        scenario: &Scenario,
        sessions: &F,
        scorer: &Q,
    ) -> Result<ScenarioOutcome>
    where
        F: SessionFactory,
        Q: QualityScorer,
    {
        let mut session = sessions
            .open(scenario)
            .await
            .with_context(|| format!("Failed to open a session for {}", scenario.name))?;
        let result = runner.run(scenario, &mut session, scorer, self.sink).await;
        sessions.close(session).await;
        result
    }

    /// Leaderboard and CSV against the default budgets.
    fn write_summary(&self, outcomes: &[ScenarioOutcome]) -> Result<()> {
        let context = ReportContext {
            constrained: self.settings.constrained,
            lighthouse: self.settings.lighthouse,
            budget_source: self.budgets.source.clone(),
            ..ReportContext::default()
        };

        let leaderboard = LeaderboardReporter {
            outcomes,
            thresholds: &self.budgets.default,
            context: &context,
        }
        .render()?;
        info!("\n{}", leaderboard);
        self.sink.write(SUMMARY_TEXT, &leaderboard)?;
        self.sink
            .write(SUMMARY_CSV, &CsvReporter::format(outcomes, &self.budgets.default))?;
        Ok(())
    }
}
