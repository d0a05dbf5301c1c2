//! Measure every page of a suite file against a budget document
//!
//! Usage: cargo run -p perf-budget --example run_suite -- <suite.toml> <budgets.json> [report-dir]
//!
//! Environment: PERF_RUNS, PERF_LIGHTHOUSE, PERF_CONSTRAINED, PERF_COLD_FACTOR,
//! PERF_TTFB_COLD, FRONTEND_STATE.

use anyhow::{Context, Result};
use perf_budget::config::{Budgets, RunSettings, SuiteConfig};
use perf_budget::lighthouse::LighthouseCli;
use perf_budget::runner::{session_cookies, BrowserSessions, DirectorySink, SuiteRunner};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let (Some(suite_path), Some(budgets_path)) = (args.get(1), args.get(2)) else {
        anyhow::bail!("Usage: run_suite <suite.toml> <budgets.json> [report-dir]");
    };
    let report_dir = args.get(3).map(String::as_str).unwrap_or("perf-reports");

    let suite = SuiteConfig::from_file(suite_path).context("Failed to load suite")?;
    let budgets = Budgets::from_file(budgets_path).context("Failed to load budgets")?;
    let settings = RunSettings::from_env()?;

    println!("Starting suite: {}", suite.suite.name);
    println!("  Base URL: {}", suite.suite.base_url);
    println!("  Pages: {}", suite.pages.len());
    println!("  Runs per page: {}", settings.runs_per_page);
    println!("  Reports: {}", report_dir);
    println!();

    let sink = DirectorySink::new(report_dir)?;
    let sessions = BrowserSessions::launch(session_cookies(&settings, &suite.suite)?).await?;
    let results = SuiteRunner::new(&budgets, &settings, &sink)
        .run(
            &suite.suite.name,
            &suite.scenarios(),
            suite.suite.parallel_sessions as usize,
            &sessions,
            &LighthouseCli::default(),
        )
        .await?;

    for outcome in &results.outcomes {
        let status = if outcome.passed() { "✅" } else { "⚠️" };
        println!("{} {} ({} breaches)", status, outcome.name, outcome.breaches.len());
    }
    for failure in &results.failures {
        println!("❌ {}", failure);
    }
    println!(
        "\n{} pages, {} breaches, {} failed in {}ms",
        results.outcomes.len(),
        results.breach_count(),
        results.failures.len(),
        results.total_duration_ms
    );

    if !results.passed {
        std::process::exit(1);
    }
    Ok(())
}
