//! One scenario: sequential cold/warm attempts, then summary, budgets and reports

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument, warn};

use super::sink::ArtifactSink;
use super::ScenarioOutcome;
use crate::budget::BudgetEvaluator;
use crate::config::{Budgets, RunSettings, Scenario};
use crate::error::SampleError;
use crate::lighthouse::QualityScorer;
use crate::metrics::{PageSession, Sample};
use crate::reporter::{ArtifactMeta, JsonReporter, ReportContext, ScenarioArtifact, ScenarioReport};
use crate::stats::ScenarioSummary;

/// Measures scenarios against a budget document.
pub struct ScenarioRunner<'a> {
    budgets: &'a Budgets,
    settings: &'a RunSettings,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(budgets: &'a Budgets, settings: &'a RunSettings) -> Self {
        Self { budgets, settings }
    }

    /// Measure `scenario` in `session` and store its reports in `sink`.
    ///
    /// Attempts run one after another in the same session: attempt 0 after a
    /// cache clear, the rest warm. A session that lands on a login page aborts
    /// the scenario after its URL and DOM are stored.
    #[instrument(skip_all, fields(scenario = %scenario.name))]
    pub async fn run<S, Q>(
        &self,
        scenario: &Scenario,
        session: &mut S,
        scorer: &Q,
        sink: &dyn ArtifactSink,
    ) -> Result<ScenarioOutcome>
    where
        S: PageSession,
        Q: QualityScorer,
    {
        let attempts = self.settings.runs_per_page.max(1);
        info!("Measuring {} ({} runs)", scenario.url, attempts);

        let mut samples = Vec::with_capacity(attempts as usize);
        for attempt in 0..attempts {
            let sample = self.attempt(scenario, session, attempt, sink).await?;
            samples.push(sample);
        }

        if self.settings.lighthouse {
            let cookies = session.cookie_header().await;
            let scores = scorer.score(&scenario.url, cookies.as_deref()).await;
            if let (Some(scores), Some(last)) = (scores, samples.last_mut()) {
                debug!(performance = scores.performance, "Quality scores attached");
                last.quality = Some(scores);
            }
        }

        self.finish(scenario, samples, sink)
    }

    async fn attempt<S: PageSession>(
        &self,
        scenario: &Scenario,
        session: &mut S,
        attempt: u32,
        sink: &dyn ArtifactSink,
    ) -> Result<Sample> {
        session
            .reset(attempt == 0)
            .await
            .with_context(|| format!("Failed to reset session before attempt {}", attempt))?;

        if self.settings.constrained {
            if let Err(e) = session.apply_constrained_profile().await {
                warn!("Unable to apply constrained profile: {}", e);
            }
        }

        match session.sample(&scenario.url, attempt).await {
            Ok(sample) => Ok(sample),
            Err(SampleError::NotAuthenticated { url, dom }) => {
                error!(landed = %url, "Session is not authenticated");
                self.store_login_diagnostics(scenario, &url, &dom, sink);
                Err(SampleError::NotAuthenticated { url, dom })
                    .with_context(|| format!("{} requires a signed-in session", scenario.name))
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to measure {} (attempt {})", scenario.name, attempt)
            }),
        }
    }

    fn store_login_diagnostics(
        &self,
        scenario: &Scenario,
        url: &str,
        dom: &str,
        sink: &dyn ArtifactSink,
    ) {
        let artifacts = [
            (format!("{}-not-logged-in-url.txt", scenario.label), url),
            (format!("{}-not-logged-in-dom.html", scenario.label), dom),
        ];
        for (name, contents) in artifacts {
            if let Err(e) = sink.write(&name, contents) {
                warn!("Unable to store {}: {:#}", name, e);
            }
        }
    }

    /// Summarise, evaluate and report a completed set of samples.
    fn finish(
        &self,
        scenario: &Scenario,
        samples: Vec<Sample>,
        sink: &dyn ArtifactSink,
    ) -> Result<ScenarioOutcome> {
        let thresholds = self.budgets.resolve(scenario);
        let cold_ttfb = self.settings.cold_ttfb_budget(&self.budgets.default);
        let summary = ScenarioSummary::compute(&samples);
        let breaches = BudgetEvaluator::new(&thresholds)
            .with_cold_ttfb(cold_ttfb)
            .collect_breaches(&samples);

        let context = ReportContext {
            constrained: self.settings.constrained,
            lighthouse: self.settings.lighthouse,
            budget_source: self.budgets.source.clone(),
            page_override: self.budgets.has_page_override(&scenario.label),
            cold_ttfb: Some(cold_ttfb),
        };

        let report = ScenarioReport {
            scenario,
            samples: &samples,
            summary: &summary,
            thresholds: &thresholds,
            breaches: &breaches,
            context: &context,
        }
        .render()?;
        info!("\n{}", report);
        sink.write(&format!("{}-performance.txt", scenario.label), &report)?;

        if breaches.is_empty() {
            info!("{} is within budget", scenario.name);
        } else {
            warn!("{} has {} budget breaches", scenario.name, breaches.len());
        }

        let artifact = ScenarioArtifact::new(
            scenario.clone(),
            thresholds,
            samples,
            summary.clone(),
            breaches.clone(),
            ArtifactMeta {
                constrained: self.settings.constrained,
                lighthouse: self.settings.lighthouse,
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        sink.write(
            &format!("{}-performance.json", scenario.label),
            &JsonReporter::format(&artifact, true)?,
        )?;

        Ok(ScenarioOutcome {
            name: scenario.name.clone(),
            url: scenario.url.clone(),
            label: scenario.label.clone(),
            summary,
            breaches,
        })
    }
}
