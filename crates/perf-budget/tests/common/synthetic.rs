//! Synthetic sessions, scorers and budgets for pipeline tests

#![allow(dead_code)]

use anyhow::Result;
use perf_budget::config::{Budgets, Scenario};
use perf_budget::lighthouse::QualityScorer;
use perf_budget::metrics::{PageSession, QualityScores, ResourceEntry, Sample, SlowResource};
use perf_budget::runner::SessionFactory;
use perf_budget::SampleError;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

pub const BUDGETS: &str = r#"{
  "default": {
    "ttfb": 600, "domContentLoaded": 2500, "firstContentfulPaint": 1800,
    "largestContentfulPaint": 2500, "loadEventEnd": 4000,
    "cumulativeLayoutShift": 0.1, "totalBlockingTime": 200,
    "requestCount": 80, "transferSize": 2000000,
    "lighthouse": { "performance": 75, "accessibility": 90, "bestPractices": 80, "seo": 90 }
  },
  "pages": {
    "performance-library": { "largestContentfulPaint": 3500 }
  }
}"#;

pub fn budgets() -> Budgets {
    Budgets::from_json_str(BUDGETS).expect("budgets parse")
}

pub fn scenario(name: &str, label: &str) -> Scenario {
    Scenario {
        name: name.to_string(),
        url: format!("https://portal.example.com/{}", name),
        label: label.to_string(),
        thresholds: None,
    }
}

/// A healthy page load with the given LCP and TTFB.
pub fn sample(attempt: u32, lcp: f64, ttfb: f64) -> Sample {
    let mut sample = Sample::new(attempt);
    sample.timings.ttfb = Some(ttfb);
    sample.timings.dom_content_loaded = Some(lcp - 400.0);
    sample.timings.first_contentful_paint = Some(lcp - 600.0);
    sample.timings.largest_contentful_paint = Some(lcp);
    sample.timings.load_event_end = Some(lcp + 300.0);
    sample.cls = Some(0.02);
    sample.total_blocking_time = Some(80.0);
    sample.request_count = 45;
    sample.transfer_size = 1_200_000;
    sample.slowest_resources = vec![SlowResource {
        entry: ResourceEntry {
            name: "https://portal.example.com/app.js".to_string(),
            initiator_type: "script".to_string(),
            transfer_size: 400_000,
            encoded_body_size: 400_000,
            decoded_body_size: 1_100_000,
            duration: 350.0 + attempt as f64,
        },
        run_label: sample.run_label.clone(),
    }];
    sample
}

/// Plays back scripted sample results, one per attempt.
pub struct ScriptedSession {
    results: VecDeque<Result<Sample, SampleError>>,
    delay: Duration,
}

impl ScriptedSession {
    pub fn new(results: Vec<Result<Sample, SampleError>>) -> Self {
        Self {
            results: results.into(),
            delay: Duration::ZERO,
        }
    }
}

impl PageSession for ScriptedSession {
    async fn reset(&mut self, _clear_cache: bool) -> Result<(), SampleError> {
        Ok(())
    }

    async fn apply_constrained_profile(&mut self) -> Result<(), SampleError> {
        Ok(())
    }

    async fn sample(&mut self, _url: &str, attempt: u32) -> Result<Sample, SampleError> {
        tokio::time::sleep(self.delay).await;
        self.results
            .pop_front()
            .unwrap_or_else(|| Ok(Sample::new(attempt)))
    }

    async fn cookie_header(&self) -> Option<String> {
        None
    }
}

/// Hands out one scripted session per scenario name.
///
/// Sessions for earlier scenarios can be delayed so that later scenarios
/// finish first.
#[derive(Default)]
pub struct ScriptedSessions {
    scripts: Mutex<HashMap<String, Vec<Result<Sample, SampleError>>>>,
    delays: HashMap<String, Duration>,
    closed: Mutex<usize>,
}

impl ScriptedSessions {
    pub fn script(self, name: &str, results: Vec<Result<Sample, SampleError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(name.to_string(), results);
        self
    }

    pub fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Number of sessions handed back.
    pub fn closed(&self) -> usize {
        *self.closed.lock().unwrap()
    }
}

impl SessionFactory for ScriptedSessions {
    type Session = ScriptedSession;

    async fn open(&self, scenario: &Scenario) -> Result<ScriptedSession> {
        let results = self
            .scripts
            .lock()
            .unwrap()
            .remove(&scenario.name)
            .ok_or_else(|| anyhow::anyhow!("no script for {}", scenario.name))?;
        let mut session = ScriptedSession::new(results);
        session.delay = self
            .delays
            .get(&scenario.name)
            .copied()
            .unwrap_or(Duration::ZERO);
        Ok(session)
    }

    async fn close(&self, _session: ScriptedSession) {
        *self.closed.lock().unwrap() += 1;
    }
}

/// Returns the same scores for every URL.
pub struct FixedScorer(pub Option<QualityScores>);

impl QualityScorer for FixedScorer {
    async fn score(&self, _url: &str, _cookie_header: Option<&str>) -> Option<QualityScores> {
        self.0
    }
}

pub fn scores(performance: u8) -> QualityScores {
    QualityScores {
        performance,
        accessibility: 96,
        best_practices: 92,
        seo: 100,
    }
}
