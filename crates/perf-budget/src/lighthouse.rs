//! External page-quality scoring
//!
//! Quality scores come from a Lighthouse audit of the page. The audit is
//! optional and never fatal: any failure is logged and the scenario simply
//! has no quality scores.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::metrics::QualityScores;

/// Lighthouse categories requested from the audit.
pub const CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

/// Produces 0-100 quality scores for a URL.
pub trait QualityScorer: Send + Sync {
    /// Score `url`, sending `cookie_header` with every request when present.
    ///
    /// Returns `None` when the audit fails or yields no categories.
    fn score(
        &self,
        url: &str,
        cookie_header: Option<&str>,
    ) -> impl Future<Output = Option<QualityScores>> + Send;
}

/// Runs the `lighthouse` command line tool against a fresh headless Chrome.
#[derive(Debug, Clone)]
pub struct LighthouseCli {
    binary: String,
    timeout: Duration,
}

impl Default for LighthouseCli {
    fn default() -> Self {
        Self {
            binary: "lighthouse".to_string(),
            timeout: Duration::from_secs(180),
        }
    }
}

impl LighthouseCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Command line arguments for one audit.
    pub fn args(&self, url: &str, cookie_header: Option<&str>) -> Vec<String> {
        let mut args = vec![
            url.to_string(),
            "--output=json".to_string(),
            "--output-path=stdout".to_string(),
            "--quiet".to_string(),
            format!("--only-categories={}", CATEGORIES.join(",")),
            "--chrome-flags=--headless --disable-gpu".to_string(),
        ];
        if let Some(cookie) = cookie_header {
            let headers = serde_json::json!({ "Cookie": cookie });
            args.push(format!("--extra-headers={}", headers));
        }
        args
    }

    async fn audit(&self, url: &str, cookie_header: Option<&str>) -> Result<Value> {
        let output = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new(&self.binary)
                .args(self.args(url, cookie_header))
                .kill_on_drop(true)
                .output(),
        )
        .await
        .with_context(|| format!("Lighthouse timed out after {:?}", self.timeout))?
        .with_context(|| format!("Failed to execute {}", self.binary))?;

        if !output.status.success() {
            bail!(
                "Lighthouse failed (exit {}): {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        serde_json::from_slice(&output.stdout).context("Failed to parse Lighthouse JSON report")
    }
}

impl QualityScorer for LighthouseCli {
    #[instrument(skip(self, cookie_header))]
    async fn score(&self, url: &str, cookie_header: Option<&str>) -> Option<QualityScores> {
        debug!("Running Lighthouse audit");
        match self.audit(url, cookie_header).await {
            Ok(report) => {
                let scores = scores_from_report(&report);
                if scores.is_none() {
                    warn!("Lighthouse report has no categories");
                }
                scores
            }
            Err(e) => {
                warn!("Lighthouse audit failed: {:#}", e);
                None
            }
        }
    }
}

/// Extract category scores from a Lighthouse JSON report.
///
/// Accepts either the bare result or one wrapped in `lhr`. A missing category
/// scores 0; a report without categories has no scores.
pub fn scores_from_report(report: &Value) -> Option<QualityScores> {
    let categories = report
        .get("lhr")
        .unwrap_or(report)
        .get("categories")?
        .as_object()?;

    let score = |name: &str| -> u8 {
        let raw = categories
            .get(name)
            .and_then(|c| c.get("score"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        (raw * 100.0).round().clamp(0.0, 100.0) as u8
    };

    Some(QualityScores {
        performance: score("performance"),
        accessibility: score("accessibility"),
        best_practices: score("best-practices"),
        seo: score("seo"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scores_are_rounded_percentages() {
        let report = json!({
            "categories": {
                "performance": { "score": 0.634 },
                "accessibility": { "score": 0.92 },
                "best-practices": { "score": 1.0 },
                "seo": { "score": 0.875 }
            }
        });

        let scores = scores_from_report(&report).unwrap();
        assert_eq!(scores.performance, 63);
        assert_eq!(scores.accessibility, 92);
        assert_eq!(scores.best_practices, 100);
        assert_eq!(scores.seo, 88);
    }

    #[test]
    fn test_missing_category_scores_zero() {
        let report = json!({
            "lhr": { "categories": { "performance": { "score": 0.5 }, "seo": { "score": null } } }
        });

        let scores = scores_from_report(&report).unwrap();
        assert_eq!(scores.performance, 50);
        assert_eq!(scores.accessibility, 0);
        assert_eq!(scores.seo, 0);
    }

    #[test]
    fn test_no_categories_means_no_scores() {
        assert!(scores_from_report(&json!({ "lhr": {} })).is_none());
        assert!(scores_from_report(&json!({})).is_none());
    }

    #[test]
    fn test_cli_arguments() {
        let cli = LighthouseCli::default();
        let args = cli.args("https://example.com/", Some("sid=abc; pref=dark"));

        assert_eq!(args[0], "https://example.com/");
        assert!(args.contains(&"--output=json".to_string()));
        assert!(args.contains(
            &"--only-categories=performance,accessibility,best-practices,seo".to_string()
        ));
        assert_eq!(
            args.last().unwrap(),
            r#"--extra-headers={"Cookie":"sid=abc; pref=dark"}"#
        );
        assert!(!cli.args("https://example.com/", None)
            .iter()
            .any(|a| a.starts_with("--extra-headers")));
    }

    #[tokio::test]
    async fn test_missing_binary_is_not_fatal() {
        let cli = LighthouseCli::new("perf-budget-no-such-lighthouse-binary")
            .with_timeout(Duration::from_secs(5));
        assert!(cli.score("https://example.com/", None).await.is_none());
    }
}
