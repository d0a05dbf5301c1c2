//! Budget documents, suite files and environment-driven run settings
//!
//! Budgets are kept in a document with a required `default` section and
//! optional per-page overrides keyed by scenario label:
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
//!     "performance-dashboard": { "largestContentfulPaint": 3500 }
//!   }
//! }
//! ```
//!
//! The same layout is accepted as TOML when the file ends in `.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Fully resolved budgets for one scenario.
///
/// Lower-is-better metrics are ceilings; quality scores are floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Time to first byte ceiling (ms)
    pub ttfb: f64,
    /// DOMContentLoaded ceiling (ms)
    pub dom_content_loaded: f64,
    /// First Contentful Paint ceiling (ms)
    pub first_contentful_paint: f64,
    /// Largest Contentful Paint ceiling (ms)
    pub largest_contentful_paint: f64,
    /// Load event end ceiling (ms)
    pub load_event_end: f64,
    /// Cumulative Layout Shift ceiling (unitless)
    pub cumulative_layout_shift: f64,
    /// Total Blocking Time ceiling (ms)
    pub total_blocking_time: f64,
    /// Request count ceiling
    pub request_count: f64,
    /// Total transfer size ceiling (bytes)
    pub transfer_size: f64,
    /// Quality score floors; quality scores are not evaluated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighthouse: Option<QualityFloors>,
}

impl Thresholds {
    /// Overlay a partial override on top of these thresholds.
    pub fn overlay(&self, overrides: &ThresholdOverrides) -> Thresholds {
        let lighthouse = match (&self.lighthouse, &overrides.lighthouse) {
            (base, None) => base.clone(),
            (Some(base), Some(o)) => Some(base.overlay(o)),
            (None, Some(o)) => Some(QualityFloors::default().overlay(o)),
        };

        Thresholds {
            ttfb: overrides.ttfb.unwrap_or(self.ttfb),
            dom_content_loaded: overrides.dom_content_loaded.unwrap_or(self.dom_content_loaded),
            first_contentful_paint: overrides
                .first_contentful_paint
                .unwrap_or(self.first_contentful_paint),
            largest_contentful_paint: overrides
                .largest_contentful_paint
                .unwrap_or(self.largest_contentful_paint),
            load_event_end: overrides.load_event_end.unwrap_or(self.load_event_end),
            cumulative_layout_shift: overrides
                .cumulative_layout_shift
                .unwrap_or(self.cumulative_layout_shift),
            total_blocking_time: overrides.total_blocking_time.unwrap_or(self.total_blocking_time),
            request_count: overrides.request_count.unwrap_or(self.request_count),
            transfer_size: overrides.transfer_size.unwrap_or(self.transfer_size),
            lighthouse,
        }
    }

    /// Quality floors to show in reports, falling back to the stock floors.
    pub fn quality_floors_or_default(&self) -> QualityFloors {
        self.lighthouse.clone().unwrap_or_default()
    }
}

/// Minimum acceptable quality scores (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityFloors {
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
}

impl Default for QualityFloors {
    fn default() -> Self {
        Self {
            performance: 75.0,
            accessibility: 90.0,
            best_practices: 80.0,
            seo: 90.0,
        }
    }
}

impl QualityFloors {
    fn overlay(&self, o: &QualityOverrides) -> QualityFloors {
        QualityFloors {
            performance: o.performance.unwrap_or(self.performance),
            accessibility: o.accessibility.unwrap_or(self.accessibility),
            best_practices: o.best_practices.unwrap_or(self.best_practices),
            seo: o.seo.unwrap_or(self.seo),
        }
    }
}

/// Partial thresholds used for page and scenario overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThresholdOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttfb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom_content_loaded: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_contentful_paint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_contentful_paint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_event_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_layout_shift: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_blocking_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse: Option<QualityOverrides>,
}

/// Partial quality floors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityOverrides {
    pub performance: Option<f64>,
    pub accessibility: Option<f64>,
    pub best_practices: Option<f64>,
    pub seo: Option<f64>,
}

/// On-disk shape of the budget document, before validation.
#[derive(Debug, Deserialize)]
struct BudgetDocument {
    default: Option<Thresholds>,
    #[serde(default)]
    pages: BTreeMap<String, ThresholdOverrides>,
}

/// Validated budget document.
#[derive(Debug, Clone, PartialEq)]
pub struct Budgets {
    /// Thresholds applied to every page
    pub default: Thresholds,
    /// Overrides keyed by scenario label
    pub pages: BTreeMap<String, ThresholdOverrides>,
    /// Where the document came from, shown in reports
    pub source: String,
}

impl Budgets {
    /// Load budgets from a JSON or TOML file (chosen by extension).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or has
    /// no `default` section.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut budgets = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };
        budgets.source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(
            path = %path.display(),
            page_overrides = budgets.pages.len(),
            "Loaded performance budgets"
        );
        Ok(budgets)
    }

    /// Parse a JSON budget document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let doc: BudgetDocument =
            serde_json::from_str(s).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::validate(doc)
    }

    /// Parse a TOML budget document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let doc: BudgetDocument =
            toml::from_str(s).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::validate(doc)
    }

    fn validate(doc: BudgetDocument) -> Result<Self, ConfigError> {
        let default = doc.default.ok_or(ConfigError::MissingDefault)?;
        Ok(Self {
            default,
            pages: doc.pages,
            source: "inline document".to_string(),
        })
    }

    /// Whether the document carries page-specific budgets for `label`.
    pub fn has_page_override(&self, label: &str) -> bool {
        self.pages.contains_key(label)
    }

    /// Resolve the thresholds for a scenario.
    ///
    /// Precedence, lowest to highest: default section, page section for the
    /// scenario's label, overrides declared on the scenario itself.
    pub fn resolve(&self, scenario: &Scenario) -> Thresholds {
        let mut thresholds = self.default.clone();
        if let Some(page) = self.pages.get(&scenario.label) {
            thresholds = thresholds.overlay(page);
        }
        if let Some(own) = &scenario.thresholds {
            thresholds = thresholds.overlay(own);
        }
        thresholds
    }
}

/// One tested page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human readable page name
    pub name: String,
    /// Absolute URL to measure
    pub url: String,
    /// Stable label used for budget lookup and artifact names
    pub label: String,
    /// Scenario-level threshold overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdOverrides>,
}

/// Suite file listing the pages to measure.
///
/// ```toml
/// [suite]
/// name = "Assessment portal"
/// base_url = "https://portal.example.com/app"
/// parallel_sessions = 2
///
/// [[pages]]
/// name = "Dashboard"
/// path = "/Dashboard"
/// label = "performance-dashboard"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub suite: SuiteSettings,
    pub pages: Vec<PageEntry>,
}

/// Suite-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSettings {
    /// Name of the suite
    pub name: String,
    /// Base URL for relative page paths
    pub base_url: String,
    /// Number of scenarios measured concurrently, each in its own page (default: 1)
    #[serde(default = "default_parallel_sessions")]
    pub parallel_sessions: u32,
    /// Storage-state file with session cookies
    #[serde(default)]
    pub storage_state: Option<PathBuf>,
}

fn default_parallel_sessions() -> u32 {
    1
}

/// A page entry in the suite file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub name: String,
    /// Path relative to `base_url`, or an absolute URL
    pub path: String,
    pub label: String,
    #[serde(default)]
    pub thresholds: Option<ThresholdOverrides>,
}

impl SuiteConfig {
    /// Load a suite from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse a suite from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// The suite's pages as scenarios with absolute URLs.
    pub fn scenarios(&self) -> Vec<Scenario> {
        self.pages
            .iter()
            .map(|page| Scenario {
                name: page.name.clone(),
                url: join_url(&self.suite.base_url, &page.path),
                label: page.label.clone(),
                thresholds: page.thresholds.clone(),
            })
            .collect()
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Settings taken from the process environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSettings {
    /// Page loads per scenario, the first one cold (`PERF_RUNS`, default 2)
    pub runs_per_page: u32,
    /// Run the external quality audit (`PERF_LIGHTHOUSE`, disabled by `"0"`)
    pub lighthouse: bool,
    /// Apply the constrained CPU/network profile (`PERF_CONSTRAINED=1`)
    pub constrained: bool,
    /// Multiplier for the cold-run TTFB budget (`PERF_COLD_FACTOR`, default 1.25)
    pub cold_factor: f64,
    /// Explicit cold-run TTFB budget in ms (`PERF_TTFB_COLD`)
    pub cold_ttfb: Option<f64>,
    /// Storage-state file with session cookies (`FRONTEND_STATE`)
    pub storage_state: Option<PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            runs_per_page: 2,
            lighthouse: true,
            constrained: false,
            cold_factor: 1.25,
            cold_ttfb: None,
            storage_state: None,
        }
    }
}

impl RunSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let runs_per_page = match lookup("PERF_RUNS") {
            Some(v) => {
                let runs = parse_number::<f64>("PERF_RUNS", &v)?;
                if !runs.is_finite() || runs > u32::MAX as f64 {
                    return Err(invalid_env("PERF_RUNS", &v));
                }
                runs.max(1.0) as u32
            }
            None => defaults.runs_per_page,
        };

        let cold_factor = match lookup("PERF_COLD_FACTOR") {
            Some(v) => parse_non_negative("PERF_COLD_FACTOR", &v)?,
            None => defaults.cold_factor,
        };

        let cold_ttfb = lookup("PERF_TTFB_COLD")
            .map(|v| parse_non_negative("PERF_TTFB_COLD", &v))
            .transpose()?;

        Ok(Self {
            runs_per_page,
            lighthouse: lookup("PERF_LIGHTHOUSE").as_deref() != Some("0"),
            constrained: lookup("PERF_CONSTRAINED").as_deref() == Some("1"),
            cold_factor,
            cold_ttfb,
            storage_state: lookup("FRONTEND_STATE").map(PathBuf::from),
        })
    }

    /// TTFB budget for the cold attempt: the explicit override, or the
    /// document's default TTFB budget scaled by the cold factor. Pass
    /// `Budgets::default`; page overrides do not move the cold allowance.
    pub fn cold_ttfb_budget(&self, thresholds: &Thresholds) -> f64 {
        self.cold_ttfb
            .unwrap_or_else(|| (thresholds.ttfb * self.cold_factor).round())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid_env(name, value))
}

/// A finite number of zero or more.
fn parse_non_negative(name: &str, value: &str) -> Result<f64, ConfigError> {
    let number: f64 = parse_number(name, value)?;
    if number.is_finite() && number >= 0.0 {
        Ok(number)
    } else {
        Err(invalid_env(name, value))
    }
}

fn invalid_env(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn sample_thresholds() -> Thresholds {
        Thresholds {
            ttfb: 600.0,
            dom_content_loaded: 2500.0,
            first_contentful_paint: 1800.0,
            largest_contentful_paint: 2500.0,
            load_event_end: 4000.0,
            cumulative_layout_shift: 0.1,
            total_blocking_time: 200.0,
            request_count: 80.0,
            transfer_size: 2_000_000.0,
            lighthouse: Some(QualityFloors::default()),
        }
    }

    const BUDGETS_JSON: &str = r#"{
        "default": {
            "ttfb": 600, "domContentLoaded": 2500, "firstContentfulPaint": 1800,
            "largestContentfulPaint": 2500, "loadEventEnd": 4000,
            "cumulativeLayoutShift": 0.1, "totalBlockingTime": 200,
            "requestCount": 80, "transferSize": 2000000,
            "lighthouse": { "performance": 75, "accessibility": 90, "bestPractices": 80, "seo": 90 }
        },
        "pages": {
            "performance-dashboard": { "largestContentfulPaint": 3500, "lighthouse": { "seo": 50 } }
        }
    }"#;

    fn scenario(label: &str) -> Scenario {
        Scenario {
            name: "Dashboard".to_string(),
            url: "https://example.com/dashboard".to_string(),
            label: label.to_string(),
            thresholds: None,
        }
    }

    #[test]
    fn test_parse_budget_document() {
        let budgets = Budgets::from_json_str(BUDGETS_JSON).unwrap();
        assert_eq!(budgets.default, sample_thresholds());
        assert!(budgets.has_page_override("performance-dashboard"));
        assert!(!budgets.has_page_override("performance-library"));
    }

    #[test]
    fn test_missing_default_is_fatal() {
        let err = Budgets::from_json_str(r#"{ "pages": {} }"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDefault));
    }

    #[test]
    fn test_malformed_document() {
        let err = Budgets::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_resolve_overlays_page_then_scenario() {
        let budgets = Budgets::from_json_str(BUDGETS_JSON).unwrap();

        let mut s = scenario("performance-dashboard");
        s.thresholds = Some(ThresholdOverrides {
            ttfb: Some(900.0),
            ..Default::default()
        });

        let resolved = budgets.resolve(&s);
        assert_eq!(resolved.largest_contentful_paint, 3500.0);
        assert_eq!(resolved.ttfb, 900.0);
        assert_eq!(resolved.first_contentful_paint, 1800.0);

        let floors = resolved.lighthouse.unwrap();
        assert_eq!(floors.seo, 50.0);
        assert_eq!(floors.performance, 75.0);
    }

    #[test]
    fn test_resolve_without_page_section_is_default() {
        let budgets = Budgets::from_json_str(BUDGETS_JSON).unwrap();
        assert_eq!(budgets.resolve(&scenario("unknown")), budgets.default);
    }

    #[test]
    fn test_parse_toml_budgets() {
        let toml = r#"
            [default]
            ttfb = 600.0
            domContentLoaded = 2500.0
            firstContentfulPaint = 1800.0
            largestContentfulPaint = 2500.0
            loadEventEnd = 4000.0
            cumulativeLayoutShift = 0.1
            totalBlockingTime = 200.0
            requestCount = 80.0
            transferSize = 2000000.0

            [pages.performance-indicator]
            requestCount = 120.0
        "#;

        let budgets = Budgets::from_toml_str(toml).unwrap();
        assert_eq!(budgets.default.lighthouse, None);
        assert_eq!(budgets.pages["performance-indicator"].request_count, Some(120.0));
    }

    #[test]
    fn test_budgets_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("performance-budgets.json");
        std::fs::write(&path, BUDGETS_JSON).unwrap();

        let budgets = Budgets::from_file(&path).unwrap();
        assert_eq!(budgets.default.ttfb, 600.0);
        assert_eq!(budgets.source, "performance-budgets.json");

        let missing = Budgets::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn test_parse_suite_config() {
        let toml = r#"
            [suite]
            name = "Portal"
            base_url = "https://example.com/app/"

            [[pages]]
            name = "Dashboard"
            path = "/Dashboard"
            label = "performance-dashboard"

            [[pages]]
            name = "Library"
            path = "Library?id=42"
            label = "performance-library"
            thresholds = { requestCount = 150.0 }

            [[pages]]
            name = "External"
            path = "https://other.example.com/page"
            label = "performance-external"
        "#;

        let suite = SuiteConfig::from_str(toml).unwrap();
        assert_eq!(suite.suite.parallel_sessions, 1);
        assert_eq!(suite.suite.storage_state, None);

        let scenarios = suite.scenarios();
        assert_eq!(scenarios[0].url, "https://example.com/app/Dashboard");
        assert_eq!(scenarios[1].url, "https://example.com/app/Library?id=42");
        assert_eq!(scenarios[2].url, "https://other.example.com/page");
        assert_eq!(
            scenarios[1].thresholds.as_ref().unwrap().request_count,
            Some(150.0)
        );
    }

    #[test]
    fn test_run_settings_defaults() {
        let settings = RunSettings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, RunSettings::default());
        assert_eq!(settings.cold_ttfb_budget(&sample_thresholds()), 750.0);
    }

    #[test]
    fn test_run_settings_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("PERF_RUNS", "4"),
            ("PERF_LIGHTHOUSE", "0"),
            ("PERF_CONSTRAINED", "1"),
            ("PERF_COLD_FACTOR", "2"),
            ("FRONTEND_STATE", "state.json"),
        ]
        .into_iter()
        .collect();

        let settings =
            RunSettings::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.runs_per_page, 4);
        assert!(!settings.lighthouse);
        assert!(settings.constrained);
        assert_eq!(settings.cold_ttfb_budget(&sample_thresholds()), 1200.0);
        assert_eq!(settings.storage_state, Some(PathBuf::from("state.json")));
    }

    #[test]
    fn test_run_settings_clamps_runs_and_honours_cold_override() {
        let settings = RunSettings::from_lookup(|name| match name {
            "PERF_RUNS" => Some("0".to_string()),
            "PERF_TTFB_COLD" => Some("1000".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.runs_per_page, 1);
        assert_eq!(settings.cold_ttfb_budget(&sample_thresholds()), 1000.0);
    }

    #[test]
    fn test_run_settings_rejects_garbage() {
        let err = RunSettings::from_lookup(|name| {
            (name == "PERF_RUNS").then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    fn single_var(name: &'static str, value: &'static str) -> Result<RunSettings, ConfigError> {
        RunSettings::from_lookup(|n| (n == name).then(|| value.to_string()))
    }

    #[test]
    fn test_run_settings_rejects_unbounded_runs() {
        for value in ["inf", "-inf", "NaN", "1e12", "4294967296"] {
            match single_var("PERF_RUNS", value) {
                Err(ConfigError::InvalidEnv { name, .. }) => assert_eq!(name, "PERF_RUNS"),
                other => panic!("PERF_RUNS={} should be rejected, got {:?}", value, other),
            }
        }
        assert_eq!(single_var("PERF_RUNS", "4294967295").unwrap().runs_per_page, u32::MAX);
        assert_eq!(single_var("PERF_RUNS", "-3").unwrap().runs_per_page, 1);
    }

    #[test]
    fn test_run_settings_rejects_bad_cold_factor() {
        for value in ["NaN", "inf", "-0.5"] {
            match single_var("PERF_COLD_FACTOR", value) {
                Err(ConfigError::InvalidEnv { name, value: got }) => {
                    assert_eq!(name, "PERF_COLD_FACTOR");
                    assert_eq!(got, value);
                }
                other => panic!("PERF_COLD_FACTOR={} should be rejected, got {:?}", value, other),
            }
        }
        let zero = single_var("PERF_COLD_FACTOR", "0").unwrap();
        assert_eq!(zero.cold_ttfb_budget(&sample_thresholds()), 0.0);
    }

    #[test]
    fn test_run_settings_rejects_bad_cold_ttfb() {
        for value in ["NaN", "inf", "-1"] {
            match single_var("PERF_TTFB_COLD", value) {
                Err(ConfigError::InvalidEnv { name, .. }) => assert_eq!(name, "PERF_TTFB_COLD"),
                other => panic!("PERF_TTFB_COLD={} should be rejected, got {:?}", value, other),
            }
        }
        assert_eq!(single_var("PERF_TTFB_COLD", "0").unwrap().cold_ttfb, Some(0.0));
    }
}
