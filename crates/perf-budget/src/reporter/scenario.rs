//! Line-oriented report for one scenario

use anyhow::Result;
use std::fmt::Write;

use super::format::{format_count, format_ms, or_na, status_icon};
use crate::budget::{Breach, BudgetEvaluator};
use crate::config::{Scenario, Thresholds};
use crate::metrics::{Metric, Sample, SlowResource};
use crate::stats::ScenarioSummary;

const RULE: &str = "═══════════════════════════════════════════════════════";

/// Slow resources listed under each run.
const SLOW_PER_RUN: usize = 3;

/// How the suite was run, shown in report headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportContext {
    pub constrained: bool,
    pub lighthouse: bool,
    /// Where the thresholds were loaded from
    pub budget_source: String,
    /// Whether the budget document overrides this scenario's thresholds
    pub page_override: bool,
    /// TTFB budget of the cold attempt, when it differs from the regular one
    pub cold_ttfb: Option<f64>,
}

impl ReportContext {
    pub fn profile(&self) -> &'static str {
        if self.constrained {
            "Constrained (Slow 4G + 4× CPU)"
        } else {
            "Default"
        }
    }
}

/// Everything one scenario's report is rendered from.
pub struct ScenarioReport<'a> {
    pub scenario: &'a Scenario,
    pub samples: &'a [Sample],
    pub summary: &'a ScenarioSummary,
    pub thresholds: &'a Thresholds,
    pub breaches: &'a [Breach],
    pub context: &'a ReportContext,
}

impl ScenarioReport<'_> {
    /// Render the report. Rendering the same inputs twice yields the same text.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();

        // Quality floors are always shown, even when they are not enforced.
        let mut shown = self.thresholds.clone();
        shown.lighthouse = Some(self.thresholds.quality_floors_or_default());
        let mut evaluator = BudgetEvaluator::new(&shown);
        if let Some(cold) = self.context.cold_ttfb {
            evaluator = evaluator.with_cold_ttfb(cold);
        }

        self.header(&mut out)?;
        for sample in self.samples {
            self.run_section(&mut out, sample, &evaluator)?;
        }
        self.aggregate_section(&mut out, &shown)?;
        self.footer(&mut out)?;

        Ok(out)
    }

    fn header(&self, out: &mut String) -> Result<()> {
        let labels: Vec<&str> = self.samples.iter().map(|s| s.run_label.as_str()).collect();
        writeln!(out, "{}", RULE)?;
        writeln!(out, " Performance Report: {}", self.scenario.name)?;
        writeln!(out, " URL: {}", self.scenario.url)?;
        writeln!(out, " Runs: {} ({})", self.samples.len(), labels.join(", "))?;
        writeln!(out, " Profile: {}", self.context.profile())?;
        if self.context.lighthouse {
            writeln!(out, " Lighthouse: Enabled")?;
        }
        writeln!(out, "{}", RULE)?;
        Ok(())
    }

    fn run_section(
        &self,
        out: &mut String,
        sample: &Sample,
        evaluator: &BudgetEvaluator<'_>,
    ) -> Result<()> {
        writeln!(out)?;
        writeln!(out, " {}", sample.run_label)?;

        for metric in Metric::LOAD {
            let value = metric.value(sample);
            writeln!(
                out,
                "   • {} {} {}",
                dotted(metric.label(), 26),
                or_na(value, |v| metric.format(v)),
                icon(metric, value, evaluator.threshold_for(metric, sample)),
            )?;
        }

        if sample.quality.is_some() {
            writeln!(out, "   • Lighthouse Scores:")?;
            for metric in Metric::QUALITY {
                let value = metric.value(sample);
                writeln!(
                    out,
                    "       {} {} {}",
                    dotted(quality_name(metric), 19),
                    or_na(value, format_count),
                    icon(metric, value, evaluator.threshold_for(metric, sample)),
                )?;
            }
        }

        let slow: Vec<&SlowResource> = sample.slowest_resources.iter().take(SLOW_PER_RUN).collect();
        if !slow.is_empty() {
            writeln!(out, "   • Slow resources (>300ms):")?;
            for resource in slow {
                writeln!(
                    out,
                    "       - {} {:<8} {}",
                    format_ms(resource.entry.duration),
                    resource.entry.initiator_type,
                    resource.entry.name
                )?;
            }
        }
        Ok(())
    }

    fn aggregate_section(&self, out: &mut String, shown: &Thresholds) -> Result<()> {
        writeln!(out)?;
        writeln!(out, " Aggregate view (average | worst)")?;
        for metric in Metric::LOAD {
            match self.summary.get(metric) {
                None => writeln!(out, "   • {:<24} n/a", metric.label())?,
                Some(stat) => {
                    let worst = stat.worst(metric.direction());
                    writeln!(
                        out,
                        "   • {:<24} avg {} | worst {} {}",
                        metric.label(),
                        metric.format(stat.average),
                        metric.format(worst),
                        icon(metric, Some(worst), metric.threshold(shown)),
                    )?
                }
            }
        }

        let quality: Vec<(Metric, f64)> = Metric::QUALITY
            .iter()
            .filter_map(|&m| self.summary.average(m).map(|avg| (m, avg)))
            .collect();
        if !quality.is_empty() {
            writeln!(out)?;
            writeln!(out, " Lighthouse Scores (average)")?;
            for (metric, average) in quality {
                writeln!(
                    out,
                    "   • {} {} {}",
                    dotted(quality_name(metric), 21),
                    format_count(average),
                    icon(metric, Some(average), metric.threshold(shown)),
                )?;
            }
        }
        Ok(())
    }

    fn footer(&self, out: &mut String) -> Result<()> {
        writeln!(out)?;
        if self.summary.slowest_resources.is_empty() {
            writeln!(out, " No resources above 300ms detected.")?;
        } else {
            writeln!(out, " Global slow resources (top 5)")?;
            for resource in &self.summary.slowest_resources {
                writeln!(
                    out,
                    "   - {} {:<8} {} ({})",
                    format_ms(resource.entry.duration),
                    resource.entry.initiator_type,
                    resource.entry.name,
                    resource.run_label
                )?;
            }
        }

        writeln!(out)?;
        if self.breaches.is_empty() {
            writeln!(out, " All tracked metrics are within budgets ✅")?;
        } else {
            writeln!(out, " Alerts / exceeds budget")?;
            for breach in self.breaches {
                writeln!(out, "   ⚠️  {}", breach)?;
            }
        }

        writeln!(out)?;
        writeln!(out, " Budget Configuration")?;
        writeln!(out, "   Source: {}", self.context.budget_source)?;
        if self.context.page_override {
            writeln!(out, "   Page-specific budgets applied for: {}", self.scenario.label)?;
        }
        if let Some(cold) = self.context.cold_ttfb {
            writeln!(out, "   Cold start TTFB budget: ≤ {}", format_ms(cold))?;
        }

        writeln!(out)?;
        writeln!(
            out,
            " INP note: This suite validates load; measure INP via RUM or add a synthetic interaction step if needed."
        )?;
        write!(out, "{}", RULE)?;
        Ok(())
    }
}

fn icon(metric: Metric, value: Option<f64>, threshold: Option<f64>) -> &'static str {
    match threshold {
        Some(t) => status_icon(value, t, metric.direction()),
        None => "•",
    }
}

/// `label` followed by a dot leader up to `width` characters.
fn dotted(label: &str, width: usize) -> String {
    format!("{:.<width$}", format!("{} ", label), width = width)
}

fn quality_name(metric: Metric) -> &'static str {
    match metric {
        Metric::QualityPerformance => "Performance",
        Metric::QualityAccessibility => "Accessibility",
        Metric::QualityBestPractices => "Best Practices",
        Metric::QualitySeo => "SEO",
        other => other.label(),
    }
}
