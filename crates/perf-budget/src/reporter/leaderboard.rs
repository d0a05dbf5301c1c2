//! Suite-wide leaderboard of the worst-performing pages
//!
//! Every page is reduced to its worst observed value per metric and compared
//! against the default budgets, so pages with relaxed page-level budgets
//! still show up when they are slow.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

use super::format::{flag, format_count, status_icon};
use super::scenario::ReportContext;
use crate::config::{QualityFloors, Thresholds};
use crate::metrics::Metric;
use crate::runner::ScenarioOutcome;

const RULE: &str = "═══════════════════════════════════════════════════════";

/// Metrics with a suite pass rate, in display order.
pub const TRACKED: [Metric; 6] = [
    Metric::LargestContentfulPaint,
    Metric::CumulativeLayoutShift,
    Metric::TotalBlockingTime,
    Metric::Ttfb,
    Metric::TransferSize,
    Metric::RequestCount,
];

/// Metrics ranked in the "worst pages" sections.
const RANKED: [Metric; 3] = [
    Metric::LargestContentfulPaint,
    Metric::TotalBlockingTime,
    Metric::TransferSize,
];

const WORST_PAGES: usize = 5;

/// One page's worst values.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRow {
    pub page: String,
    pub url: String,
    pub worst: BTreeMap<Metric, f64>,
    /// Average Lighthouse performance score
    pub quality_performance: Option<f64>,
    /// Average Lighthouse accessibility score
    pub quality_accessibility: Option<f64>,
}

impl PageRow {
    pub fn from_outcome(outcome: &ScenarioOutcome) -> Self {
        let worst = Metric::LOAD
            .iter()
            .filter_map(|&m| outcome.summary.worst(m).map(|v| (m, v)))
            .collect();
        Self {
            page: outcome.name.clone(),
            url: outcome.url.clone(),
            worst,
            quality_performance: outcome.summary.average(Metric::QualityPerformance),
            quality_accessibility: outcome.summary.average(Metric::QualityAccessibility),
        }
    }

    pub fn worst(&self, metric: Metric) -> Option<f64> {
        self.worst.get(&metric).copied()
    }

    /// Whether the worst value is within `thresholds`, `None` when unmeasured.
    pub fn within(&self, metric: Metric, thresholds: &Thresholds) -> Option<bool> {
        let value = self.worst(metric)?;
        let limit = metric.threshold(thresholds)?;
        Some(metric.direction().within(value, limit))
    }
}

/// Share of pages whose worst value is within budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassRate {
    pub metric: Metric,
    pub passed: usize,
    pub total: usize,
}

impl PassRate {
    pub fn compute(rows: &[PageRow], metric: Metric, thresholds: &Thresholds) -> Self {
        let results: Vec<bool> = rows.iter().filter_map(|r| r.within(metric, thresholds)).collect();
        Self {
            metric,
            passed: results.iter().filter(|&&ok| ok).count(),
            total: results.len(),
        }
    }

    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.passed as f64 / self.total as f64 * 100.0).round() as u32
        }
    }
}

/// Pages over budget for `metric`, furthest over first.
pub fn worst_pages<'a>(
    rows: &'a [PageRow],
    metric: Metric,
    thresholds: &Thresholds,
) -> Vec<(&'a PageRow, f64)> {
    let Some(limit) = metric.threshold(thresholds) else {
        return Vec::new();
    };
    let mut over: Vec<(&PageRow, f64)> = rows
        .iter()
        .filter_map(|r| r.worst(metric).map(|v| (r, v - limit)))
        .filter(|(_, by)| *by > 0.0)
        .collect();
    over.sort_by(|a, b| b.1.total_cmp(&a.1));
    over.truncate(WORST_PAGES);
    over
}

/// Renders the suite leaderboard against the default budgets.
pub struct LeaderboardReporter<'a> {
    pub outcomes: &'a [ScenarioOutcome],
    pub thresholds: &'a Thresholds,
    pub context: &'a ReportContext,
}

impl LeaderboardReporter<'_> {
    pub fn rows(&self) -> Vec<PageRow> {
        self.outcomes.iter().map(PageRow::from_outcome).collect()
    }

    pub fn render(&self) -> Result<String> {
        let rows = self.rows();
        let floors = self.thresholds.quality_floors_or_default();
        let mut out = String::new();

        writeln!(out, "{}", RULE)?;
        writeln!(out, " Performance Overall Summary (worst run per page)")?;
        writeln!(out, " Pages: {}", rows.len())?;
        writeln!(out, " Profile: {}", self.context.profile())?;
        writeln!(out, " Budget Source: {}", self.context.budget_source)?;
        if self.context.lighthouse {
            writeln!(out, " Lighthouse: Enabled")?;
        }
        writeln!(out, "{}", RULE)?;

        writeln!(out)?;
        writeln!(out, " Suite pass-rate by budget:")?;
        for metric in TRACKED {
            let rate = PassRate::compute(&rows, metric, self.thresholds);
            let limit = metric.threshold(self.thresholds).unwrap_or_default();
            writeln!(
                out,
                "  • {:<8} {:>3}%  ({}/{})  budget {} {}",
                metric.short_label(),
                rate.percent(),
                rate.passed,
                rate.total,
                metric.direction().symbol(),
                metric.format(limit)
            )?;
        }

        if self.context.lighthouse {
            self.quality_section(&mut out, &rows, &floors)?;
        }

        writeln!(out)?;
        writeln!(out, " Per-page worst vs budget (✅ within | ⚠️ over):")?;
        for row in &rows {
            self.page_lines(&mut out, row, &floors)?;
        }

        for metric in RANKED {
            writeln!(out)?;
            writeln!(out, " Worst pages by {} (over budget):", metric.short_label())?;
            let worst = worst_pages(&rows, metric, self.thresholds);
            if worst.is_empty() {
                writeln!(out, "   None: all within budget ✅")?;
                continue;
            }
            let limit = metric.threshold(self.thresholds).unwrap_or_default();
            for (row, over) in worst {
                writeln!(
                    out,
                    "   - {} → {} (+{} over {})",
                    row.page,
                    metric.format(row.worst(metric).unwrap_or_default()),
                    metric.format(over),
                    metric.format(limit)
                )?;
            }
        }

        if looks_unauthenticated(&rows) {
            writeln!(out)?;
            writeln!(
                out,
                " ℹ️ Sanity note: very low requests/bytes on average. If this seems off, confirm pages are authenticated and assets are not blocked."
            )?;
        }

        write!(out, "{}", RULE)?;
        Ok(out)
    }

    fn quality_section(&self, out: &mut String, rows: &[PageRow], floors: &QualityFloors) -> Result<()> {
        let Some(performance) = mean(rows.iter().filter_map(|r| r.quality_performance)) else {
            return Ok(());
        };
        writeln!(out)?;
        writeln!(out, " Lighthouse Scores (site average):")?;
        writeln!(
            out,
            "  • Performance ..... {} {}",
            format_count(performance),
            status_icon(Some(performance.round()), floors.performance, Metric::QualityPerformance.direction())
        )?;
        if let Some(accessibility) = mean(rows.iter().filter_map(|r| r.quality_accessibility)) {
            writeln!(
                out,
                "  • Accessibility ... {} {}",
                format_count(accessibility),
                status_icon(
                    Some(accessibility.round()),
                    floors.accessibility,
                    Metric::QualityAccessibility.direction()
                )
            )?;
        }
        Ok(())
    }

    fn page_lines(&self, out: &mut String, row: &PageRow, floors: &QualityFloors) -> Result<()> {
        let cell = |metric: Metric| -> String {
            let limit = metric.threshold(self.thresholds).unwrap_or_default();
            format!(
                "{} {} {} ({} {})",
                metric.short_label(),
                row.worst(metric).map(|v| metric.format(v)).unwrap_or_else(|| "n/a".to_string()),
                flag(row.within(metric, self.thresholds)),
                metric.direction().symbol(),
                metric.format(limit)
            )
        };

        writeln!(out, "  - {}", row.page)?;
        writeln!(
            out,
            "     {} | {}",
            cell(Metric::LargestContentfulPaint),
            cell(Metric::CumulativeLayoutShift)
        )?;
        writeln!(
            out,
            "     {} | {}",
            cell(Metric::TotalBlockingTime),
            cell(Metric::TransferSize)
        )?;
        if let Some(score) = row.quality_performance {
            writeln!(
                out,
                "     Lighthouse Perf {} {} (≥ {})",
                format_count(score),
                flag(Some(score >= floors.performance)),
                format_count(floors.performance)
            )?;
        }
        Ok(())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Very few requests and bytes on average usually means login pages were measured.
fn looks_unauthenticated(rows: &[PageRow]) -> bool {
    if rows.is_empty() {
        return false;
    }
    let average = |metric: Metric| {
        rows.iter().map(|r| r.worst(metric).unwrap_or(0.0)).sum::<f64>() / rows.len() as f64
    };
    average(Metric::RequestCount) < 30.0 && average(Metric::TransferSize) < 1_000_000.0
}
