//! Suite CSV export: one row per page with its worst value against budget

use super::leaderboard::{PageRow, TRACKED};
use crate::config::Thresholds;
use crate::runner::ScenarioOutcome;

/// CSV format reporter
pub struct CsvReporter;

impl CsvReporter {
    pub fn header() -> String {
        let mut columns = vec!["Page".to_string(), "URL".to_string()];
        for metric in TRACKED {
            columns.push(format!("Worst_{}", metric.column()));
            columns.push(format!("Budget_{}", metric.column()));
            columns.push(format!("Within_{}", metric.short_label()));
        }
        columns.push("Lighthouse_Perf".to_string());
        columns.push("Lighthouse_A11y".to_string());
        columns.join(",")
    }

    pub fn row(row: &PageRow, thresholds: &Thresholds) -> String {
        let mut fields = vec![escape(&row.page), escape(&row.url)];
        for metric in TRACKED {
            fields.push(number(row.worst(metric)));
            fields.push(number(metric.threshold(thresholds)));
            fields.push(
                row.within(metric, thresholds)
                    .map(|ok| ok.to_string())
                    .unwrap_or_default(),
            );
        }
        fields.push(number(row.quality_performance.map(f64::round)));
        fields.push(number(row.quality_accessibility.map(f64::round)));
        fields.join(",")
    }

    /// Header plus one line per outcome, newline separated.
    pub fn format(outcomes: &[ScenarioOutcome], thresholds: &Thresholds) -> String {
        let mut lines = vec![Self::header()];
        lines.extend(
            outcomes
                .iter()
                .map(|o| Self::row(&PageRow::from_outcome(o), thresholds)),
        );
        lines.join("\n")
    }
}

/// Quote a text field, doubling embedded quotes.
fn escape(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_thresholds;
    use crate::reporter::leaderboard::tests::outcome;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Cover Sheet (Edit)"), "\"Cover Sheet (Edit)\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_header_columns() {
        let header = CsvReporter::header();
        assert!(header.starts_with("Page,URL,Worst_LCP_ms,Budget_LCP_ms,Within_LCP,Worst_CLS,"));
        assert!(header.ends_with("Within_Requests,Lighthouse_Perf,Lighthouse_A11y"));
        assert_eq!(header.split(',').count(), 2 + TRACKED.len() * 3 + 2);
    }

    #[test]
    fn test_rows() {
        let thresholds = sample_thresholds();
        let outcomes = vec![
            outcome("Dashboard", 2000.0, 60, 1_500_000),
            outcome("Library", 3200.0, 90, 1_500_000),
        ];

        let csv = CsvReporter::format(&outcomes, &thresholds);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(
            "\"Dashboard\",\"https://portal.example.com/Dashboard\",2000,2500,true,0.01,0.1,true,"
        ));
        // No TTFB was measured: value and verdict stay empty, budget is kept
        assert!(lines[1].contains(",120,200,true,,600,,1500000,2000000,true,60,80,true,,"));
        assert!(lines[2].contains(",3200,2500,false,"));
        assert!(lines[2].contains(",90,80,false,,"));
    }
}
