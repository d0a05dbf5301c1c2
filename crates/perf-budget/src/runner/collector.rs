//! Explicit collection of scenario outcomes
//!
//! Scenarios may finish in any order. Each one owns a slot keyed by its
//! position in the suite, and the slots are merged once every scenario is
//! done, so the leaderboard always lists pages in suite order.

use super::ScenarioOutcome;

#[derive(Debug, Default)]
pub struct OutcomeCollector {
    slots: Vec<Option<ScenarioOutcome>>,
}

impl OutcomeCollector {
    /// A collector with one empty slot per scenario.
    pub fn new(scenarios: usize) -> Self {
        Self {
            slots: (0..scenarios).map(|_| None).collect(),
        }
    }

    /// Store the outcome of scenario `index`, growing the slots if needed.
    pub fn record(&mut self, index: usize, outcome: ScenarioOutcome) {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(outcome);
    }

    /// Number of scenarios that produced an outcome.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Outcomes in scenario order; scenarios that failed leave no entry.
    pub fn into_outcomes(self) -> Vec<ScenarioOutcome> {
        self.slots.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ScenarioSummary;

    fn outcome(name: &str) -> ScenarioOutcome {
        ScenarioOutcome {
            name: name.to_string(),
            url: format!("https://example.com/{}", name),
            label: name.to_string(),
            summary: ScenarioSummary::default(),
            breaches: Vec::new(),
        }
    }

    #[test]
    fn test_out_of_order_completion_is_merged_in_order() {
        let mut collector = OutcomeCollector::new(3);
        collector.record(2, outcome("c"));
        collector.record(0, outcome("a"));
        collector.record(1, outcome("b"));

        let names: Vec<String> = collector.into_outcomes().into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_slots_are_skipped() {
        let mut collector = OutcomeCollector::new(3);
        assert!(collector.is_empty());
        collector.record(1, outcome("b"));
        collector.record(4, outcome("e"));

        assert_eq!(collector.len(), 2);
        let names: Vec<String> = collector.into_outcomes().into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["b", "e"]);
    }
}
