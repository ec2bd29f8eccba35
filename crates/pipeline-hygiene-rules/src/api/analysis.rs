//! Evaluation analysis types.
//!
//! This module provides per-rule breakdowns of an evaluation pass, the
//! report that collects them, and record-level views that list every
//! violation a single row accumulated.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use pipeline_hygiene_core::{Locale, RowKey, RuleId};

use super::violation::Violation;

/// Per-rule breakdown in an evaluation report.
#[derive(Debug, Clone)]
pub struct RuleAnalysis {
    /// Rule that was evaluated.
    pub rule: RuleId,
    /// All violations produced by this rule.
    pub violations: Vec<Violation>,
    /// Wall-clock time spent in the rule.
    pub duration: Duration,
}

impl RuleAnalysis {
    /// Creates a new rule analysis.
    pub fn new(rule: RuleId, violations: Vec<Violation>, duration: Duration) -> Self {
        Self {
            rule,
            violations,
            duration,
        }
    }

    /// Returns the number of matches.
    pub fn match_count(&self) -> usize {
        self.violations.len()
    }

    /// Returns the rule title.
    pub fn title(&self, locale: Locale) -> &'static str {
        self.rule.title(locale)
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Complete result of one evaluation pass.
///
/// Analyses are kept in catalog order and each analysis's violations are
/// sorted by record id then row key, so iteration order is stable across
/// runs on identical input.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    /// The "today" the pass was evaluated against.
    pub reference_date: NaiveDate,
    /// Number of records in the evaluated dataset.
    pub record_count: usize,
    /// Per-rule breakdown.
    pub rule_analyses: Vec<RuleAnalysis>,
}

impl EvaluationReport {
    /// Creates a report, normalizing the order of its contents.
    pub fn new(
        reference_date: NaiveDate,
        record_count: usize,
        mut rule_analyses: Vec<RuleAnalysis>,
    ) -> Self {
        rule_analyses.sort_by_key(|analysis| analysis.rule);
        for analysis in &mut rule_analyses {
            analysis
                .violations
                .sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        }
        Self {
            reference_date,
            record_count,
            rule_analyses,
        }
    }

    /// Returns the total match count across all rules.
    pub fn total_match_count(&self) -> usize {
        self.rule_analyses.iter().map(|a| a.match_count()).sum()
    }

    /// Returns the match count for one rule; zero when it did not run.
    pub fn match_count(&self, rule: RuleId) -> usize {
        self.analysis(rule).map_or(0, RuleAnalysis::match_count)
    }

    pub fn analysis(&self, rule: RuleId) -> Option<&RuleAnalysis> {
        self.rule_analyses.iter().find(|a| a.rule == rule)
    }

    /// Returns rules that fired at least once.
    pub fn fired_rules(&self) -> Vec<RuleId> {
        self.rule_analyses
            .iter()
            .filter(|a| a.match_count() > 0)
            .map(|a| a.rule)
            .collect()
    }

    /// Returns all violations in catalog order, then record id, then row key.
    pub fn violations(&self) -> Vec<&Violation> {
        self.rule_analyses
            .iter()
            .flat_map(|a| &a.violations)
            .collect()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.rule_analyses
            .into_iter()
            .flat_map(RuleAnalysis::into_violations)
            .collect()
    }

    /// Groups violations by the row that produced them.
    pub fn by_record(&self) -> RecordViolationMap {
        RecordViolationMap::from_violations(self.violations().into_iter().cloned())
    }
}

/// All violations accumulated by one row.
#[derive(Debug, Clone)]
pub struct RecordViolations {
    pub key: RowKey,
    pub record_id: Option<String>,
    /// Violations in catalog order.
    pub violations: Vec<Violation>,
}

impl RecordViolations {
    pub fn new(key: RowKey, record_id: Option<String>) -> Self {
        Self {
            key,
            record_id,
            violations: Vec::new(),
        }
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
        self.violations.sort_by_key(|v| v.rule);
    }

    pub fn match_count(&self) -> usize {
        self.violations.len()
    }

    /// Returns the distinct rules this row violated.
    pub fn rules(&self) -> Vec<RuleId> {
        let mut rules: Vec<RuleId> = self.violations.iter().map(|v| v.rule).collect();
        rules.dedup();
        rules
    }

    pub fn has(&self, rule: RuleId) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

/// Violations keyed by row.
#[derive(Debug, Clone, Default)]
pub struct RecordViolationMap {
    records: BTreeMap<RowKey, RecordViolations>,
}

impl RecordViolationMap {
    pub fn from_violations<I>(violations: I) -> Self
    where
        I: IntoIterator<Item = Violation>,
    {
        let mut records: BTreeMap<RowKey, RecordViolations> = BTreeMap::new();
        for violation in violations {
            records
                .entry(violation.key)
                .or_insert_with(|| RecordViolations::new(violation.key, violation.record_id.clone()))
                .add(violation);
        }
        Self { records }
    }

    pub fn get(&self, key: RowKey) -> Option<&RecordViolations> {
        self.records.get(&key)
    }

    /// Iterates rows in row-key order.
    pub fn iter(&self) -> impl Iterator<Item = &RecordViolations> {
        self.records.values()
    }

    /// Returns rows sorted by most violations first.
    pub fn worst_records(&self) -> Vec<&RecordViolations> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| b.match_count().cmp(&a.match_count()).then(a.key.cmp(&b.key)));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
