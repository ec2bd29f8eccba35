// Violation groups and their summary statistics.

use std::collections::{BTreeMap, BTreeSet};

use pipeline_hygiene_config::PriorityConfig;
use pipeline_hygiene_core::{OpportunityDataset, RuleId, Stage};

use super::priority::Priority;
use crate::api::Violation;

/// How partner-finalized violations split by partner stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizedBreakdown {
    pub launched: usize,
    pub closed_lost: usize,
}

impl FinalizedBreakdown {
    pub fn total(&self) -> usize {
        self.launched + self.closed_lost
    }
}

/// Per-group statistics. Re-derived from the violations, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub total: usize,
    pub distinct_partners: usize,
    pub per_rule: BTreeMap<RuleId, usize>,
    pub priority: Priority,
    finalized: FinalizedBreakdown,
}

impl GroupSummary {
    pub(crate) fn compute(
        violations: &[Violation],
        dataset: &OpportunityDataset,
        thresholds: &PriorityConfig,
    ) -> Self {
        let mut per_rule: BTreeMap<RuleId, usize> = BTreeMap::new();
        let mut partners: BTreeSet<&str> = BTreeSet::new();
        let mut finalized = FinalizedBreakdown::default();

        for violation in violations {
            *per_rule.entry(violation.rule).or_default() += 1;
            let Some(record) = dataset.get(violation.key) else {
                continue;
            };
            if let Some(partner) = record.partner_name.as_deref() {
                partners.insert(partner);
            }
            if violation.rule == RuleId::PartnerFinalized {
                if record.partner_stage_is(Stage::Launched) {
                    finalized.launched += 1;
                } else if record.partner_stage_is(Stage::ClosedLost) {
                    finalized.closed_lost += 1;
                }
            }
        }

        let total = violations.len();
        let count = |rule| per_rule.get(&rule).copied().unwrap_or(0);
        let priority = Priority::classify(
            total,
            count(RuleId::CoSellMissing),
            count(RuleId::PartnerFinalized),
            thresholds,
        );

        Self {
            total,
            distinct_partners: partners.len(),
            priority,
            finalized,
            per_rule,
        }
    }

    /// Violations of one rule in this group.
    pub fn count(&self, rule: RuleId) -> usize {
        self.per_rule.get(&rule).copied().unwrap_or(0)
    }

    /// Partner-finalized violations split by Launched vs Closed Lost.
    pub fn finalized_breakdown(&self) -> FinalizedBreakdown {
        self.finalized
    }
}

/// All violations sharing one grouping key.
#[derive(Debug, Clone)]
pub struct ViolationGroup {
    pub key: String,
    /// Violations in catalog order, then record id.
    pub violations: Vec<Violation>,
    pub summary: GroupSummary,
}

impl ViolationGroup {
    pub fn priority(&self) -> Priority {
        self.summary.priority
    }

    /// Violations of one rule, in order.
    pub fn of_rule(&self, rule: RuleId) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}

/// Result of grouping a violation set.
#[derive(Debug, Clone, Default)]
pub struct GroupedViolations {
    /// Groups sorted by key.
    pub groups: Vec<ViolationGroup>,
    /// Violations whose record has no grouping key.
    pub ungrouped: Vec<Violation>,
}

impl GroupedViolations {
    pub fn get(&self, key: &str) -> Option<&ViolationGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViolationGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups by descending priority, then descending total, then key.
    pub fn by_priority(&self) -> Vec<&ViolationGroup> {
        let mut groups: Vec<&ViolationGroup> = self.groups.iter().collect();
        groups.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then(b.summary.total.cmp(&a.summary.total))
                .then(a.key.cmp(&b.key))
        });
        groups
    }

    /// Violations across all groups; ungrouped ones are not counted.
    pub fn grouped_violation_count(&self) -> usize {
        self.groups.iter().map(|group| group.summary.total).sum()
    }
}
