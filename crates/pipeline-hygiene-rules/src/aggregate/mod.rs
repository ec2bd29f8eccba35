//! Aggregation of violations for presentation.
//!
//! Groups a (usually filtered) violation set by owner, partner, or company
//! and derives per-group statistics and a priority.

mod company;
mod group;
mod priority;


use std::collections::BTreeMap;

use pipeline_hygiene_config::{HygieneConfig, PriorityConfig};
use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord};
use tracing::info;

pub use company::company_from_email;
pub use group::{FinalizedBreakdown, GroupSummary, GroupedViolations, ViolationGroup};
pub use priority::Priority;

use crate::api::Violation;

/// Grouping key for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupBy {
    /// Owner email, lower-cased.
    #[default]
    OwnerEmail,
    OwnerName,
    Partner,
    /// Company derived from the owner email domain.
    Company,
}

impl GroupBy {
    /// Returns the grouping key for a record, or `None` when it has none.
    pub fn key_for(self, record: &OpportunityRecord) -> Option<String> {
        let key = match self {
            GroupBy::OwnerEmail => record.owner_email.as_deref().map(str::to_lowercase),
            GroupBy::OwnerName => record.owner_name.clone(),
            GroupBy::Partner => record.partner_name.clone(),
            GroupBy::Company => record.owner_email.as_deref().and_then(company_from_email),
        }?;
        let key = key.trim();
        (!key.is_empty()).then(|| key.to_string())
    }
}

/// Groups violations and classifies each group.
///
/// # Example
///
/// ```
/// use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord};
/// use pipeline_hygiene_rules::{Aggregator, EvaluationContext, GroupBy, Priority, RuleEvaluator};
/// use chrono::NaiveDate;
///
/// let dataset = OpportunityDataset::new(vec![OpportunityRecord {
///     id: Some("OPP1".into()),
///     owner_email: Some("Ana@Partner.com".into()),
///     ..OpportunityRecord::default()
/// }]);
/// let ctx = EvaluationContext::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
/// let report = RuleEvaluator::standard().evaluate(&dataset, &ctx);
///
/// let grouped = Aggregator::new(GroupBy::OwnerEmail).group(report.violations(), &dataset);
/// let group = grouped.get("ana@partner.com").unwrap();
/// assert_eq!(group.summary.total, 1);
/// assert_eq!(group.priority(), Priority::Low);
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    group_by: GroupBy,
    thresholds: PriorityConfig,
}

impl Aggregator {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            thresholds: PriorityConfig::default(),
        }
    }

    pub fn from_config(group_by: GroupBy, config: &HygieneConfig) -> Self {
        Self::new(group_by).with_thresholds(config.priority)
    }

    pub fn with_thresholds(mut self, thresholds: PriorityConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    /// Partitions violations by grouping key.
    ///
    /// Each violation's `grouping_key` is set to its group's key.
    /// Violations whose record lacks the key, or is absent from `dataset`,
    /// go to `ungrouped` with no key.
    pub fn group<'a, I>(&self, violations: I, dataset: &OpportunityDataset) -> GroupedViolations
    where
        I: IntoIterator<Item = &'a Violation>,
    {
        let mut buckets: BTreeMap<String, Vec<Violation>> = BTreeMap::new();
        let mut ungrouped = Vec::new();

        for violation in violations {
            match dataset
                .get(violation.key)
                .and_then(|record| self.group_by.key_for(record))
            {
                Some(key) => {
                    let mut violation = violation.clone();
                    violation.grouping_key = Some(key.clone());
                    buckets.entry(key).or_default().push(violation);
                }
                None => {
                    let mut violation = violation.clone();
                    violation.grouping_key = None;
                    ungrouped.push(violation);
                }
            }
        }

        let groups: Vec<ViolationGroup> = buckets
            .into_iter()
            .map(|(key, mut violations)| {
                violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
                let summary = GroupSummary::compute(&violations, dataset, &self.thresholds);
                ViolationGroup {
                    key,
                    violations,
                    summary,
                }
            })
            .collect();

        info!(
            event = "group_end",
            group_by = ?self.group_by,
            group_count = groups.len(),
            ungrouped = ungrouped.len(),
        );

        GroupedViolations { groups, ungrouped }
    }
}
