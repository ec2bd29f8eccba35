//! Presentation-time filtering of violations.
//!
//! For records whose AWS stage is Launched only partner-stage alignment
//! stays visible. The filter runs after evaluation so rules that target
//! Launched records still see them.

use std::collections::BTreeSet;

use pipeline_hygiene_core::{OpportunityDataset, RuleId, Stage};

use crate::api::Violation;

/// Which rules stay visible on AWS-Launched records.
///
/// # Example
///
/// ```
/// use pipeline_hygiene_core::RuleId;
/// use pipeline_hygiene_rules::LaunchedFilter;
///
/// let partner = LaunchedFilter::partner_facing();
/// assert!(partner.keeps(RuleId::PartnerStageBehind));
/// assert!(!partner.keeps(RuleId::CoSellMissing));
///
/// let manager = LaunchedFilter::account_manager_facing();
/// assert!(manager.keeps(RuleId::CoSellMissing));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedFilter {
    kept: BTreeSet<RuleId>,
}

impl LaunchedFilter {
    /// Only partner-stage alignment survives on Launched records.
    pub fn partner_facing() -> Self {
        Self::keeping([RuleId::PartnerStageBehind])
    }

    /// Stage alignment plus the co-sell check, which targets Launched deals.
    pub fn account_manager_facing() -> Self {
        Self::keeping([RuleId::PartnerStageBehind, RuleId::CoSellMissing])
    }

    /// Keeps every rule; no suppression.
    pub fn disabled() -> Self {
        Self::keeping(RuleId::ALL)
    }

    pub fn keeping<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = RuleId>,
    {
        Self {
            kept: rules.into_iter().collect(),
        }
    }

    /// Returns true if `rule` stays visible on Launched records.
    pub fn keeps(&self, rule: RuleId) -> bool {
        self.kept.contains(&rule)
    }

    /// Rules hidden on Launched records, in catalog order.
    pub fn suppressed_rules(&self) -> Vec<RuleId> {
        RuleId::ALL
            .into_iter()
            .filter(|rule| !self.keeps(*rule))
            .collect()
    }

    /// Returns true if the violation should be shown.
    ///
    /// Violations whose row is missing from `dataset` are kept.
    pub fn retains(&self, violation: &Violation, dataset: &OpportunityDataset) -> bool {
        let launched = dataset
            .get(violation.key)
            .is_some_and(|record| record.aws_stage_is(Stage::Launched));
        !launched || self.keeps(violation.rule)
    }

    /// Filters violations, preserving order.
    pub fn apply<'a, I>(&self, violations: I, dataset: &OpportunityDataset) -> Vec<Violation>
    where
        I: IntoIterator<Item = &'a Violation>,
    {
        violations
            .into_iter()
            .filter(|violation| self.retains(violation, dataset))
            .cloned()
            .collect()
    }
}

impl Default for LaunchedFilter {
    fn default() -> Self {
        Self::partner_facing()
    }
}
