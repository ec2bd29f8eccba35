// Typed rule sets for order-insensitive, independent rule evaluation.
//
// This module provides the `HygieneRule` trait for a single predicate rule
// and the `RuleSet` trait which runs a fixed collection of rules without
// virtual dispatch.

use std::time::Instant;

use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord, RuleId};
use tracing::debug;

use crate::api::analysis::RuleAnalysis;
use crate::api::violation::{Evidence, Violation};
use crate::context::EvaluationContext;

/// A single hygiene rule.
///
/// Rules only read the dataset, so any set of rules may run in any order
/// or in parallel with identical results.
///
/// # Example
///
/// ```
/// use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord, RuleId};
/// use pipeline_hygiene_rules::{EvaluationContext, Evidence, HygieneRule};
/// use chrono::NaiveDate;
///
/// struct MissingName;
///
/// impl HygieneRule for MissingName {
///     fn rule_id(&self) -> RuleId {
///         RuleId::ZeroAmount
///     }
///
///     fn matches(
///         &self,
///         record: &OpportunityRecord,
///         _dataset: &OpportunityDataset,
///         _ctx: &EvaluationContext,
///     ) -> Option<Evidence> {
///         record.name.is_none().then(Evidence::new)
///     }
/// }
///
/// let dataset = OpportunityDataset::new(vec![OpportunityRecord::default()]);
/// let ctx = EvaluationContext::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert_eq!(MissingName.evaluate(&dataset, &ctx).len(), 1);
/// ```
pub trait HygieneRule: Send + Sync {
    /// Catalog identity of this rule.
    fn rule_id(&self) -> RuleId;

    /// Tests one record, returning evidence when the rule fires.
    ///
    /// `dataset` is the full collection, for sibling correlation.
    /// Must not panic for any input.
    fn matches(
        &self,
        record: &OpportunityRecord,
        dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Option<Evidence>;

    /// Full evaluation over every eligible record.
    fn evaluate(&self, dataset: &OpportunityDataset, ctx: &EvaluationContext) -> Vec<Violation> {
        let rule = self.rule_id();
        dataset
            .iter()
            .filter(|record| ctx.is_eligible(record))
            .filter_map(|record| {
                self.matches(record, dataset, ctx)
                    .map(|evidence| Violation::new(rule, record, evidence))
            })
            .collect()
    }

    /// Returns the number of matches for this rule.
    fn match_count(&self, dataset: &OpportunityDataset, ctx: &EvaluationContext) -> usize {
        dataset
            .iter()
            .filter(|record| ctx.is_eligible(record))
            .filter(|record| self.matches(record, dataset, ctx).is_some())
            .count()
    }
}

/// A set of rules that can be evaluated together.
///
/// `RuleSet` is implemented for tuples of `HygieneRule` and for
/// `Vec<Box<dyn HygieneRule>>`.
pub trait RuleSet: Send + Sync {
    /// Returns the number of rules in this set.
    fn rule_count(&self) -> usize;

    /// Returns the ids of all rules in this set.
    fn rule_ids(&self) -> Vec<RuleId>;

    /// Evaluates each enabled rule and returns one analysis per rule.
    fn evaluate_each(
        &self,
        dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Vec<RuleAnalysis>;

    /// Evaluates all enabled rules and returns the union of violations.
    fn evaluate_all(&self, dataset: &OpportunityDataset, ctx: &EvaluationContext) -> Vec<Violation> {
        self.evaluate_each(dataset, ctx)
            .into_iter()
            .flat_map(RuleAnalysis::into_violations)
            .collect()
    }
}

/// Runs one rule with timing, or skips it when disabled.
pub(crate) fn analyze<R>(
    rule: &R,
    dataset: &OpportunityDataset,
    ctx: &EvaluationContext,
) -> Option<RuleAnalysis>
where
    R: HygieneRule + ?Sized,
{
    let id = rule.rule_id();
    if !ctx.is_enabled(id) {
        debug!(event = "rule_skipped", rule = %id);
        return None;
    }
    let start = Instant::now();
    let violations = rule.evaluate(dataset, ctx);
    let duration = start.elapsed();
    debug!(
        event = "rule_end",
        rule = %id,
        match_count = violations.len(),
        duration_ms = duration.as_millis() as u64,
    );
    Some(RuleAnalysis::new(id, violations, duration))
}

// ============================================================================
// Tuple implementations
// ============================================================================

// Implement `RuleSet` for an empty tuple (no rules).
impl RuleSet for () {
    #[inline]
    fn rule_count(&self) -> usize {
        0
    }

    #[inline]
    fn rule_ids(&self) -> Vec<RuleId> {
        Vec::new()
    }

    #[inline]
    fn evaluate_each(
        &self,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Vec<RuleAnalysis> {
        Vec::new()
    }
}

// Macro to implement `RuleSet` for tuples of various sizes.
macro_rules! impl_rule_set_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> RuleSet for ($($T,)+)
        where
            $($T: HygieneRule,)+
        {
            #[inline]
            fn rule_count(&self) -> usize {
                let mut count = 0;
                $(let _ = &self.$idx; count += 1;)+
                count
            }

            fn rule_ids(&self) -> Vec<RuleId> {
                vec![$(self.$idx.rule_id()),+]
            }

            fn evaluate_each(
                &self,
                dataset: &OpportunityDataset,
                ctx: &EvaluationContext,
            ) -> Vec<RuleAnalysis> {
                [$(analyze(&self.$idx, dataset, ctx)),+]
                    .into_iter()
                    .flatten()
                    .collect()
            }
        }
    };
}

// Implement for tuples of size 1 through 16
impl_rule_set_for_tuple!(0: R0);
impl_rule_set_for_tuple!(0: R0, 1: R1);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8, 9: R9);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8, 9: R9, 10: R10);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8, 9: R9, 10: R10, 11: R11);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8, 9: R9, 10: R10, 11: R11, 12: R12);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8, 9: R9, 10: R10, 11: R11, 12: R12, 13: R13);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8, 9: R9, 10: R10, 11: R11, 12: R12, 13: R13, 14: R14);
impl_rule_set_for_tuple!(0: R0, 1: R1, 2: R2, 3: R3, 4: R4, 5: R5, 6: R6, 7: R7, 8: R8, 9: R9, 10: R10, 11: R11, 12: R12, 13: R13, 14: R14, 15: R15);
