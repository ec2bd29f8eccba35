//! Rule evaluator: runs a rule set over a dataset and reports.

use std::time::Instant;

use pipeline_hygiene_core::OpportunityDataset;
use tracing::info;

use crate::api::{EvaluationReport, RuleSet};
use crate::context::EvaluationContext;
use crate::rules::{standard_rules, StandardRules};

/// Evaluates a fixed rule set.
///
/// Evaluation is a pure function of the dataset and context: running it
/// twice on the same input yields identical, identically ordered reports.
///
/// # Example
///
/// ```
/// use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord, RuleId};
/// use pipeline_hygiene_rules::{EvaluationContext, RuleEvaluator};
/// use chrono::NaiveDate;
///
/// let dataset = OpportunityDataset::new(vec![OpportunityRecord {
///     id: Some("OPP1".into()),
///     ..OpportunityRecord::default()
/// }]);
/// let ctx = EvaluationContext::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
///
/// let report = RuleEvaluator::standard().evaluate(&dataset, &ctx);
/// // No amount on an open deal
/// assert_eq!(report.match_count(RuleId::ZeroAmount), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RuleEvaluator<R> {
    rules: R,
}

impl RuleEvaluator<StandardRules> {
    /// Creates an evaluator over the full 14-rule catalog.
    pub fn standard() -> Self {
        Self::new(standard_rules())
    }
}

impl<R: RuleSet> RuleEvaluator<R> {
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Runs every enabled rule and collects the results.
    pub fn evaluate(&self, dataset: &OpportunityDataset, ctx: &EvaluationContext) -> EvaluationReport {
        let start = Instant::now();
        info!(
            event = "evaluate_start",
            record_count = dataset.len(),
            rule_count = self.rules.rule_count(),
            reference_date = %ctx.today(),
        );

        let analyses = self.rules.evaluate_each(dataset, ctx);
        let report = EvaluationReport::new(ctx.today(), dataset.len(), analyses);

        info!(
            event = "evaluate_end",
            violation_count = report.total_match_count(),
            duration_ms = start.elapsed().as_millis() as u64,
        );
        report
    }
}
