// Dynamic rule sets, optionally evaluated on the rayon pool.

use pipeline_hygiene_core::{OpportunityDataset, RuleId};
use rayon::prelude::*;

use super::hygiene::{analyze, HygieneRule, RuleSet};
use crate::api::analysis::RuleAnalysis;
use crate::context::EvaluationContext;

impl RuleSet for Vec<Box<dyn HygieneRule>> {
    fn rule_count(&self) -> usize {
        self.len()
    }

    fn rule_ids(&self) -> Vec<RuleId> {
        self.iter().map(|rule| rule.rule_id()).collect()
    }

    fn evaluate_each(
        &self,
        dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Vec<RuleAnalysis> {
        if ctx.parallel() {
            self.par_iter()
                .filter_map(|rule| analyze(rule.as_ref(), dataset, ctx))
                .collect()
        } else {
            self.iter()
                .filter_map(|rule| analyze(rule.as_ref(), dataset, ctx))
                .collect()
        }
    }
}
