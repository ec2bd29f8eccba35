//! Tests for the standard rule catalog.

mod dates;

use pipeline_hygiene_core::{OpportunityDataset, RuleId};
use pipeline_hygiene_test::{dataset, reference_date, OpportunityBuilder};

use super::*;
use crate::api::{Evidence, HygieneRule, RuleSet, Violation};
use crate::context::EvaluationContext;

fn ctx() -> EvaluationContext {
    EvaluationContext::new(reference_date())
}

/// Evaluates `rule` over a one-record dataset.
fn check<R: HygieneRule>(rule: R, record: OpportunityBuilder) -> Option<Evidence> {
    let data = dataset([record]);
    rule.evaluate(&data, &ctx())
        .into_iter()
        .next()
        .map(|violation| violation.evidence)
}

fn fired_rules(data: &OpportunityDataset) -> Vec<RuleId> {
    let mut rules: Vec<RuleId> = standard_rules()
        .evaluate_all(data, &ctx())
        .iter()
        .map(|violation: &Violation| violation.rule)
        .collect();
    rules.sort();
    rules.dedup();
    rules
}

#[test]
fn test_neutral_record_fires_nothing() {
    let data = dataset([OpportunityBuilder::new("OPP1")]);
    assert!(fired_rules(&data).is_empty());
}

#[test]
fn test_standard_rules_cover_catalog_in_order() {
    assert_eq!(standard_rules().rule_ids(), RuleId::ALL.to_vec());
    assert_eq!(standard_rules().rule_count(), 14);
    let boxed = boxed_standard_rules();
    assert_eq!(boxed.rule_ids(), RuleId::ALL.to_vec());
}

#[test]
fn test_closed_lost_records_never_fire() {
    use pipeline_hygiene_core::{AceOpportunityType, Stage};

    let data = dataset([
        OpportunityBuilder::new("OPP1")
            .aws_stage(Stage::ClosedLost)
            .partner_stage(Stage::Launched)
            .amount(0)
            .launch_in(-10)
            .close_in(3)
            .last_modified_days_ago(100)
            .ace_type(AceOpportunityType::EligibleToShare)
            .rejected(),
    ]);
    assert!(fired_rules(&data).is_empty());
}

#[test]
fn test_excluded_partner_never_fires() {
    use pipeline_hygiene_core::Stage;

    let data = dataset([OpportunityBuilder::new("OPP1")
        .partner("Omie")
        .partner_stage(Stage::Launched)
        .technology_partner()
        .co_sell(false)
        .amount(0)
        .close_in(1)]);
    let ctx = ctx().with_excluded_partner("OMIE");
    assert!(standard_rules().evaluate_all(&data, &ctx).is_empty());
}
