//! Rules that correlate rows sharing an opportunity id.

use pipeline_hygiene_core::{AceOpportunityType, OpportunityDataset, OpportunityRecord, RuleId};

use crate::api::{Evidence, EvidenceValue, HygieneRule, RejectionScenario};
use crate::context::EvaluationContext;

const REJECTED: &str = "Rejected";

/// Eligible to share, but no row of the same opportunity was shared yet.
///
/// Siblings are looked up in the full dataset, including rows the global
/// preconditions exclude from evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibleNotShared;

impl HygieneRule for EligibleNotShared {
    fn rule_id(&self) -> RuleId {
        RuleId::EligibleNotShared
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        if record.ace_opportunity_type != Some(AceOpportunityType::EligibleToShare) {
            return None;
        }
        let mut sibling_count = 0;
        for sibling in dataset.siblings(record) {
            if sibling.ace_opportunity_type == Some(AceOpportunityType::AwsSharedWithPartner) {
                return None;
            }
            sibling_count += 1;
        }
        Some(Evidence::new().with("sibling_count", EvidenceValue::Count(sibling_count)))
    }
}

/// Rejected share with nobody else holding the opportunity.
///
/// Fires when the row is the only one with its id, or when every sibling
/// was rejected too. Rows without an id are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectedReshare;

impl HygieneRule for RejectedReshare {
    fn rule_id(&self) -> RuleId {
        RuleId::RejectedReshare
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        if !record.status_is(REJECTED) || record.sibling_id().is_none() {
            return None;
        }
        let mut sibling_count = 0;
        for sibling in dataset.siblings(record) {
            if !sibling.status_is(REJECTED) {
                return None;
            }
            sibling_count += 1;
        }
        let scenario = if sibling_count == 0 {
            RejectionScenario::Unique
        } else {
            RejectionScenario::AllRejected
        };
        Some(
            Evidence::new()
                .with("scenario", EvidenceValue::Scenario(scenario))
                .with("sibling_count", EvidenceValue::Count(sibling_count))
                .with("partner_status", record.partner_status.clone().into()),
        )
    }
}
