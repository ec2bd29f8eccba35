//! Stage alignment rules.
//!
//! Comparisons only happen between recognized stages; a record with an
//! unrecognized stage on either side never fires 7 or 9.

use std::cmp::Ordering;

use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord, RuleId, Stage, StageOrder};

use crate::api::{Evidence, HygieneRule};
use crate::context::EvaluationContext;

fn stage_evidence(record: &OpportunityRecord) -> Evidence {
    Evidence::new()
        .with("partner_stage", record.partner_stage.clone().into())
        .with("aws_stage", record.aws_stage.clone().into())
}

fn compare_stages(record: &OpportunityRecord) -> Option<Ordering> {
    StageOrder::compare(record.partner_stage.as_ref()?, record.aws_stage.as_ref()?)
}

/// Partner reports an earlier stage than AWS.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartnerStageBehind;

impl HygieneRule for PartnerStageBehind {
    fn rule_id(&self) -> RuleId {
        RuleId::PartnerStageBehind
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        // Closed Lost on the partner side is terminal, never "behind".
        (compare_stages(record) == Some(Ordering::Less)
            && !record.is_visibility_only()
            && !record.partner_stage_is(Stage::ClosedLost))
        .then(|| stage_evidence(record))
    }
}

/// Partner reports a later, still-open stage than AWS.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartnerStageAhead;

impl HygieneRule for PartnerStageAhead {
    fn rule_id(&self) -> RuleId {
        RuleId::PartnerStageAhead
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        (compare_stages(record) == Some(Ordering::Greater) && !record.partner_finalized())
            .then(|| stage_evidence(record))
    }
}

/// Partner finalized the deal while AWS still shows it open.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartnerFinalized;

impl HygieneRule for PartnerFinalized {
    fn rule_id(&self) -> RuleId {
        RuleId::PartnerFinalized
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        (record.partner_finalized() && !record.aws_finalized()).then(|| stage_evidence(record))
    }
}
