//! Rules over categorical fields and amounts.

use pipeline_hygiene_core::{AceOpportunityType, OpportunityDataset, OpportunityRecord, RuleId, Stage};
use rust_decimal::Decimal;

use crate::api::{Evidence, EvidenceValue, HygieneRule};
use crate::context::EvaluationContext;

const SAAS_OR_PAAS: &str = "saas or paas";

/// Technology partner on an active deal without a SaaS/PaaS delivery model.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryModelMismatch;

impl HygieneRule for DeliveryModelMismatch {
    fn rule_id(&self) -> RuleId {
        RuleId::DeliveryModelMismatch
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        let type_applies = match &record.ace_opportunity_type {
            None => true,
            Some(ace) => matches!(
                ace,
                AceOpportunityType::PartnerSourced
                    | AceOpportunityType::PartnerSourcedVisibilityOnly
                    | AceOpportunityType::AwsSharedWithPartner
            ),
        };
        let declares_saas = record
            .delivery_model
            .as_deref()
            .is_some_and(|model| model.to_lowercase().contains(SAAS_OR_PAAS));

        (type_applies && record.is_technology_partner() && !declares_saas && !record.aws_finalized())
            .then(|| {
                Evidence::new().with("delivery_model", record.delivery_model.clone().into())
            })
    }
}

/// Visibility-only opportunity still open on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityOnly;

impl HygieneRule for VisibilityOnly {
    fn rule_id(&self) -> RuleId {
        RuleId::VisibilityOnly
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        (record.is_visibility_only() && !record.aws_finalized() && !record.partner_finalized())
            .then(|| {
                Evidence::new()
                    .with("aws_stage", record.aws_stage.clone().into())
                    .with("partner_stage", record.partner_stage.clone().into())
            })
    }
}

/// Visibility-only opportunity with no amount on an open partner stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityOnlyZeroAmount;

impl HygieneRule for VisibilityOnlyZeroAmount {
    fn rule_id(&self) -> RuleId {
        RuleId::VisibilityOnlyZeroAmount
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        (record.is_visibility_only()
            && record.amount_or_zero().is_zero()
            && !record.partner_finalized())
        .then(|| zero_amount_evidence(record))
    }
}

/// Launched technology-partner deal of meaningful size without co-sell.
///
/// Fires on Launched records, which the presentation filter may keep
/// visible alongside the stage alignment check.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoSellMissing;

impl HygieneRule for CoSellMissing {
    fn rule_id(&self) -> RuleId {
        RuleId::CoSellMissing
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        let launched =
            record.aws_stage_is(Stage::Launched) || record.partner_stage_is(Stage::Launched);
        let amount = record.amount_or_zero();

        (record.is_technology_partner()
            && !record.co_sell_attested
            && !record.is_visibility_only()
            && launched
            && amount >= ctx.co_sell_min_amount())
        .then(|| {
            Evidence::new()
                .with("total_amount", EvidenceValue::Amount(amount))
                .with("co_sell_attested", EvidenceValue::Flag(false))
                .with("aws_stage", record.aws_stage.clone().into())
                .with("partner_stage", record.partner_stage.clone().into())
        })
    }
}

/// Active, non-visibility opportunity with no amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroAmount;

impl HygieneRule for ZeroAmount {
    fn rule_id(&self) -> RuleId {
        RuleId::ZeroAmount
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        _ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        (!record.is_visibility_only()
            && record.amount_or_zero().is_zero()
            && !record.aws_finalized())
        .then(|| zero_amount_evidence(record))
    }
}

fn zero_amount_evidence(record: &OpportunityRecord) -> Evidence {
    Evidence::new().with(
        "total_amount",
        EvidenceValue::Amount(record.total_amount.unwrap_or(Decimal::ZERO)),
    )
}
