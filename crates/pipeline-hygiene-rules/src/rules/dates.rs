//! Date-window rules.
//!
//! All windows are inclusive and measured in calendar days from the
//! context's reference date.

use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord, RuleId, Stage};

use crate::api::{Evidence, EvidenceValue, HygieneRule};
use crate::context::EvaluationContext;

/// Target launch date already passed while the partner is still working the deal.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchDateOverdue;

impl HygieneRule for LaunchDateOverdue {
    fn rule_id(&self) -> RuleId {
        RuleId::LaunchDateOverdue
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        let launch = record.target_launch_date?;
        if record.partner_finalized() || launch >= ctx.today() {
            return None;
        }
        Some(
            Evidence::new()
                .with("target_launch_date", EvidenceValue::Date(launch))
                .with("days_overdue", EvidenceValue::Days(-ctx.days_from_today(launch))),
        )
    }
}

/// Target launch date inside the upcoming window.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchDateUpcoming;

impl HygieneRule for LaunchDateUpcoming {
    fn rule_id(&self) -> RuleId {
        RuleId::LaunchDateUpcoming
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        let launch = record.target_launch_date?;
        if record.partner_finalized()
            || !ctx.within_next_days(launch, ctx.windows().launch_upcoming_days)
        {
            return None;
        }
        Some(
            Evidence::new()
                .with("target_launch_date", EvidenceValue::Date(launch))
                .with("days_remaining", EvidenceValue::Days(ctx.days_from_today(launch))),
        )
    }
}

/// No partner-side update within the stall window.
#[derive(Debug, Clone, Copy, Default)]
pub struct StalledOpportunity;

impl HygieneRule for StalledOpportunity {
    fn rule_id(&self) -> RuleId {
        RuleId::StalledOpportunity
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        let modified = record.partner_last_modified_date?;
        if !ctx.older_than_days(modified, ctx.windows().stalled_days)
            || record.partner_stage_is(Stage::Launched)
        {
            return None;
        }
        Some(
            Evidence::new()
                .with("partner_last_modified_date", EvidenceValue::Date(modified))
                .with("days_stalled", EvidenceValue::Days(-ctx.days_from_today(modified))),
        )
    }
}

/// Close date inside the imminent window.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseDateImminent;

impl HygieneRule for CloseDateImminent {
    fn rule_id(&self) -> RuleId {
        RuleId::CloseDateImminent
    }

    fn matches(
        &self,
        record: &OpportunityRecord,
        _dataset: &OpportunityDataset,
        ctx: &EvaluationContext,
    ) -> Option<Evidence> {
        let close = record.close_date?;
        if !ctx.within_next_days(close, ctx.windows().close_date_days) {
            return None;
        }
        Some(
            Evidence::new()
                .with("close_date", EvidenceValue::Date(close))
                .with("days_until_close", EvidenceValue::Days(ctx.days_from_today(close))),
        )
    }
}
