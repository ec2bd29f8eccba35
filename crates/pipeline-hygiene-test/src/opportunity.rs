//! Opportunity record builder.
//!
//! The default record is neutral: it fires no hygiene rule. Each setter
//! moves one field away from that baseline.
//!
//! # Example
//!
//! ```
//! use pipeline_hygiene_core::{AceOpportunityType, Stage};
//! use pipeline_hygiene_test::OpportunityBuilder;
//!
//! let record = OpportunityBuilder::new("OPP1")
//!     .ace_type(AceOpportunityType::PartnerSourcedVisibilityOnly)
//!     .partner_stage(Stage::Qualified)
//!     .amount(0)
//!     .build();
//! assert!(record.is_visibility_only());
//! ```

use chrono::NaiveDate;
use pipeline_hygiene_core::{
    AceOpportunityType, OpportunityRecord, PartnerType, Stage, StageValue,
};
use rust_decimal::Decimal;

use crate::dates::days_from_reference;

/// Fluent builder for [`OpportunityRecord`] fixtures.
#[derive(Clone, Debug)]
pub struct OpportunityBuilder {
    record: OpportunityRecord,
}

impl OpportunityBuilder {
    /// Creates a neutral, active record with the given id.
    pub fn new(id: &str) -> Self {
        Self {
            record: OpportunityRecord {
                id: Some(id.to_string()),
                name: Some(format!("Opportunity {id}")),
                account_name: Some("Acme Corp".to_string()),
                partner_name: Some("Partner A".to_string()),
                aws_stage: Some(StageValue::Recognized(Stage::Qualified)),
                partner_stage: Some(StageValue::Recognized(Stage::Qualified)),
                ace_opportunity_type: Some(AceOpportunityType::PartnerSourced),
                partner_type: Some(PartnerType::Other("Consulting Partner".to_string())),
                total_amount: Some(Decimal::from(1000)),
                owner_email: Some("owner@partner-a.com".to_string()),
                owner_name: Some("Owner A".to_string()),
                ..OpportunityRecord::default()
            },
        }
    }

    /// Creates a record without an id.
    pub fn anonymous() -> Self {
        let mut builder = Self::new("");
        builder.record.id = None;
        builder
    }

    pub fn aws_stage(mut self, stage: Stage) -> Self {
        self.record.aws_stage = Some(StageValue::Recognized(stage));
        self
    }

    /// Sets the AWS stage from raw text, allowing unrecognized values.
    pub fn aws_stage_raw(mut self, raw: &str) -> Self {
        self.record.aws_stage = StageValue::from_raw(raw);
        self
    }

    pub fn partner_stage(mut self, stage: Stage) -> Self {
        self.record.partner_stage = Some(StageValue::Recognized(stage));
        self
    }

    pub fn partner_stage_raw(mut self, raw: &str) -> Self {
        self.record.partner_stage = StageValue::from_raw(raw);
        self
    }

    /// Sets both stages at once.
    pub fn stages(self, aws: Stage, partner: Stage) -> Self {
        self.aws_stage(aws).partner_stage(partner)
    }

    pub fn status(mut self, status: &str) -> Self {
        self.record.partner_status = Some(status.to_string());
        self
    }

    pub fn rejected(self) -> Self {
        self.status("Rejected")
    }

    pub fn ace_type(mut self, ace_type: AceOpportunityType) -> Self {
        self.record.ace_opportunity_type = Some(ace_type);
        self
    }

    pub fn no_ace_type(mut self) -> Self {
        self.record.ace_opportunity_type = None;
        self
    }

    pub fn partner_type(mut self, partner_type: PartnerType) -> Self {
        self.record.partner_type = Some(partner_type);
        self
    }

    /// Technology partner with a SaaS/PaaS delivery model and co-sell attested.
    pub fn technology_partner(mut self) -> Self {
        self.record.partner_type = Some(PartnerType::Technology);
        self.record.delivery_model = Some("SaaS or PaaS".to_string());
        self.record.co_sell_attested = true;
        self
    }

    pub fn delivery_model(mut self, model: &str) -> Self {
        self.record.delivery_model = Some(model.to_string());
        self
    }

    pub fn no_delivery_model(mut self) -> Self {
        self.record.delivery_model = None;
        self
    }

    pub fn co_sell(mut self, attested: bool) -> Self {
        self.record.co_sell_attested = attested;
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.record.total_amount = Some(Decimal::from(amount));
        self
    }

    pub fn amount_decimal(mut self, amount: Decimal) -> Self {
        self.record.total_amount = Some(amount);
        self
    }

    pub fn no_amount(mut self) -> Self {
        self.record.total_amount = None;
        self
    }

    /// Close date `days` after the reference date.
    pub fn close_in(self, days: i64) -> Self {
        self.close_date(days_from_reference(days))
    }

    pub fn close_date(mut self, date: NaiveDate) -> Self {
        self.record.close_date = Some(date);
        self
    }

    /// Target launch date `days` after the reference date.
    pub fn launch_in(mut self, days: i64) -> Self {
        self.record.target_launch_date = Some(days_from_reference(days));
        self
    }

    /// Partner last touched the record `days` before the reference date.
    pub fn last_modified_days_ago(mut self, days: i64) -> Self {
        self.record.partner_last_modified_date = Some(days_from_reference(-days));
        self
    }

    pub fn owner(mut self, email: &str, name: &str) -> Self {
        self.record.owner_email = Some(email.to_string());
        self.record.owner_name = Some(name.to_string());
        self
    }

    pub fn no_owner_email(mut self) -> Self {
        self.record.owner_email = None;
        self
    }

    pub fn partner(mut self, name: &str) -> Self {
        self.record.partner_name = Some(name.to_string());
        self
    }

    pub fn no_partner(mut self) -> Self {
        self.record.partner_name = None;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = Some(name.to_string());
        self
    }

    pub fn next_step(mut self, step: &str) -> Self {
        self.record.next_step = Some(step.to_string());
        self
    }

    pub fn build(self) -> OpportunityRecord {
        self.record
    }
}
