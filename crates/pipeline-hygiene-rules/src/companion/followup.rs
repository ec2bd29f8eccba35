//! Follow-up planning for active opportunities.
//!
//! Active records (neither stage finalized, owner email present) are
//! grouped by partner, then by owner, with an urgency bucket derived from
//! the days left until the close date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use pipeline_hygiene_core::{Locale, OpportunityDataset, OpportunityRecord, RowKey, StageValue};
use rust_decimal::Decimal;

use crate::context::EvaluationContext;

/// How soon an opportunity needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Urgency {
    Overdue,
    /// Closes within a week.
    Urgent,
    /// Closes within 30 days.
    Soon,
    /// Closes within 90 days.
    Normal,
    Future,
    NoDate,
}

impl Urgency {
    pub fn from_days(days_remaining: Option<i64>) -> Self {
        match days_remaining {
            None => Urgency::NoDate,
            Some(days) if days < 0 => Urgency::Overdue,
            Some(days) if days <= 7 => Urgency::Urgent,
            Some(days) if days <= 30 => Urgency::Soon,
            Some(days) if days <= 90 => Urgency::Normal,
            Some(_) => Urgency::Future,
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Urgency::Overdue, Locale::Portuguese) => "VENCIDO",
            (Urgency::Urgent, Locale::Portuguese) => "URGENTE",
            (Urgency::Soon, Locale::Portuguese) => "PRÓXIMO",
            (Urgency::Normal, Locale::Portuguese) => "NORMAL",
            (Urgency::Future, Locale::Portuguese) => "FUTURO",
            (Urgency::NoDate, Locale::Portuguese) => "SEM DATA",
            (Urgency::Overdue, Locale::English) => "OVERDUE",
            (Urgency::Urgent, Locale::English) => "URGENT",
            (Urgency::Soon, Locale::English) => "SOON",
            (Urgency::Normal, Locale::English) => "NORMAL",
            (Urgency::Future, Locale::English) => "FUTURE",
            (Urgency::NoDate, Locale::English) => "NO DATE",
        }
    }
}

/// One opportunity to follow up on.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUpItem {
    pub key: RowKey,
    pub record_id: Option<String>,
    pub name: Option<String>,
    pub account_name: Option<String>,
    pub owner_email: String,
    pub aws_stage: Option<StageValue>,
    pub partner_stage: Option<StageValue>,
    pub close_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
    pub urgency: Urgency,
    pub amount: Option<Decimal>,
    pub next_step: Option<String>,
}

impl FollowUpItem {
    fn from_record(record: &OpportunityRecord, owner_email: String, ctx: &EvaluationContext) -> Self {
        let days_remaining = record.close_date.map(|date| ctx.days_from_today(date));
        Self {
            key: record.key,
            record_id: record.id.clone(),
            name: record.name.clone(),
            account_name: record.account_name.clone(),
            owner_email,
            aws_stage: record.aws_stage.clone(),
            partner_stage: record.partner_stage.clone(),
            close_date: record.close_date,
            days_remaining,
            urgency: Urgency::from_days(days_remaining),
            amount: record.total_amount,
            next_step: record.next_step.clone(),
        }
    }
}

/// Items for one owner, soonest close first.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerFollowUps {
    pub owner_name: String,
    pub items: Vec<FollowUpItem>,
}

impl OwnerFollowUps {
    /// Overdue or closing within a week.
    pub fn urgent_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.days_remaining.is_some_and(|days| days <= 7))
            .count()
    }

    /// Closing in 8 to 30 days.
    pub fn next_30_days_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.urgency == Urgency::Soon)
            .count()
    }
}

/// All owners working with one partner.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerFollowUps {
    /// `None` when the records carry no partner name.
    pub partner: Option<String>,
    /// Distinct owner emails, sorted.
    pub emails: BTreeSet<String>,
    /// Owners sorted by name.
    pub owners: Vec<OwnerFollowUps>,
}

impl PartnerFollowUps {
    pub fn display_name(&self, locale: Locale) -> &str {
        self.partner.as_deref().unwrap_or(locale.unnamed_partner())
    }

    pub fn item_count(&self) -> usize {
        self.owners.iter().map(|owner| owner.items.len()).sum()
    }

    pub fn urgent_count(&self) -> usize {
        self.owners.iter().map(OwnerFollowUps::urgent_count).sum()
    }
}

/// Follow-up plan for every active opportunity.
///
/// # Example
///
/// ```
/// use pipeline_hygiene_core::{OpportunityDataset, OpportunityRecord};
/// use pipeline_hygiene_rules::companion::{FollowUpPlan, Urgency};
/// use pipeline_hygiene_rules::EvaluationContext;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
/// let dataset = OpportunityDataset::new(vec![OpportunityRecord {
///     partner_name: Some("Partner A".into()),
///     owner_email: Some("ana@partner-a.com".into()),
///     close_date: NaiveDate::from_ymd_opt(2025, 3, 18),
///     ..OpportunityRecord::default()
/// }]);
///
/// let plan = FollowUpPlan::build(&dataset, &EvaluationContext::new(today));
/// assert_eq!(plan.partners.len(), 1);
/// assert_eq!(plan.partners[0].owners[0].items[0].urgency, Urgency::Urgent);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FollowUpPlan {
    /// Partners sorted by name; the unnamed partner sorts first.
    pub partners: Vec<PartnerFollowUps>,
}

type OwnerBuckets = BTreeMap<String, Vec<FollowUpItem>>;

impl FollowUpPlan {
    pub fn build(dataset: &OpportunityDataset, ctx: &EvaluationContext) -> Self {
        let mut partners: BTreeMap<Option<String>, (BTreeSet<String>, OwnerBuckets)> =
            BTreeMap::new();

        for record in dataset.iter() {
            if !record.is_active() || !ctx.is_eligible(record) {
                continue;
            }
            let Some(email) = record
                .owner_email
                .as_deref()
                .map(str::trim)
                .filter(|email| !email.is_empty())
            else {
                continue;
            };
            let owner = record.owner_name.clone().unwrap_or_else(|| email.to_string());
            let (emails, owners) = partners.entry(record.partner_name.clone()).or_default();
            emails.insert(email.to_string());
            owners
                .entry(owner)
                .or_default()
                .push(FollowUpItem::from_record(record, email.to_string(), ctx));
        }

        let partners = partners
            .into_iter()
            .map(|(partner, (emails, owners))| PartnerFollowUps {
                partner,
                emails,
                owners: owners
                    .into_iter()
                    .map(|(owner_name, mut items)| {
                        items.sort_by(|a, b| {
                            let days = |item: &FollowUpItem| item.days_remaining.unwrap_or(i64::MAX);
                            days(a)
                                .cmp(&days(b))
                                .then(b.amount.unwrap_or_default().cmp(&a.amount.unwrap_or_default()))
                        });
                        OwnerFollowUps { owner_name, items }
                    })
                    .collect(),
            })
            .collect();

        Self { partners }
    }

    pub fn item_count(&self) -> usize {
        self.partners.iter().map(PartnerFollowUps::item_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}
