// Opportunities tracked without any partner attached.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::coerce;
use super::stage::StageValue;

/// A deal with no partner, from the secondary "no partner" export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoPartnerOpportunity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub account_name: Option<String>,
    pub stage: Option<StageValue>,
    pub annualized_revenue: Option<Decimal>,
    pub currency: Option<String>,
    pub age_days: Option<i64>,
    pub next_step: Option<String>,
    pub close_date: Option<NaiveDate>,
    pub owner_name: Option<String>,
}

/// String-typed row of the "no partner" export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawNoPartnerOpportunity {
    #[cfg_attr(feature = "serde", serde(alias = "18 Character Oppty ID", deserialize_with = "super::record::loose::cell"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity Name", deserialize_with = "super::record::loose::cell"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Account Name", deserialize_with = "super::record::loose::cell"))]
    pub account_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Stage", deserialize_with = "super::record::loose::cell"))]
    pub stage: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Annualized Revenue (converted)", deserialize_with = "super::record::loose::cell"))]
    pub annualized_revenue: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Annualized Revenue (converted) Currency", deserialize_with = "super::record::loose::cell"))]
    pub currency: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Age", deserialize_with = "super::record::loose::cell"))]
    pub age_days: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Next Step", deserialize_with = "super::record::loose::cell"))]
    pub next_step: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Close Date", deserialize_with = "super::record::loose::cell"))]
    pub close_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity Owner", deserialize_with = "super::record::loose::cell"))]
    pub owner_name: Option<String>,
}

impl From<RawNoPartnerOpportunity> for NoPartnerOpportunity {
    fn from(raw: RawNoPartnerOpportunity) -> Self {
        let cell = |value: &Option<String>| coerce::text(value.as_deref());
        Self {
            id: cell(&raw.id),
            name: cell(&raw.name),
            account_name: cell(&raw.account_name),
            stage: raw.stage.as_deref().and_then(StageValue::from_raw),
            annualized_revenue: raw.annualized_revenue.as_deref().and_then(coerce::amount),
            currency: cell(&raw.currency),
            age_days: raw
                .age_days
                .as_deref()
                .and_then(coerce::amount)
                .and_then(|age| i64::try_from(age.trunc()).ok()),
            next_step: cell(&raw.next_step),
            close_date: raw.close_date.as_deref().and_then(coerce::date),
            owner_name: cell(&raw.owner_name),
        }
    }
}
