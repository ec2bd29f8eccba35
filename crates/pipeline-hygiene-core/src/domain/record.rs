// Typed opportunity rows and their string-typed ingestion form.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::categories::{AceOpportunityType, PartnerType};
use super::coerce;
use super::stage::{Stage, StageValue};

/// Identity of a row within its dataset.
///
/// Opportunity ids may repeat, so rows are told apart by position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowKey(usize);

impl RowKey {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}", self.0)
    }
}

/// One opportunity row with typed fields.
///
/// Every field except the row key may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityRecord {
    pub key: RowKey,
    pub id: Option<String>,
    pub apn_id: Option<String>,
    pub name: Option<String>,
    pub account_name: Option<String>,
    pub partner_name: Option<String>,
    pub aws_stage: Option<StageValue>,
    pub partner_stage: Option<StageValue>,
    pub partner_status: Option<String>,
    pub ace_opportunity_type: Option<AceOpportunityType>,
    pub partner_type: Option<PartnerType>,
    pub delivery_model: Option<String>,
    pub co_sell_attested: bool,
    pub total_amount: Option<Decimal>,
    pub close_date: Option<NaiveDate>,
    pub target_launch_date: Option<NaiveDate>,
    pub partner_last_modified_date: Option<NaiveDate>,
    pub owner_email: Option<String>,
    pub owner_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub next_step: Option<String>,
}

impl OpportunityRecord {
    /// Amount with absence treated as zero.
    pub fn amount_or_zero(&self) -> Decimal {
        self.total_amount.unwrap_or(Decimal::ZERO)
    }

    pub fn aws_stage_is(&self, stage: Stage) -> bool {
        self.aws_stage.as_ref().is_some_and(|value| value.is(stage))
    }

    pub fn partner_stage_is(&self, stage: Stage) -> bool {
        self.partner_stage
            .as_ref()
            .is_some_and(|value| value.is(stage))
    }

    pub fn aws_finalized(&self) -> bool {
        self.aws_stage.as_ref().is_some_and(StageValue::is_finalized)
    }

    pub fn partner_finalized(&self) -> bool {
        self.partner_stage
            .as_ref()
            .is_some_and(StageValue::is_finalized)
    }

    /// Neither side has reached a terminal stage.
    pub fn is_active(&self) -> bool {
        !self.aws_finalized() && !self.partner_finalized()
    }

    pub fn is_visibility_only(&self) -> bool {
        self.ace_opportunity_type == Some(AceOpportunityType::PartnerSourcedVisibilityOnly)
    }

    pub fn is_technology_partner(&self) -> bool {
        self.partner_type == Some(PartnerType::Technology)
    }

    /// Case-insensitive match on the partner-reported status.
    pub fn status_is(&self, status: &str) -> bool {
        self.partner_status
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case(status))
    }

    /// Id used for sibling matching; blank ids have no siblings.
    pub fn sibling_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Display label: name, then id, then row key.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| self.key.to_string())
    }
}

/// String-typed row as read from a spreadsheet export.
///
/// Field aliases match the CRM column headers, so a JSON or CSV-derived map
/// keyed by those headers deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawOpportunity {
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity: 18 Character Oppty ID", deserialize_with = "loose::cell"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Opportunity ID", deserialize_with = "loose::cell"))]
    pub apn_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity: Opportunity Name", deserialize_with = "loose::cell"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity: Account Name", deserialize_with = "loose::cell"))]
    pub account_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Partner Account", deserialize_with = "loose::cell"))]
    pub partner_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity: Stage", deserialize_with = "loose::cell"))]
    pub aws_stage: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Partner Reported Stage", deserialize_with = "loose::cell"))]
    pub partner_stage: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Partner Reported Status", deserialize_with = "loose::cell"))]
    pub partner_status: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "ACE Opportunity Type", deserialize_with = "loose::cell"))]
    pub ace_opportunity_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Partner Type From Account", deserialize_with = "loose::cell"))]
    pub partner_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Delivery Model", deserialize_with = "loose::cell"))]
    pub delivery_model: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "I Attest to Providing Co-Sell on Opp", deserialize_with = "loose::cell"))]
    pub co_sell_attested: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Total Opportunity Amount", deserialize_with = "loose::cell"))]
    pub total_amount: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity: Close Date", deserialize_with = "loose::cell"))]
    pub close_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Target Launch Date", deserialize_with = "loose::cell"))]
    pub target_launch_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Partner Last Modified Date", deserialize_with = "loose::cell"))]
    pub partner_last_modified_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Opportunity Owner Email", deserialize_with = "loose::cell"))]
    pub owner_email: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Opportunity Owner Name", deserialize_with = "loose::cell"))]
    pub owner_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Partner Sales Contact Name", deserialize_with = "loose::cell"))]
    pub contact_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "APN Partner Sales Contact Email", deserialize_with = "loose::cell"))]
    pub contact_email: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "Next Step", deserialize_with = "loose::cell"))]
    pub next_step: Option<String>,
}

impl From<RawOpportunity> for OpportunityRecord {
    fn from(raw: RawOpportunity) -> Self {
        let cell = |value: &Option<String>| coerce::text(value.as_deref());
        Self {
            key: RowKey::default(),
            id: cell(&raw.id),
            apn_id: cell(&raw.apn_id),
            name: cell(&raw.name),
            account_name: cell(&raw.account_name),
            partner_name: cell(&raw.partner_name),
            aws_stage: raw.aws_stage.as_deref().and_then(StageValue::from_raw),
            partner_stage: raw.partner_stage.as_deref().and_then(StageValue::from_raw),
            partner_status: cell(&raw.partner_status),
            ace_opportunity_type: raw
                .ace_opportunity_type
                .as_deref()
                .and_then(AceOpportunityType::from_raw),
            partner_type: raw.partner_type.as_deref().and_then(PartnerType::from_raw),
            delivery_model: cell(&raw.delivery_model),
            co_sell_attested: raw.co_sell_attested.as_deref().is_some_and(coerce::flag),
            total_amount: raw.total_amount.as_deref().and_then(coerce::amount),
            close_date: raw.close_date.as_deref().and_then(coerce::date),
            target_launch_date: raw.target_launch_date.as_deref().and_then(coerce::date),
            partner_last_modified_date: raw
                .partner_last_modified_date
                .as_deref()
                .and_then(coerce::date),
            owner_email: cell(&raw.owner_email),
            owner_name: cell(&raw.owner_name),
            contact_name: cell(&raw.contact_name),
            contact_email: cell(&raw.contact_email),
            next_step: cell(&raw.next_step),
        }
    }
}

#[cfg(feature = "serde")]
pub(super) mod loose {
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};

    /// Accepts strings, numbers, booleans, or null as a cell value.
    pub(in crate::domain) fn cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellVisitor)
    }

    struct CellVisitor;

    impl<'de> Visitor<'de> for CellVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean, or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }
}
