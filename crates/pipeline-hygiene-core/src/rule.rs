//! Rule catalog.
//!
//! Every check the engine performs is identified by a [`RuleId`]. The
//! declaration order of the variants is the catalog order, which is also the
//! order violations are presented in.

use std::fmt;
use std::str::FromStr;

use crate::error::HygieneError;
use crate::locale::Locale;

/// Identifier of a hygiene rule.
///
/// # Example
///
/// ```
/// use pipeline_hygiene_core::{Locale, RuleId};
///
/// let rule: RuleId = "partner_finalized".parse().unwrap();
/// assert_eq!(rule, RuleId::PartnerFinalized);
/// assert_eq!(rule.number(), 10);
/// assert_eq!(rule.title(Locale::English), "Partner finalized, AWS still active");
///
/// // Catalog numbers are accepted too.
/// assert_eq!("7".parse::<RuleId>().unwrap(), RuleId::PartnerStageBehind);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RuleId {
    /// Technology partner on an active deal without a SaaS/PaaS delivery model.
    DeliveryModelMismatch,
    /// Target launch date already passed.
    LaunchDateOverdue,
    /// Target launch date inside the upcoming window.
    LaunchDateUpcoming,
    /// No partner-side update inside the inactivity window.
    StalledOpportunity,
    /// Opportunity shared for visibility only.
    VisibilityOnly,
    /// Visibility-only opportunity without an amount.
    VisibilityOnlyZeroAmount,
    /// Partner reports an earlier stage than AWS.
    PartnerStageBehind,
    /// Launched technology-partner deal without co-sell attestation.
    CoSellMissing,
    /// Partner reports a later stage than AWS.
    PartnerStageAhead,
    /// Partner closed the deal (launched or lost) while AWS has not.
    PartnerFinalized,
    /// Eligible to share, but no row shows it shared.
    EligibleNotShared,
    /// Close date inside the upcoming window.
    CloseDateImminent,
    /// Active, non-visibility opportunity without an amount.
    ZeroAmount,
    /// Rejected by every partner it was shared with.
    RejectedReshare,
}

impl RuleId {
    /// All rules in catalog order.
    pub const ALL: [RuleId; 14] = [
        RuleId::DeliveryModelMismatch,
        RuleId::LaunchDateOverdue,
        RuleId::LaunchDateUpcoming,
        RuleId::StalledOpportunity,
        RuleId::VisibilityOnly,
        RuleId::VisibilityOnlyZeroAmount,
        RuleId::PartnerStageBehind,
        RuleId::CoSellMissing,
        RuleId::PartnerStageAhead,
        RuleId::PartnerFinalized,
        RuleId::EligibleNotShared,
        RuleId::CloseDateImminent,
        RuleId::ZeroAmount,
        RuleId::RejectedReshare,
    ];

    /// Returns the 1-based catalog number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the rule with the given catalog number.
    pub fn from_number(number: u8) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize))
            .copied()
    }

    /// Returns the stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            RuleId::DeliveryModelMismatch => "delivery_model_mismatch",
            RuleId::LaunchDateOverdue => "launch_date_overdue",
            RuleId::LaunchDateUpcoming => "launch_date_upcoming",
            RuleId::StalledOpportunity => "stalled_opportunity",
            RuleId::VisibilityOnly => "visibility_only",
            RuleId::VisibilityOnlyZeroAmount => "visibility_only_zero_amount",
            RuleId::PartnerStageBehind => "partner_stage_behind",
            RuleId::CoSellMissing => "co_sell_missing",
            RuleId::PartnerStageAhead => "partner_stage_ahead",
            RuleId::PartnerFinalized => "partner_finalized",
            RuleId::EligibleNotShared => "eligible_not_shared",
            RuleId::CloseDateImminent => "close_date_imminent",
            RuleId::ZeroAmount => "zero_amount",
            RuleId::RejectedReshare => "rejected_reshare",
        }
    }

    /// Returns the human-facing title in the given locale.
    pub fn title(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Portuguese => match self {
                RuleId::DeliveryModelMismatch => "Delivery Model incorreto",
                RuleId::LaunchDateOverdue => "Launch date vencido",
                RuleId::LaunchDateUpcoming => "Launch date próximo",
                RuleId::StalledOpportunity => "Oportunidade parada",
                RuleId::VisibilityOnly => "Oportunidade apenas para visibilidade",
                RuleId::VisibilityOnlyZeroAmount => "Oportunidade de visibilidade com valor zero",
                RuleId::PartnerStageBehind => "Partner stage atrasado em relação à AWS",
                RuleId::CoSellMissing => "Technology partner - co-sell não confirmado",
                RuleId::PartnerStageAhead => "Partner stage à frente da AWS",
                RuleId::PartnerFinalized => "Desalinhamento - partner finalizou",
                RuleId::EligibleNotShared => "Compartilhar com partner",
                RuleId::CloseDateImminent => "Close date próximo",
                RuleId::ZeroAmount => "Oportunidade com valor zero",
                RuleId::RejectedReshare => "Oportunidade rejeitada para re-compartilhamento",
            },
            Locale::English => match self {
                RuleId::DeliveryModelMismatch => "Delivery model mismatch",
                RuleId::LaunchDateOverdue => "Overdue launch date",
                RuleId::LaunchDateUpcoming => "Upcoming launch date",
                RuleId::StalledOpportunity => "Stalled opportunity",
                RuleId::VisibilityOnly => "For visibility only opportunity",
                RuleId::VisibilityOnlyZeroAmount => "Visibility-only opportunity with zero amount",
                RuleId::PartnerStageBehind => "Partner stage behind AWS",
                RuleId::CoSellMissing => "Technology partner co-sell missing",
                RuleId::PartnerStageAhead => "Partner stage ahead of AWS",
                RuleId::PartnerFinalized => "Partner finalized, AWS still active",
                RuleId::EligibleNotShared => "Eligible to share with partner",
                RuleId::CloseDateImminent => "Upcoming close date",
                RuleId::ZeroAmount => "Zero amount opportunity",
                RuleId::RejectedReshare => "Rejected opportunity, re-share candidate",
            },
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RuleId {
    type Err = HygieneError;

    /// Parses a rule code (`"zero_amount"`) or catalog number (`"13"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Self::from_number(number)
                .ok_or_else(|| HygieneError::UnknownRule(trimmed.to_string()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|rule| rule.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| HygieneError::UnknownRule(trimmed.to_string()))
    }
}
