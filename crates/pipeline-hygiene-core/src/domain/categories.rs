use std::fmt;

use super::coerce;

/// How an opportunity entered the co-sell program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AceOpportunityType {
    PartnerSourced,
    PartnerSourcedVisibilityOnly,
    AwsSharedWithPartner,
    EligibleToShare,
    Other(String),
}

impl AceOpportunityType {
    pub const PARTNER_SOURCED: &'static str = "Partner Sourced Opportunity";
    pub const VISIBILITY_ONLY: &'static str = "Partner Sourced For Visibility Only";
    pub const AWS_SHARED: &'static str = "AWS Opportunity Shared with Partner";
    pub const ELIGIBLE_TO_SHARE: &'static str = "Eligible to Share with Partner";

    /// Parses a raw value. Blank and placeholder cells are absent.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = coerce::text(Some(raw))?;
        let known = [
            (Self::PARTNER_SOURCED, Self::PartnerSourced),
            (Self::VISIBILITY_ONLY, Self::PartnerSourcedVisibilityOnly),
            (Self::AWS_SHARED, Self::AwsSharedWithPartner),
            (Self::ELIGIBLE_TO_SHARE, Self::EligibleToShare),
        ];
        Some(
            known
                .into_iter()
                .find(|(label, _)| label.eq_ignore_ascii_case(&trimmed))
                .map(|(_, value)| value)
                .unwrap_or(Self::Other(trimmed)),
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PartnerSourced => Self::PARTNER_SOURCED,
            Self::PartnerSourcedVisibilityOnly => Self::VISIBILITY_ONLY,
            Self::AwsSharedWithPartner => Self::AWS_SHARED,
            Self::EligibleToShare => Self::ELIGIBLE_TO_SHARE,
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for AceOpportunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partner classification from the account record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartnerType {
    Technology,
    Other(String),
}

impl PartnerType {
    pub const TECHNOLOGY: &'static str = "Technology Partner";

    /// Parses a raw value. Blank and placeholder cells are absent.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = coerce::text(Some(raw))?;
        if trimmed.eq_ignore_ascii_case(Self::TECHNOLOGY) {
            Some(Self::Technology)
        } else {
            Some(Self::Other(trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Technology => Self::TECHNOLOGY,
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PartnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
