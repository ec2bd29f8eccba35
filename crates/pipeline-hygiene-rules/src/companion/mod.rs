//! Companion checks run alongside the rule catalog.

mod followup;
mod no_partner;

#[cfg(test)]
mod tests;

pub use followup::{FollowUpItem, FollowUpPlan, OwnerFollowUps, PartnerFollowUps, Urgency};
pub use no_partner::{closing_without_partner, NoPartnerAlert};
