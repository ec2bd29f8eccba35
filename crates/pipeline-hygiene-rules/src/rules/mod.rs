//! The standard rule catalog.
//!
//! Rules are grouped by what they inspect:
//! - [`classification`] - categorical fields and amounts (1, 5, 6, 8, 13)
//! - [`dates`] - date windows (2, 3, 4, 12)
//! - [`stages`] - stage alignment (7, 9, 10)
//! - [`siblings`] - rows sharing an opportunity id (11, 14)

pub mod classification;
pub mod dates;
pub mod siblings;
pub mod stages;

#[cfg(test)]
mod tests;

pub use classification::{
    CoSellMissing, DeliveryModelMismatch, VisibilityOnly, VisibilityOnlyZeroAmount, ZeroAmount,
};
pub use dates::{CloseDateImminent, LaunchDateOverdue, LaunchDateUpcoming, StalledOpportunity};
pub use siblings::{EligibleNotShared, RejectedReshare};
pub use stages::{PartnerFinalized, PartnerStageAhead, PartnerStageBehind};

use crate::api::HygieneRule;

/// The full catalog as a typed tuple, in catalog order.
pub type StandardRules = (
    DeliveryModelMismatch,
    LaunchDateOverdue,
    LaunchDateUpcoming,
    StalledOpportunity,
    VisibilityOnly,
    VisibilityOnlyZeroAmount,
    PartnerStageBehind,
    CoSellMissing,
    PartnerStageAhead,
    PartnerFinalized,
    EligibleNotShared,
    CloseDateImminent,
    ZeroAmount,
    RejectedReshare,
);

/// Returns the full catalog as a typed tuple.
pub fn standard_rules() -> StandardRules {
    (
        DeliveryModelMismatch,
        LaunchDateOverdue,
        LaunchDateUpcoming,
        StalledOpportunity,
        VisibilityOnly,
        VisibilityOnlyZeroAmount,
        PartnerStageBehind,
        CoSellMissing,
        PartnerStageAhead,
        PartnerFinalized,
        EligibleNotShared,
        CloseDateImminent,
        ZeroAmount,
        RejectedReshare,
    )
}

/// Returns the full catalog as boxed rules, for parallel evaluation.
pub fn boxed_standard_rules() -> Vec<Box<dyn HygieneRule>> {
    vec![
        Box::new(DeliveryModelMismatch),
        Box::new(LaunchDateOverdue),
        Box::new(LaunchDateUpcoming),
        Box::new(StalledOpportunity),
        Box::new(VisibilityOnly),
        Box::new(VisibilityOnlyZeroAmount),
        Box::new(PartnerStageBehind),
        Box::new(CoSellMissing),
        Box::new(PartnerStageAhead),
        Box::new(PartnerFinalized),
        Box::new(EligibleNotShared),
        Box::new(CloseDateImminent),
        Box::new(ZeroAmount),
        Box::new(RejectedReshare),
    ]
}
