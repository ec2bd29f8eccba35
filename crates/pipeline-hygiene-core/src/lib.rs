//! Pipeline Hygiene Core - data model and rule catalog
//!
//! This crate provides the fundamental types shared by the hygiene engine:
//! - Opportunity records and the string-typed ingestion shape they are built from
//! - Stage ordering and categorical field types
//! - The indexed, read-only opportunity dataset
//! - The closed catalog of rule identifiers
//! - Locale-aware display text

pub mod domain;
pub mod error;
pub mod locale;
pub mod rule;

#[cfg(test)]
mod rule_tests;

pub use domain::{
    AceOpportunityType, NoPartnerOpportunity, OpportunityDataset, OpportunityRecord, PartnerType,
    RawNoPartnerOpportunity, RawOpportunity, RowKey, Stage, StageOrder, StageValue,
};
pub use error::HygieneError;
pub use locale::Locale;
pub use rule::RuleId;
