//! Pipeline Hygiene - data-hygiene rules for partner sales opportunities
//!
//! Feed in an [`OpportunityDataset`], get back rule violations grouped by
//! owner with a priority per group.
//!
//! # Example
//!
//! ```rust
//! use pipeline_hygiene::prelude::*;
//! use chrono::NaiveDate;
//!
//! let dataset = OpportunityDataset::new(vec![OpportunityRecord {
//!     id: Some("OPP1".into()),
//!     owner_email: Some("ana@partner.com".into()),
//!     aws_stage: Some(Stage::Committed.into()),
//!     partner_stage: Some(Stage::Launched.into()),
//!     total_amount: Some(500.into()),
//!     ..OpportunityRecord::default()
//! }]);
//! let config = HygieneConfig::new()
//!     .with_reference_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
//!
//! let run = pipeline_hygiene::run(&dataset, &config).unwrap();
//! assert_eq!(run.report.match_count(RuleId::PartnerFinalized), 1);
//! assert_eq!(run.groups.get("ana@partner.com").unwrap().priority(), Priority::Critical);
//! ```

// Data model and catalog
pub use pipeline_hygiene_core::{
    AceOpportunityType, HygieneError, Locale, NoPartnerOpportunity, OpportunityDataset,
    OpportunityRecord, PartnerType, RawNoPartnerOpportunity, RawOpportunity, RowKey, RuleId,
    Stage, StageOrder, StageValue,
};

// Configuration
pub use pipeline_hygiene_config::{
    ConfigError, HygieneConfig, PriorityConfig, ThresholdConfig, WindowConfig,
};

// Evaluation, presentation, and aggregation
pub use pipeline_hygiene_rules::{
    boxed_standard_rules, standard_rules, Aggregator, EvaluationContext, EvaluationReport,
    Evidence, EvidenceValue, GroupBy, GroupedViolations, HygieneRule, LaunchedFilter, Priority,
    RejectionScenario, RuleEvaluator, RuleSet, Violation, ViolationGroup,
};

// Companion checks
pub use pipeline_hygiene_rules::companion::{
    closing_without_partner, FollowUpPlan, NoPartnerAlert, Urgency,
};

#[cfg(feature = "console")]
pub use pipeline_hygiene_console as console;

mod pipeline;
pub use pipeline::{run, run_default, HygieneRun, Pipeline};

pub mod prelude {
    pub use super::{
        GroupBy, HygieneConfig, HygieneError, HygieneRun, LaunchedFilter, Locale,
        OpportunityDataset, OpportunityRecord, Pipeline, Priority, RawOpportunity, RuleId, Stage,
        StageValue, Violation,
    };
}
