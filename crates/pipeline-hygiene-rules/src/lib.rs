//! Rule evaluation for the pipeline hygiene engine.
//!
//! This crate provides the hygiene rule engine:
//! - The `HygieneRule` trait and tuple-based `RuleSet`s
//! - The 14-rule standard catalog
//! - `RuleEvaluator`, producing an `EvaluationReport`
//! - The Launched presentation filter
//! - Aggregation by owner, partner, or company with priorities
//! - Companion checks (follow-up planning, deals without a partner)
//!
//! # Architecture
//!
//! Rules are pure predicates over one record plus read-only access to the
//! whole dataset. Evaluation never fails: malformed fields were already
//! coerced to absent values, and a rule that cannot decide does not fire.

pub mod aggregate;
pub mod api;
pub mod companion;
pub mod context;
pub mod evaluator;
pub mod presentation;
pub mod rules;


pub use aggregate::{
    company_from_email, Aggregator, FinalizedBreakdown, GroupBy, GroupSummary, GroupedViolations,
    Priority, ViolationGroup,
};
pub use api::{
    EvaluationReport, Evidence, EvidenceValue, HygieneRule, RecordViolationMap, RecordViolations,
    RejectionScenario, RuleAnalysis, RuleSet, Violation,
};
pub use context::EvaluationContext;
pub use evaluator::RuleEvaluator;
pub use presentation::LaunchedFilter;
pub use rules::{boxed_standard_rules, standard_rules, StandardRules};
