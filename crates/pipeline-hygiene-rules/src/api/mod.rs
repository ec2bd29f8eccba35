//! Rule API.
//!
//! This module provides:
//! - `HygieneRule` trait for a single predicate rule
//! - `RuleSet` trait for tuple-based and boxed rule collections
//! - `Violation` and `Evidence`, the output of a rule
//! - Analysis types for per-rule and per-record breakdowns

pub mod analysis;
pub mod rule_set;
pub mod violation;


pub use analysis::{EvaluationReport, RecordViolationMap, RecordViolations, RuleAnalysis};
pub use rule_set::{HygieneRule, RuleSet};
pub use violation::{Evidence, EvidenceValue, RejectionScenario, Violation};
