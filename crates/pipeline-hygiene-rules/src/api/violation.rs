//! Violation records and their evidence.

use std::fmt;

use chrono::NaiveDate;
use pipeline_hygiene_core::{OpportunityRecord, RowKey, RuleId, StageValue};
use rust_decimal::Decimal;

use crate::aggregate::GroupBy;

/// Which situation made a rejected opportunity a re-share candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionScenario {
    /// No other row shares the opportunity id.
    Unique,
    /// Every other row sharing the id was rejected as well.
    AllRejected,
}

impl RejectionScenario {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionScenario::Unique => "unique",
            RejectionScenario::AllRejected => "all_rejected",
        }
    }
}

impl fmt::Display for RejectionScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single evidence value.
#[derive(Debug, Clone, PartialEq)]
pub enum EvidenceValue {
    Text(String),
    Stage(StageValue),
    Date(NaiveDate),
    Days(i64),
    Amount(Decimal),
    Count(usize),
    Flag(bool),
    Scenario(RejectionScenario),
    Absent,
}

impl From<Option<String>> for EvidenceValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(EvidenceValue::Absent, EvidenceValue::Text)
    }
}

impl From<Option<StageValue>> for EvidenceValue {
    fn from(value: Option<StageValue>) -> Self {
        value.map_or(EvidenceValue::Absent, EvidenceValue::Stage)
    }
}

impl fmt::Display for EvidenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceValue::Text(text) => f.write_str(text),
            EvidenceValue::Stage(stage) => write!(f, "{stage}"),
            EvidenceValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            EvidenceValue::Days(days) => write!(f, "{days}"),
            EvidenceValue::Amount(amount) => write!(f, "{amount}"),
            EvidenceValue::Count(count) => write!(f, "{count}"),
            EvidenceValue::Flag(flag) => write!(f, "{flag}"),
            EvidenceValue::Scenario(scenario) => write!(f, "{scenario}"),
            EvidenceValue::Absent => f.write_str("-"),
        }
    }
}

/// Small ordered key/value map explaining why a rule fired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evidence {
    entries: Vec<(&'static str, EvidenceValue)>,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any previous value under the same key.
    pub fn with(mut self, key: &'static str, value: EvidenceValue) -> Self {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&EvidenceValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Returns a day count stored under `key`.
    pub fn days(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(EvidenceValue::Days(days)) => Some(*days),
            _ => None,
        }
    }

    pub fn count(&self, key: &str) -> Option<usize> {
        match self.get(key) {
            Some(EvidenceValue::Count(count)) => Some(*count),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &EvidenceValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// One rule firing on one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Which rule fired.
    pub rule: RuleId,
    /// Row that fired.
    pub key: RowKey,
    /// Opportunity id of the row, if present.
    pub record_id: Option<String>,
    /// Key of the group this violation belongs to. Starts as the
    /// lower-cased owner email and is rewritten by `Aggregator::group`.
    pub grouping_key: Option<String>,
    pub evidence: Evidence,
}

impl Violation {
    /// Creates a violation for `record`, keyed by its normalized owner email.
    pub fn new(rule: RuleId, record: &OpportunityRecord, evidence: Evidence) -> Self {
        Self {
            rule,
            key: record.key,
            record_id: record.id.clone(),
            grouping_key: GroupBy::OwnerEmail.key_for(record),
            evidence,
        }
    }

    /// Sort key: catalog order, then record id, then row key.
    pub fn sort_key(&self) -> (RuleId, Option<&str>, RowKey) {
        (self.rule, self.record_id.as_deref(), self.key)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            self.rule,
            self.record_id.as_deref().unwrap_or("-"),
            self.evidence
        )
    }
}
