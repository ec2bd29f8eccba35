// Stage domain shared by the AWS-side and partner-side stage fields.

use std::cmp::Ordering;
use std::fmt;

use super::coerce;

/// A recognized opportunity stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    #[cfg_attr(feature = "serde", serde(rename = "Prospect"))]
    Prospect,
    #[cfg_attr(feature = "serde", serde(rename = "Qualified"))]
    Qualified,
    #[cfg_attr(feature = "serde", serde(rename = "Technical Validation"))]
    TechnicalValidation,
    #[cfg_attr(feature = "serde", serde(rename = "Business Validation"))]
    BusinessValidation,
    #[cfg_attr(feature = "serde", serde(rename = "Committed"))]
    Committed,
    #[cfg_attr(feature = "serde", serde(rename = "Launched"))]
    Launched,
    #[cfg_attr(feature = "serde", serde(rename = "Closed Lost"))]
    ClosedLost,
}

impl Stage {
    /// All recognized stages, active stages first in pipeline order.
    pub const ALL: [Stage; 7] = [
        Stage::Prospect,
        Stage::Qualified,
        Stage::TechnicalValidation,
        Stage::BusinessValidation,
        Stage::Committed,
        Stage::Launched,
        Stage::ClosedLost,
    ];

    /// Returns the label used by the CRM export.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Prospect => "Prospect",
            Stage::Qualified => "Qualified",
            Stage::TechnicalValidation => "Technical Validation",
            Stage::BusinessValidation => "Business Validation",
            Stage::Committed => "Committed",
            Stage::Launched => "Launched",
            Stage::ClosedLost => "Closed Lost",
        }
    }

    /// Parses a CRM stage label, ignoring surrounding whitespace and case.
    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.label().eq_ignore_ascii_case(trimmed))
    }

    /// Launched and Closed Lost are terminal: nothing moves past them.
    pub fn is_finalized(self) -> bool {
        matches!(self, Stage::Launched | Stage::ClosedLost)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Total order over recognized stages.
///
/// Closed Lost ranks below every active stage.
///
/// # Example
///
/// ```
/// use pipeline_hygiene_core::{Stage, StageOrder, StageValue};
/// use std::cmp::Ordering;
///
/// assert!(StageOrder::rank(Stage::Qualified) < StageOrder::rank(Stage::Committed));
/// assert_eq!(StageOrder::rank(Stage::ClosedLost), 0);
///
/// let unknown = StageValue::from_raw("Negotiation").unwrap();
/// let known = StageValue::from_raw("Qualified").unwrap();
/// assert_eq!(StageOrder::compare(&unknown, &known), None);
/// assert_eq!(
///     StageOrder::compare(&known, &StageValue::Recognized(Stage::Launched)),
///     Some(Ordering::Less)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StageOrder;

impl StageOrder {
    /// Returns the numeric rank of a stage.
    pub fn rank(stage: Stage) -> u8 {
        match stage {
            Stage::ClosedLost => 0,
            Stage::Prospect => 1,
            Stage::Qualified => 2,
            Stage::TechnicalValidation => 3,
            Stage::BusinessValidation => 4,
            Stage::Committed => 5,
            Stage::Launched => 6,
        }
    }

    /// Compares two stage values.
    ///
    /// Returns `None` when either side is unrecognized; such values never
    /// take part in stage-order comparisons.
    pub fn compare(a: &StageValue, b: &StageValue) -> Option<Ordering> {
        let a = a.recognized()?;
        let b = b.recognized()?;
        Some(Self::rank(a).cmp(&Self::rank(b)))
    }
}

/// A stage field as reported in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StageValue {
    /// One of the recognized stages.
    Recognized(Stage),
    /// Any other non-blank value, kept verbatim.
    Unrecognized(String),
}

impl StageValue {
    /// Parses a raw stage string. Blank and placeholder cells are absent.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = coerce::text(Some(raw))?;
        Some(match Stage::from_label(&trimmed) {
            Some(stage) => StageValue::Recognized(stage),
            None => StageValue::Unrecognized(trimmed),
        })
    }

    /// Returns the recognized stage, if any.
    pub fn recognized(&self) -> Option<Stage> {
        match self {
            StageValue::Recognized(stage) => Some(*stage),
            StageValue::Unrecognized(_) => None,
        }
    }

    /// Returns true if this value is exactly the given stage.
    pub fn is(&self, stage: Stage) -> bool {
        self.recognized() == Some(stage)
    }

    /// Returns true for Launched or Closed Lost.
    pub fn is_finalized(&self) -> bool {
        self.recognized().is_some_and(Stage::is_finalized)
    }

    /// Returns the display text.
    pub fn as_str(&self) -> &str {
        match self {
            StageValue::Recognized(stage) => stage.label(),
            StageValue::Unrecognized(raw) => raw,
        }
    }
}

impl From<Stage> for StageValue {
    fn from(stage: Stage) -> Self {
        StageValue::Recognized(stage)
    }
}

impl fmt::Display for StageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
