use std::fmt;

use pipeline_hygiene_config::PriorityConfig;
use pipeline_hygiene_core::Locale;

/// Follow-up urgency of a group, derived from its violation counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Classifies a group.
    ///
    /// Critical on any partner-finalized violation, High when co-sell gaps
    /// or the total exceed their thresholds, Medium above the medium total.
    pub fn classify(
        total: usize,
        co_sell_count: usize,
        finalized_count: usize,
        thresholds: &PriorityConfig,
    ) -> Self {
        if finalized_count > 0 {
            Priority::Critical
        } else if co_sell_count > thresholds.high_co_sell_count || total > thresholds.high_total {
            Priority::High
        } else if total > thresholds.medium_total {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Priority::Critical, Locale::Portuguese) => "CRÍTICA",
            (Priority::High, Locale::Portuguese) => "ALTA",
            (Priority::Medium, Locale::Portuguese) => "MÉDIA",
            (Priority::Low, Locale::Portuguese) => "BAIXA",
            (Priority::Critical, Locale::English) => "CRITICAL",
            (Priority::High, Locale::English) => "HIGH",
            (Priority::Medium, Locale::English) => "MEDIUM",
            (Priority::Low, Locale::English) => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::English))
    }
}
