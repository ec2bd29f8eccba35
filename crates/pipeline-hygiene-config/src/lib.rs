//! Configuration system for the pipeline hygiene engine.
//!
//! Load hygiene configuration from TOML or YAML to control the partner
//! exclusion list, the reference date, date windows, and priority
//! thresholds without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use pipeline_hygiene_config::HygieneConfig;
//! use pipeline_hygiene_core::{Locale, RuleId};
//!
//! let config = HygieneConfig::from_toml_str(r#"
//!     excluded_partners = ["Omie"]
//!     reference_date = "2025-03-01"
//!     locale = "english"
//!     disabled_rules = ["zero_amount"]
//!
//!     [windows]
//!     stalled_days = 60
//!
//!     [priority]
//!     high_total = 20
//! "#).unwrap();
//!
//! assert_eq!(config.locale, Locale::English);
//! assert_eq!(config.windows.stalled_days, 60);
//! assert_eq!(config.windows.launch_upcoming_days, 30);
//! assert!(!config.is_rule_enabled(RuleId::ZeroAmount));
//! assert!(config.is_partner_excluded("omie"));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use pipeline_hygiene_config::HygieneConfig;
//!
//! let config = HygieneConfig::load("hygiene.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use chrono::NaiveDate;
use pipeline_hygiene_core::{HygieneError, Locale, RuleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for HygieneError {
    fn from(err: ConfigError) -> Self {
        HygieneError::Config(err.to_string())
    }
}

/// Main hygiene configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HygieneConfig {
    /// Partners whose records are silenced entirely.
    #[serde(default)]
    pub excluded_partners: Vec<String>,

    /// Fixed "today" for evaluation. The system clock is used when absent.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    /// Language for rule titles, priority labels, and month names.
    #[serde(default)]
    pub locale: Locale,

    /// Rules that are skipped during evaluation.
    #[serde(default)]
    pub disabled_rules: Vec<RuleId>,

    /// Evaluate rules on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub windows: WindowConfig,

    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(default)]
    pub priority: PriorityConfig,
}

impl HygieneConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or holds
    /// out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Adds a partner to the exclusion list.
    pub fn with_excluded_partner(mut self, partner: impl Into<String>) -> Self {
        self.excluded_partners.push(partner.into());
        self
    }

    /// Pins the evaluation date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_windows(mut self, windows: WindowConfig) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_priority(mut self, priority: PriorityConfig) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_co_sell_min_amount(mut self, amount: Decimal) -> Self {
        self.thresholds.co_sell_min_amount = amount;
        self
    }

    /// Disables a rule.
    pub fn with_disabled_rule(mut self, rule: RuleId) -> Self {
        if !self.disabled_rules.contains(&rule) {
            self.disabled_rules.push(rule);
        }
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns true unless the rule is listed in `disabled_rules`.
    pub fn is_rule_enabled(&self, rule: RuleId) -> bool {
        !self.disabled_rules.contains(&rule)
    }

    /// Case-insensitive match against the exclusion list.
    pub fn is_partner_excluded(&self, partner: &str) -> bool {
        let partner = partner.trim();
        self.excluded_partners
            .iter()
            .any(|excluded| excluded.trim().eq_ignore_ascii_case(partner))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for negative or oversized windows
    /// and negative thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.windows.validate()?;
        if self.thresholds.co_sell_min_amount.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "thresholds.co_sell_min_amount must not be negative, got {}",
                self.thresholds.co_sell_min_amount
            )));
        }
        if self.priority.medium_total > self.priority.high_total {
            return Err(ConfigError::Invalid(format!(
                "priority.medium_total ({}) exceeds priority.high_total ({})",
                self.priority.medium_total, self.priority.high_total
            )));
        }
        Ok(())
    }
}

/// Date windows, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct WindowConfig {
    /// Horizon for upcoming launch dates.
    pub launch_upcoming_days: i64,

    /// Inactivity after which a partner record counts as stalled.
    pub stalled_days: i64,

    /// Horizon for imminent close dates.
    pub close_date_days: i64,

    /// Horizon for close dates of deals without a partner.
    pub no_partner_close_days: i64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            launch_upcoming_days: 30,
            stalled_days: 45,
            close_date_days: 30,
            no_partner_close_days: 60,
        }
    }
}

impl WindowConfig {
    /// Largest accepted window, roughly one hundred years.
    pub const MAX_DAYS: i64 = 36_500;

    fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("launch_upcoming_days", self.launch_upcoming_days),
            ("stalled_days", self.stalled_days),
            ("close_date_days", self.close_date_days),
            ("no_partner_close_days", self.no_partner_close_days),
        ];
        for (name, days) in windows {
            if days < 0 {
                return Err(ConfigError::Invalid(format!(
                    "windows.{name} must not be negative, got {days}"
                )));
            }
            if days > Self::MAX_DAYS {
                return Err(ConfigError::Invalid(format!(
                    "windows.{name} must not exceed {} days, got {days}",
                    Self::MAX_DAYS
                )));
            }
        }
        Ok(())
    }
}

/// Amount thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ThresholdConfig {
    /// Smallest amount for which a missing co-sell attestation matters.
    pub co_sell_min_amount: Decimal,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            co_sell_min_amount: Decimal::ONE_HUNDRED,
        }
    }
}

/// Group priority thresholds. Counts must be exceeded, not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PriorityConfig {
    pub high_co_sell_count: usize,
    pub high_total: usize,
    pub medium_total: usize,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            high_co_sell_count: 5,
            high_total: 15,
            medium_total: 5,
        }
    }
}
