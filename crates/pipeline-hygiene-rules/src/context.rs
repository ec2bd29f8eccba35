//! Evaluation context: the injected "today" plus tunable windows.

use chrono::NaiveDate;
use pipeline_hygiene_config::{HygieneConfig, WindowConfig};
use pipeline_hygiene_core::{OpportunityRecord, RuleId, Stage};
use rust_decimal::Decimal;

/// Everything a rule may read besides the dataset.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pipeline_hygiene_rules::EvaluationContext;
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let ctx = EvaluationContext::new(today).with_excluded_partner("Omie");
///
/// assert_eq!(ctx.today(), today);
/// assert!(ctx.is_partner_excluded("omie"));
/// assert_eq!(ctx.days_from_today(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()), 10);
/// ```
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    today: NaiveDate,
    config: HygieneConfig,
}

impl EvaluationContext {
    /// Creates a context with default windows and thresholds.
    pub fn new(today: NaiveDate) -> Self {
        Self::from_config(&HygieneConfig::default(), today)
    }

    /// Creates a context from configuration. `today` is always explicit.
    pub fn from_config(config: &HygieneConfig, today: NaiveDate) -> Self {
        Self {
            today,
            config: config.clone(),
        }
    }

    pub fn with_excluded_partner(mut self, partner: impl Into<String>) -> Self {
        self.config = self.config.with_excluded_partner(partner);
        self
    }

    pub fn with_windows(mut self, windows: WindowConfig) -> Self {
        self.config = self.config.with_windows(windows);
        self
    }

    pub fn with_disabled_rule(mut self, rule: RuleId) -> Self {
        self.config = self.config.with_disabled_rule(rule);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config = self.config.with_parallel(parallel);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &HygieneConfig {
        &self.config
    }

    pub fn windows(&self) -> &WindowConfig {
        &self.config.windows
    }

    pub fn co_sell_min_amount(&self) -> Decimal {
        self.config.thresholds.co_sell_min_amount
    }

    pub fn parallel(&self) -> bool {
        self.config.parallel
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        self.config.is_rule_enabled(rule)
    }

    /// Case-insensitive match against the exclusion list.
    pub fn is_partner_excluded(&self, partner: &str) -> bool {
        self.config.is_partner_excluded(partner)
    }

    /// Global preconditions shared by every rule.
    ///
    /// Records whose AWS stage is Closed Lost, or whose partner is on the
    /// exclusion list, never produce violations.
    pub fn is_eligible(&self, record: &OpportunityRecord) -> bool {
        if record.aws_stage_is(Stage::ClosedLost) {
            return false;
        }
        !record
            .partner_name
            .as_deref()
            .is_some_and(|partner| self.is_partner_excluded(partner))
    }

    /// Signed day count from today to `date`; negative in the past.
    pub fn days_from_today(&self, date: NaiveDate) -> i64 {
        (date - self.today).num_days()
    }

    /// True when `today <= date <= today + days`. Any window size is accepted.
    pub fn within_next_days(&self, date: NaiveDate, days: i64) -> bool {
        (0..=days).contains(&self.days_from_today(date))
    }

    /// True when `date` lies more than `days` days before today.
    pub fn older_than_days(&self, date: NaiveDate, days: i64) -> bool {
        -self.days_from_today(date) > days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pipeline_hygiene_core::StageValue;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_from_config_copies_settings() {
        let config = HygieneConfig::new()
            .with_excluded_partner("Omie")
            .with_disabled_rule(RuleId::ZeroAmount)
            .with_parallel(true);
        let ctx = EvaluationContext::from_config(&config, today());
        assert!(ctx.is_partner_excluded("omie "));
        assert!(!ctx.is_enabled(RuleId::ZeroAmount));
        assert!(ctx.is_enabled(RuleId::CoSellMissing));
        assert!(ctx.parallel());
        assert_eq!(ctx.windows().stalled_days, 45);
    }

    #[test]
    fn test_eligibility() {
        let ctx = EvaluationContext::new(today()).with_excluded_partner("Omie");
        let mut record = OpportunityRecord::default();
        assert!(ctx.is_eligible(&record));

        record.aws_stage = Some(StageValue::Recognized(Stage::ClosedLost));
        assert!(!ctx.is_eligible(&record));

        record.aws_stage = Some(StageValue::Recognized(Stage::Launched));
        assert!(ctx.is_eligible(&record));

        record.partner_name = Some("OMIE".into());
        assert!(!ctx.is_eligible(&record));
    }

    #[test]
    fn test_window_arithmetic() {
        let ctx = EvaluationContext::new(today());
        let in_days = |d: i64| today() + Duration::days(d);
        assert_eq!(ctx.days_from_today(in_days(-4)), -4);
        assert!(ctx.within_next_days(in_days(0), 30));
        assert!(ctx.within_next_days(in_days(30), 30));
        assert!(!ctx.within_next_days(in_days(31), 30));
        assert!(!ctx.within_next_days(in_days(-1), 30));
    }

    #[test]
    fn test_huge_windows_do_not_overflow() {
        let ctx = EvaluationContext::new(today());
        let in_days = |d: i64| today() + Duration::days(d);
        assert!(ctx.within_next_days(in_days(400), i64::MAX));
        assert!(!ctx.within_next_days(in_days(-1), i64::MAX));
        assert!(!ctx.within_next_days(in_days(0), i64::MIN));
        assert!(!ctx.older_than_days(NaiveDate::MIN, i64::MAX));
        assert!(ctx.older_than_days(in_days(-46), 45));
        assert!(!ctx.older_than_days(in_days(-45), 45));
    }

    #[test]
    fn test_builders_update_the_wrapped_config() {
        let ctx = EvaluationContext::new(today())
            .with_excluded_partner(" Omie ")
            .with_disabled_rule(RuleId::StalledOpportunity);
        assert_eq!(
            ctx.is_partner_excluded("OMIE"),
            ctx.config().is_partner_excluded("OMIE")
        );
        assert!(ctx.is_partner_excluded("OMIE"));
        assert!(!ctx.is_enabled(RuleId::StalledOpportunity));
        assert!(!ctx.config().is_rule_enabled(RuleId::StalledOpportunity));
    }
}
