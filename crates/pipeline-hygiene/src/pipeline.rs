//! One-call pipeline: config → context → evaluate → filter → group.

use chrono::NaiveDate;
use pipeline_hygiene_config::HygieneConfig;
use pipeline_hygiene_core::{HygieneError, Locale, OpportunityDataset};
use pipeline_hygiene_rules::companion::FollowUpPlan;
use pipeline_hygiene_rules::{
    boxed_standard_rules, Aggregator, EvaluationContext, EvaluationReport, GroupBy,
    GroupedViolations, LaunchedFilter, RuleEvaluator, Violation,
};
use tracing::info;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct HygieneRun {
    /// The "today" the run was evaluated against.
    pub reference_date: NaiveDate,
    pub locale: Locale,
    /// Unfiltered per-rule results.
    pub report: EvaluationReport,
    /// Violations that survive the Launched filter, in catalog order.
    pub violations: Vec<Violation>,
    pub groups: GroupedViolations,
    pub follow_ups: FollowUpPlan,
}

impl HygieneRun {
    /// Number of violations hidden by the Launched filter.
    pub fn suppressed_count(&self) -> usize {
        self.report.total_match_count() - self.violations.len()
    }

    /// Localized period heading, e.g. "Março de 2025".
    pub fn period_label(&self) -> String {
        self.locale.format_month_year(self.reference_date)
    }
}

/// Configurable pipeline.
///
/// # Example
///
/// ```
/// use pipeline_hygiene::prelude::*;
/// use chrono::NaiveDate;
///
/// let config = HygieneConfig::new()
///     .with_reference_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
/// let dataset = OpportunityDataset::new(vec![]);
///
/// let run = Pipeline::new(config)
///     .with_group_by(GroupBy::Company)
///     .run(&dataset)
///     .unwrap();
/// assert!(run.violations.is_empty());
/// assert!(run.groups.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: HygieneConfig,
    group_by: GroupBy,
    filter: LaunchedFilter,
}

impl Pipeline {
    pub fn new(config: HygieneConfig) -> Self {
        Self {
            config,
            group_by: GroupBy::default(),
            filter: LaunchedFilter::default(),
        }
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_filter(mut self, filter: LaunchedFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn config(&self) -> &HygieneConfig {
        &self.config
    }

    /// Runs the full pipeline over `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`HygieneError::Config`] when the configuration is invalid.
    /// Evaluation itself never fails.
    pub fn run(&self, dataset: &OpportunityDataset) -> Result<HygieneRun, HygieneError> {
        self.config.validate()?;

        #[cfg(feature = "console")]
        pipeline_hygiene_console::init();

        // The clock is read here and nowhere else.
        let today = self
            .config
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let ctx = EvaluationContext::from_config(&self.config, today);

        let report = RuleEvaluator::new(boxed_standard_rules()).evaluate(dataset, &ctx);
        let violations = self.filter.apply(report.violations(), dataset);
        let groups = Aggregator::from_config(self.group_by, &self.config).group(&violations, dataset);
        let follow_ups = FollowUpPlan::build(dataset, &ctx);

        info!(
            event = "run_end",
            shown = violations.len(),
            suppressed = report.total_match_count() - violations.len(),
            follow_up_items = follow_ups.item_count(),
        );

        Ok(HygieneRun {
            reference_date: today,
            locale: self.config.locale,
            report,
            violations,
            groups,
            follow_ups,
        })
    }
}

/// Runs the default pipeline (owner-email groups, partner-facing filter).
pub fn run(dataset: &OpportunityDataset, config: &HygieneConfig) -> Result<HygieneRun, HygieneError> {
    Pipeline::new(config.clone()).run(dataset)
}

/// Runs with `hygiene.toml` from the working directory, or defaults if it
/// is missing or unreadable.
pub fn run_default(dataset: &OpportunityDataset) -> Result<HygieneRun, HygieneError> {
    let config = HygieneConfig::load("hygiene.toml").unwrap_or_default();
    run(dataset, &config)
}
