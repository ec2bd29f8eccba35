use pipeline_hygiene_config::WindowConfig;
use pipeline_hygiene_core::Stage;
use pipeline_hygiene_test::{dataset, days_from_reference, reference_date, OpportunityBuilder};

use super::check;
use crate::api::{EvidenceValue, HygieneRule};
use crate::context::EvaluationContext;
use crate::rules::*;

fn opp() -> OpportunityBuilder {
    OpportunityBuilder::new("OPP1")
}

#[test]
fn test_launch_overdue_reports_days() {
    let evidence = check(LaunchDateOverdue, opp().launch_in(-5)).expect("should fire");
    assert_eq!(evidence.days("days_overdue"), Some(5));
    assert_eq!(
        evidence.get("target_launch_date"),
        Some(&EvidenceValue::Date(days_from_reference(-5)))
    );
    assert!(check(LaunchDateUpcoming, opp().launch_in(-5)).is_none());
}

#[test]
fn test_launch_today_is_upcoming_not_overdue() {
    assert!(check(LaunchDateOverdue, opp().launch_in(0)).is_none());
    let evidence = check(LaunchDateUpcoming, opp().launch_in(0)).expect("should fire");
    assert_eq!(evidence.days("days_remaining"), Some(0));
}

#[test]
fn test_launch_upcoming_window_bounds() {
    assert!(check(LaunchDateUpcoming, opp().launch_in(30)).is_some());
    assert!(check(LaunchDateUpcoming, opp().launch_in(31)).is_none());
}

#[test]
fn test_launch_rules_are_mutually_exclusive() {
    for offset in -60..=60 {
        let overdue = check(LaunchDateOverdue, opp().launch_in(offset)).is_some();
        let upcoming = check(LaunchDateUpcoming, opp().launch_in(offset)).is_some();
        assert!(!(overdue && upcoming), "both fired at offset {offset}");
    }
}

#[test]
fn test_launch_rules_skip_finalized_partner() {
    for stage in [Stage::Launched, Stage::ClosedLost] {
        assert!(check(LaunchDateOverdue, opp().launch_in(-5).partner_stage(stage)).is_none());
        assert!(check(LaunchDateUpcoming, opp().launch_in(5).partner_stage(stage)).is_none());
    }
}

#[test]
fn test_launch_upcoming_uses_configured_window() {
    let ctx = EvaluationContext::new(reference_date()).with_windows(WindowConfig {
        launch_upcoming_days: 10,
        ..WindowConfig::default()
    });
    let data = dataset([opp().launch_in(20)]);
    assert!(LaunchDateUpcoming.evaluate(&data, &ctx).is_empty());
}

#[test]
fn test_stalled_opportunity() {
    let evidence = check(StalledOpportunity, opp().last_modified_days_ago(46)).expect("should fire");
    assert_eq!(evidence.days("days_stalled"), Some(46));
    assert!(check(StalledOpportunity, opp().last_modified_days_ago(45)).is_none());
    assert!(check(StalledOpportunity, opp().last_modified_days_ago(10)).is_none());
}

#[test]
fn test_stalled_ignores_launched_partner_only() {
    let stalled = || opp().last_modified_days_ago(90);
    assert!(check(StalledOpportunity, stalled().partner_stage(Stage::Launched)).is_none());
    assert!(check(StalledOpportunity, stalled().partner_stage(Stage::ClosedLost)).is_some());
}

#[test]
fn test_oversized_windows_evaluate_without_overflow() {
    let ctx = EvaluationContext::new(reference_date()).with_windows(WindowConfig {
        launch_upcoming_days: i64::MAX,
        stalled_days: i64::MAX,
        close_date_days: 99_999_999_999,
        no_partner_close_days: i64::MAX,
    });
    let data = dataset([opp()
        .launch_in(5)
        .close_in(400)
        .last_modified_days_ago(3_000)]);
    assert_eq!(LaunchDateUpcoming.evaluate(&data, &ctx).len(), 1);
    assert_eq!(CloseDateImminent.evaluate(&data, &ctx).len(), 1);
    assert!(StalledOpportunity.evaluate(&data, &ctx).is_empty());
}

#[test]
fn test_close_date_imminent() {
    let evidence = check(CloseDateImminent, opp().close_in(12)).expect("should fire");
    assert_eq!(evidence.days("days_until_close"), Some(12));
    assert!(check(CloseDateImminent, opp().close_in(0)).is_some());
    assert!(check(CloseDateImminent, opp().close_in(30)).is_some());
    assert!(check(CloseDateImminent, opp().close_in(31)).is_none());
    assert!(check(CloseDateImminent, opp().close_in(-1)).is_none());
}

#[test]
fn test_boxed_rules_ignore_neutral_record() {
    for rule in boxed_standard_rules() {
        let data = dataset([opp()]);
        let ctx = EvaluationContext::new(reference_date());
        assert!(rule.evaluate(&data, &ctx).is_empty(), "{}", rule.rule_id());
    }
}
