//! End-to-end tests for the hygiene pipeline.
//!
//! These run the full catalog through `run`, the way a report generator
//! would, and check what survives filtering and grouping.

use pipeline_hygiene::prelude::*;
use pipeline_hygiene::{
    closing_without_partner, AceOpportunityType, EvaluationContext, EvidenceValue,
    NoPartnerOpportunity, RawNoPartnerOpportunity, RejectionScenario, Urgency,
};
use pipeline_hygiene_test::{dataset, reference_date, OpportunityBuilder};

fn config() -> HygieneConfig {
    HygieneConfig::new().with_reference_date(reference_date())
}

fn evaluate(data: &OpportunityDataset) -> HygieneRun {
    pipeline_hygiene::run(data, &config()).unwrap()
}

/// Every rule that fired for `id`, before presentation filtering.
fn fired_for(run: &HygieneRun, id: &str) -> Vec<RuleId> {
    run.report
        .violations()
        .into_iter()
        .filter(|v| v.record_id.as_deref() == Some(id))
        .map(|v| v.rule)
        .collect()
}

fn shown_rules(run: &HygieneRun) -> Vec<RuleId> {
    run.violations.iter().map(|v| v.rule).collect()
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_visibility_only_zero_amount_skips_zero_amount_rule() {
    let data = dataset([OpportunityBuilder::new("OPP-A")
        .ace_type(AceOpportunityType::PartnerSourcedVisibilityOnly)
        .partner_stage(Stage::Qualified)
        .amount(0)]);

    let run = evaluate(&data);
    assert_eq!(
        fired_for(&run, "OPP-A"),
        vec![RuleId::VisibilityOnly, RuleId::VisibilityOnlyZeroAmount]
    );
}

#[test]
fn test_rejected_with_accepted_sibling_is_not_reshare_candidate() {
    let data = dataset([
        OpportunityBuilder::new("OPP1").rejected(),
        OpportunityBuilder::new("OPP1").status("Accepted").partner("Partner B"),
    ]);

    let run = evaluate(&data);
    assert_eq!(run.report.match_count(RuleId::RejectedReshare), 0);
}

#[test]
fn test_overdue_launch_reports_days_overdue() {
    let data = dataset([OpportunityBuilder::new("OPP-C")
        .partner_stage(Stage::Qualified)
        .launch_in(-5)]);

    let run = evaluate(&data);
    assert_eq!(run.report.match_count(RuleId::LaunchDateUpcoming), 0);

    let analysis = run.report.analysis(RuleId::LaunchDateOverdue).unwrap();
    assert_eq!(analysis.violations.len(), 1);
    assert_eq!(analysis.violations[0].evidence.days("days_overdue"), Some(5));
}

#[test]
fn test_partner_launched_before_aws_is_critical() {
    let data = dataset([OpportunityBuilder::new("OPP-D").stages(Stage::Committed, Stage::Launched)]);

    let run = evaluate(&data);
    assert_eq!(fired_for(&run, "OPP-D"), vec![RuleId::PartnerFinalized]);
    assert_eq!(run.report.match_count(RuleId::PartnerStageAhead), 0);
    assert_eq!(
        run.groups.get("owner@partner-a.com").unwrap().priority(),
        Priority::Critical
    );
}

// ============================================================================
// Global preconditions
// ============================================================================

fn noisy(id: &str) -> OpportunityBuilder {
    OpportunityBuilder::new(id)
        .amount(0)
        .launch_in(-5)
        .last_modified_days_ago(90)
        .close_in(3)
        .rejected()
}

#[test]
fn test_closed_lost_records_never_fire() {
    let data = dataset([
        noisy("LOST").aws_stage(Stage::ClosedLost),
        noisy("OPEN"),
    ]);

    let run = evaluate(&data);
    assert!(fired_for(&run, "LOST").is_empty());
    assert!(!fired_for(&run, "OPEN").is_empty());
}

#[test]
fn test_excluded_partner_is_silenced_case_insensitively() {
    let data = dataset([noisy("OMIE-1").partner("OMIE"), noisy("OTHER")]);
    let config = config().with_excluded_partner("Omie");

    let run = pipeline_hygiene::run(&data, &config).unwrap();
    assert!(fired_for(&run, "OMIE-1").is_empty());
    assert!(!fired_for(&run, "OTHER").is_empty());
}

#[test]
fn test_launch_windows_are_mutually_exclusive() {
    let data = dataset((-60..=60).map(|d| OpportunityBuilder::new(&format!("L{d}")).launch_in(d)));

    let run = evaluate(&data);
    for record in run.report.by_record().iter() {
        assert!(
            !(record.has(RuleId::LaunchDateOverdue) && record.has(RuleId::LaunchDateUpcoming)),
            "{:?} fired both launch rules",
            record.record_id
        );
    }
    assert_eq!(run.report.match_count(RuleId::LaunchDateOverdue), 60);
    assert_eq!(run.report.match_count(RuleId::LaunchDateUpcoming), 31);
}

// ============================================================================
// Launched presentation filter
// ============================================================================

fn launched_with_everything() -> OpportunityDataset {
    dataset([OpportunityBuilder::new("LAUNCHED")
        .stages(Stage::Launched, Stage::Qualified)
        .technology_partner()
        .co_sell(false)
        .amount(500)
        .close_in(10)
        .launch_in(-3)
        .rejected()])
}

#[test]
fn test_partner_facing_output_shows_only_stage_alignment_on_launched() {
    let data = launched_with_everything();
    let run = evaluate(&data);

    assert_eq!(
        fired_for(&run, "LAUNCHED"),
        vec![
            RuleId::LaunchDateOverdue,
            RuleId::PartnerStageBehind,
            RuleId::CoSellMissing,
            RuleId::CloseDateImminent,
            RuleId::RejectedReshare,
        ]
    );
    assert_eq!(shown_rules(&run), vec![RuleId::PartnerStageBehind]);
    assert_eq!(run.suppressed_count(), 4);
}

#[test]
fn test_account_manager_output_keeps_co_sell_on_launched() {
    let data = launched_with_everything();
    let run = Pipeline::new(config())
        .with_filter(LaunchedFilter::account_manager_facing())
        .run(&data)
        .unwrap();

    assert_eq!(
        shown_rules(&run),
        vec![RuleId::PartnerStageBehind, RuleId::CoSellMissing]
    );
}

#[test]
fn test_disabled_filter_shows_everything() {
    let data = launched_with_everything();
    let run = Pipeline::new(config())
        .with_filter(LaunchedFilter::disabled())
        .run(&data)
        .unwrap();

    assert_eq!(run.violations.len(), run.report.total_match_count());
    assert_eq!(run.suppressed_count(), 0);
}

// ============================================================================
// Sibling rules
// ============================================================================

#[test]
fn test_eligible_to_share_checks_every_row_with_the_id() {
    let data = dataset([
        OpportunityBuilder::new("SHARED").ace_type(AceOpportunityType::EligibleToShare),
        OpportunityBuilder::new("SHARED")
            .ace_type(AceOpportunityType::AwsSharedWithPartner)
            .partner("Partner B"),
        OpportunityBuilder::new("LONELY").ace_type(AceOpportunityType::EligibleToShare),
        // A Closed Lost sibling still counts as shared
        OpportunityBuilder::new("LOST-SHARE").ace_type(AceOpportunityType::EligibleToShare),
        OpportunityBuilder::new("LOST-SHARE")
            .ace_type(AceOpportunityType::AwsSharedWithPartner)
            .aws_stage(Stage::ClosedLost),
    ]);

    let run = evaluate(&data);
    let ids: Vec<_> = run
        .report
        .analysis(RuleId::EligibleNotShared)
        .unwrap()
        .violations
        .iter()
        .map(|v| v.record_id.clone())
        .collect();
    assert_eq!(ids, vec![Some("LONELY".to_string())]);
}

#[test]
fn test_reshare_scenarios() {
    let data = dataset([
        OpportunityBuilder::new("BOTH").rejected(),
        OpportunityBuilder::new("BOTH").rejected().partner("Partner B"),
        OpportunityBuilder::new("SOLO").rejected(),
    ]);

    let run = evaluate(&data);
    let analysis = run.report.analysis(RuleId::RejectedReshare).unwrap();
    assert_eq!(analysis.violations.len(), 3);

    for violation in &analysis.violations {
        let (scenario, siblings) = match violation.record_id.as_deref() {
            Some("BOTH") => (RejectionScenario::AllRejected, 1),
            Some("SOLO") => (RejectionScenario::Unique, 0),
            other => panic!("unexpected record {other:?}"),
        };
        assert_eq!(
            violation.evidence.get("scenario"),
            Some(&EvidenceValue::Scenario(scenario))
        );
        assert_eq!(violation.evidence.count("sibling_count"), Some(siblings));
    }
}

// ============================================================================
// Determinism and configuration
// ============================================================================

fn mixed() -> OpportunityDataset {
    dataset([
        OpportunityBuilder::new("M3").amount(0).close_in(5),
        OpportunityBuilder::new("M1").stages(Stage::Committed, Stage::Launched),
        OpportunityBuilder::new("M2")
            .stages(Stage::Prospect, Stage::Committed)
            .last_modified_days_ago(60),
        OpportunityBuilder::new("M1").rejected().partner("Partner B"),
        OpportunityBuilder::new("M4")
            .stages(Stage::Launched, Stage::Prospect)
            .owner("zoe@other.io", "Zoe"),
    ])
}

#[test]
fn test_runs_are_idempotent() {
    let data = mixed();
    let first = evaluate(&data);
    let second = evaluate(&data);

    assert_eq!(first.violations, second.violations);
    assert_eq!(first.report.violations(), second.report.violations());
}

#[test]
fn test_parallel_evaluation_matches_sequential() {
    let data = mixed();
    let sequential = evaluate(&data);
    let parallel = pipeline_hygiene::run(&data, &config().with_parallel(true)).unwrap();

    assert_eq!(sequential.report.violations(), parallel.report.violations());
    assert_eq!(sequential.violations, parallel.violations);
}

#[test]
fn test_output_is_in_catalog_order() {
    let run = evaluate(&mixed());
    let keys: Vec<_> = run.violations.iter().map(|v| v.sort_key()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_disabled_rule_is_not_evaluated() {
    let data = dataset([OpportunityBuilder::new("ZERO").amount(0)]);
    let config = config().with_disabled_rule(RuleId::ZeroAmount);

    let run = pipeline_hygiene::run(&data, &config).unwrap();
    assert!(run.report.analysis(RuleId::ZeroAmount).is_none());
    assert!(run.violations.is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = HygieneConfig::from_toml_str("[windows]\nstalled_days = -1").unwrap();
    let result = pipeline_hygiene::run(&mixed(), &config);
    assert!(matches!(result, Err(HygieneError::Config(_))));
}

#[test]
fn test_oversized_window_is_rejected() {
    let config =
        HygieneConfig::from_toml_str("[windows]\nclose_date_days = 99999999999").unwrap();
    let result = pipeline_hygiene::run(&mixed(), &config);
    assert!(matches!(result, Err(HygieneError::Config(_))));
}

#[test]
fn test_empty_dataset_is_a_normal_run() {
    let run = evaluate(&OpportunityDataset::new(vec![]));
    assert_eq!(run.report.total_match_count(), 0);
    assert!(run.groups.is_empty());
    assert!(run.follow_ups.is_empty());
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_groups_by_owner_with_priorities() {
    let mut builders = vec![
        OpportunityBuilder::new("CRIT")
            .stages(Stage::Committed, Stage::Launched)
            .owner("ana@x.com", "Ana"),
        OpportunityBuilder::new("LOW").amount(0).owner("bob@y.com", "Bob"),
        OpportunityBuilder::new("ORPHAN").amount(0).no_owner_email(),
    ];
    builders.extend((0..6).map(|i| {
        OpportunityBuilder::new(&format!("MED{i}"))
            .amount(0)
            .owner("cai@z.com", "Cai")
    }));
    let run = evaluate(&dataset(builders));

    assert_eq!(run.groups.get("ana@x.com").unwrap().priority(), Priority::Critical);
    assert_eq!(run.groups.get("cai@z.com").unwrap().priority(), Priority::Medium);
    assert_eq!(run.groups.get("bob@y.com").unwrap().priority(), Priority::Low);
    assert_eq!(run.groups.ungrouped.len(), 1);

    let order: Vec<_> = run.groups.by_priority().iter().map(|g| g.key.as_str()).collect();
    assert_eq!(order, vec!["ana@x.com", "cai@z.com", "bob@y.com"]);
}

#[test]
fn test_company_grouping_uses_email_domain() {
    let data = dataset([
        OpportunityBuilder::new("A1").amount(0).owner("ana@partner-a.com", "Ana"),
        OpportunityBuilder::new("A2").amount(0).owner("rui@partner-a.com", "Rui"),
    ]);
    let run = Pipeline::new(config())
        .with_group_by(GroupBy::Company)
        .run(&data)
        .unwrap();

    assert_eq!(run.groups.len(), 1);
    assert_eq!(run.groups.get("Partner A").unwrap().violations.len(), 2);
}

// ============================================================================
// Companion output
// ============================================================================

#[test]
fn test_follow_up_plan_orders_by_close_date() {
    let data = dataset([
        OpportunityBuilder::new("LATER").close_in(40),
        OpportunityBuilder::new("SOON").close_in(3),
        OpportunityBuilder::new("DONE").stages(Stage::Launched, Stage::Launched),
    ]);
    let run = evaluate(&data);

    assert_eq!(run.follow_ups.item_count(), 2);
    let items = &run.follow_ups.partners[0].owners[0].items;
    assert_eq!(items[0].record_id.as_deref(), Some("SOON"));
    assert_eq!(items[0].urgency, Urgency::Urgent);
    assert_eq!(items[1].urgency, Urgency::Normal);
}

#[test]
fn test_no_partner_alerts_use_configured_window() {
    let raw = |id: &str, close: &str| {
        NoPartnerOpportunity::from(RawNoPartnerOpportunity {
            id: Some(id.to_string()),
            close_date: Some(close.to_string()),
            ..RawNoPartnerOpportunity::default()
        })
    };
    let opportunities = vec![
        raw("FAR", "2025-07-01"),
        raw("NEAR", "2025-04-01"),
        raw("PAST", "2025-03-10"),
    ];
    let ctx = EvaluationContext::from_config(&config(), reference_date());

    let alerts = closing_without_partner(&opportunities, &ctx);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].opportunity.id.as_deref(), Some("NEAR"));
    assert_eq!(alerts[0].days_until_close, 17);
}

#[test]
fn test_period_label_follows_locale() {
    let english = Pipeline::new(config().with_locale(Locale::English))
        .run(&OpportunityDataset::new(vec![]))
        .unwrap();
    assert_eq!(english.period_label(), "March 2025");

    let portuguese = evaluate(&OpportunityDataset::new(vec![]));
    assert_eq!(portuguese.period_label(), "Março de 2025");
}

// ============================================================================
// Ingestion
// ============================================================================

#[test]
fn test_crm_export_rows_flow_through() {
    let json = r#"[
        {
            "Opportunity: 18 Character Oppty ID": "006A",
            "Opportunity: Stage": "Committed",
            "APN Partner Reported Stage": "Launched",
            "Total Opportunity Amount": "$1,200.00",
            "APN Opportunity Owner Email": "ana@partner-a.com"
        },
        {
            "Opportunity: 18 Character Oppty ID": "006B",
            "Opportunity: Stage": "Closed Lost",
            "Total Opportunity Amount": 0
        },
        {
            "Opportunity: 18 Character Oppty ID": "006C",
            "Opportunity: Stage": "Negotiating",
            "APN Partner Reported Stage": "Qualified",
            "Total Opportunity Amount": 500
        }
    ]"#;
    let rows: Vec<RawOpportunity> = serde_json::from_str(json).unwrap();
    let data = OpportunityDataset::from_raw(rows);

    let run = evaluate(&data);
    assert_eq!(fired_for(&run, "006A"), vec![RuleId::PartnerFinalized]);
    assert!(fired_for(&run, "006B").is_empty());
    assert!(fired_for(&run, "006C").is_empty());
    assert_eq!(data.unrecognized_stages().get("Negotiating"), Some(&1));
}
