use pipeline_hygiene_core::{Locale, NoPartnerOpportunity, Stage};
use pipeline_hygiene_test::{dataset, days_from_reference, reference_date, OpportunityBuilder};

use super::*;
use crate::context::EvaluationContext;

fn ctx() -> EvaluationContext {
    EvaluationContext::new(reference_date())
}

#[test]
fn test_urgency_buckets() {
    assert_eq!(Urgency::from_days(None), Urgency::NoDate);
    assert_eq!(Urgency::from_days(Some(-1)), Urgency::Overdue);
    assert_eq!(Urgency::from_days(Some(0)), Urgency::Urgent);
    assert_eq!(Urgency::from_days(Some(7)), Urgency::Urgent);
    assert_eq!(Urgency::from_days(Some(8)), Urgency::Soon);
    assert_eq!(Urgency::from_days(Some(30)), Urgency::Soon);
    assert_eq!(Urgency::from_days(Some(90)), Urgency::Normal);
    assert_eq!(Urgency::from_days(Some(91)), Urgency::Future);
    assert_eq!(Urgency::Overdue.label(Locale::Portuguese), "VENCIDO");
}

#[test]
fn test_followup_keeps_only_active_records_with_owner() {
    let data = dataset([
        OpportunityBuilder::new("OPP1"),
        OpportunityBuilder::new("OPP2").aws_stage(Stage::Launched),
        OpportunityBuilder::new("OPP3").partner_stage(Stage::ClosedLost),
        OpportunityBuilder::new("OPP4").no_owner_email(),
        OpportunityBuilder::new("OPP5").owner("  ", "Blank"),
    ]);
    let plan = FollowUpPlan::build(&data, &ctx());
    assert_eq!(plan.item_count(), 1);
    assert_eq!(plan.partners[0].owners[0].items[0].record_id.as_deref(), Some("OPP1"));
}

#[test]
fn test_followup_groups_by_partner_then_owner() {
    let data = dataset([
        OpportunityBuilder::new("OPP1").partner("Beta").owner("z@beta.com", "Zed"),
        OpportunityBuilder::new("OPP2").partner("Alpha").owner("b@alpha.com", "Bea"),
        OpportunityBuilder::new("OPP3").partner("Alpha").owner("a@alpha.com", "Abe"),
        OpportunityBuilder::new("OPP4").partner("Alpha").owner("a2@alpha.com", "Abe"),
    ]);
    let plan = FollowUpPlan::build(&data, &ctx());

    let partners: Vec<&str> = plan
        .partners
        .iter()
        .map(|p| p.display_name(Locale::English))
        .collect();
    assert_eq!(partners, vec!["Alpha", "Beta"]);

    let alpha = &plan.partners[0];
    let owners: Vec<&str> = alpha.owners.iter().map(|o| o.owner_name.as_str()).collect();
    assert_eq!(owners, vec!["Abe", "Bea"]);
    assert_eq!(alpha.owners[0].items.len(), 2);
    assert_eq!(alpha.emails.len(), 3);
}

#[test]
fn test_followup_item_order() {
    let data = dataset([
        OpportunityBuilder::new("NODATE").amount(99_999),
        OpportunityBuilder::new("LATE").close_in(40),
        OpportunityBuilder::new("SMALL").close_in(5).amount(100),
        OpportunityBuilder::new("BIG").close_in(5).amount(50_000),
        OpportunityBuilder::new("PAST").close_in(-3),
    ]);
    let plan = FollowUpPlan::build(&data, &ctx());
    let owner = &plan.partners[0].owners[0];
    let ids: Vec<&str> = owner
        .items
        .iter()
        .filter_map(|item| item.record_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["PAST", "BIG", "SMALL", "LATE", "NODATE"]);
    assert_eq!(owner.urgent_count(), 3);
    assert_eq!(owner.next_30_days_count(), 0);
    assert_eq!(owner.items[0].urgency, Urgency::Overdue);
    assert_eq!(owner.items[4].urgency, Urgency::NoDate);
}

#[test]
fn test_followup_unnamed_partner() {
    let data = dataset([OpportunityBuilder::new("OPP1").no_partner()]);
    let plan = FollowUpPlan::build(&data, &ctx());
    assert_eq!(plan.partners[0].display_name(Locale::Portuguese), "Parceiro");
}

#[test]
fn test_no_partner_window() {
    let opportunities: Vec<NoPartnerOpportunity> = [(Some(70), "FAR"), (Some(60), "EDGE"), (Some(0), "TODAY"), (Some(-1), "PAST"), (None, "NONE")]
        .into_iter()
        .map(|(offset, id)| NoPartnerOpportunity {
            id: Some(id.to_string()),
            close_date: offset.map(days_from_reference),
            ..NoPartnerOpportunity::default()
        })
        .collect();

    let alerts = closing_without_partner(&opportunities, &ctx());
    let ids: Vec<(&str, i64)> = alerts
        .iter()
        .map(|a| (a.opportunity.id.as_deref().unwrap_or(""), a.days_until_close))
        .collect();
    assert_eq!(ids, vec![("TODAY", 0), ("EDGE", 60)]);
}
