//! Tests for the rule catalog

use super::locale::Locale;
use super::rule::*;

#[test]
fn test_catalog_numbers_follow_declaration_order() {
    for (idx, rule) in RuleId::ALL.iter().enumerate() {
        assert_eq!(rule.number() as usize, idx + 1);
        assert_eq!(RuleId::from_number(rule.number()), Some(*rule));
    }
    assert_eq!(RuleId::from_number(0), None);
    assert_eq!(RuleId::from_number(15), None);
}

#[test]
fn test_ordering_is_catalog_order() {
    let mut shuffled = vec![
        RuleId::RejectedReshare,
        RuleId::DeliveryModelMismatch,
        RuleId::CoSellMissing,
        RuleId::PartnerStageBehind,
    ];
    shuffled.sort();
    assert_eq!(
        shuffled,
        vec![
            RuleId::DeliveryModelMismatch,
            RuleId::PartnerStageBehind,
            RuleId::CoSellMissing,
            RuleId::RejectedReshare,
        ]
    );
}

#[test]
fn test_parse_codes_round_trip() {
    for rule in RuleId::ALL {
        assert_eq!(rule.code().parse::<RuleId>().unwrap(), rule);
        assert_eq!(rule.to_string(), rule.code());
    }
    assert_eq!("  ZERO_AMOUNT ".parse::<RuleId>().unwrap(), RuleId::ZeroAmount);
}

#[test]
fn test_parse_unknown_rule() {
    assert!("not_a_rule".parse::<RuleId>().is_err());
    assert!("99".parse::<RuleId>().is_err());
}

#[test]
fn test_titles_are_localized() {
    for rule in RuleId::ALL {
        assert!(!rule.title(Locale::Portuguese).is_empty());
        assert!(!rule.title(Locale::English).is_empty());
    }
    assert_ne!(
        RuleId::StalledOpportunity.title(Locale::Portuguese),
        RuleId::StalledOpportunity.title(Locale::English)
    );
}
