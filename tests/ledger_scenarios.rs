mod common;

use common::{date, json_manager, weights};
use profit_core::LedgerError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn revenue_then_subcategorized_cost_yields_profit() {
    let (mut manager, _guard) = json_manager("ana@example.com", "2024-01-02");
    manager
        .add_revenue(dec!(1000), "Consulting", Some(date("2024-01-01")))
        .unwrap();
    manager
        .add_cost("Marketing", dec!(200), "Campaign", Some(date("2024-01-02")), Some("Ads"))
        .unwrap();

    let ledger = manager.ledger();
    assert_eq!(ledger.category_total("Marketing").unwrap(), dec!(200));
    let latest = ledger.profit_history().latest().unwrap();
    assert_eq!(latest.revenue_total(), dec!(1000));
    assert_eq!(latest.cost_total(), dec!(200));
    assert_eq!(latest.profit(), dec!(800));
    assert_eq!(latest.date(), date("2024-01-02"));
}

#[test]
fn allocation_adds_shares_of_the_starting_total() {
    let (mut manager, _guard) = json_manager("ana@example.com", "2024-02-01");
    manager.add_cost("Ops", dec!(300), "Rent", None, None).unwrap();
    manager.add_cost("Ops", dec!(200), "Power", None, None).unwrap();

    let plan = manager
        .allocate("Ops", &weights(&[("Cloud", dec!(60)), ("Staff", dec!(40))]))
        .unwrap();
    assert_eq!(plan.base, dec!(500));

    let ops = manager.ledger().costs().category("Ops").unwrap();
    assert_eq!(ops.subcategory_total("Cloud").unwrap(), dec!(300));
    assert_eq!(ops.subcategory_total("Staff").unwrap(), dec!(200));
    assert_eq!(ops.subcategories["Cloud"][0].description, "Allocation of 60% to Cloud");
    assert_eq!(manager.ledger().category_total("Ops").unwrap(), dec!(1000));
}

#[test]
fn allocation_outside_tolerance_changes_nothing() {
    let (mut manager, _guard) = json_manager("ana@example.com", "2024-02-01");
    manager.add_cost("Ops", dec!(500), "Rent", None, None).unwrap();
    let before = manager.ledger().clone();

    for total in [dec!(95), dec!(105)] {
        let err = manager
            .allocate("Ops", &weights(&[("Cloud", total)]))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDistribution { .. }));
    }
    assert_eq!(manager.ledger(), &before);
}

#[test]
fn every_mutation_appends_a_matching_snapshot() {
    let (mut manager, _guard) = json_manager("ana@example.com", "2024-03-10");
    manager.add_revenue(dec!(120), "a", None).unwrap();
    manager.add_cost("Ops", dec!(20), "b", None, None).unwrap();
    manager.add_cost("Ops", dec!(5), "c", None, Some("Cloud")).unwrap();
    manager.remove_cost("Ops", 0, Some("Cloud")).unwrap();
    manager.remove_revenue(0).unwrap();

    let history: Vec<_> = manager.ledger().profit_history().iter().collect();
    let profits: Vec<Decimal> = history.iter().map(|s| s.profit()).collect();
    assert_eq!(profits, vec![dec!(120), dec!(100), dec!(95), dec!(100), dec!(-20)]);
    for snapshot in history {
        assert_eq!(
            snapshot.profit(),
            snapshot.revenue_total() - snapshot.cost_total()
        );
    }
}

#[test]
fn grand_total_tracks_adds_minus_removals() {
    let (mut manager, _guard) = json_manager("ana@example.com", "2024-03-10");
    let entries = [
        ("Ops", None, dec!(10.10)),
        ("Ops", Some("Cloud"), dec!(4.90)),
        ("Ads", Some("Social"), dec!(7)),
        ("Ads", None, dec!(3.25)),
    ];
    for (category, sub, value) in entries {
        manager.add_cost(category, value, "x", None, sub).unwrap();
    }
    let removed = manager.remove_cost("Ads", 0, Some("Social")).unwrap();
    let removed_value = removed.removed().unwrap().value;

    let added: Decimal = entries.iter().map(|(_, _, value)| *value).sum();
    assert_eq!(manager.ledger().cost_total().unwrap(), added - removed_value);
    assert_eq!(manager.ledger().cost_total().unwrap(), dec!(18.25));
}

#[test]
fn out_of_range_removal_reports_not_found() {
    let (mut manager, _guard) = json_manager("ana@example.com", "2024-03-10");
    for value in [dec!(1), dec!(2), dec!(3)] {
        manager.add_revenue(value, "r", None).unwrap();
    }
    let snapshots = manager.ledger().profit_history().len();

    assert!(!manager.remove_revenue(5).unwrap().is_removed());
    assert!(!manager.remove_cost("Nope", 0, None).unwrap().is_removed());
    assert_eq!(manager.ledger().revenues().len(), 3);
    assert_eq!(manager.ledger().profit_history().len(), snapshots);
}

#[test]
fn blank_category_is_rejected_without_side_effects() {
    let (mut manager, _guard) = json_manager("ana@example.com", "2024-03-10");
    let err = manager.add_cost("   ", dec!(1), "x", None, None).unwrap_err();
    assert!(err.is_validation());
    assert!(manager.ledger().profit_history().is_empty());
}
