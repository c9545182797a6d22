mod common;

use common::{json_manager, weights};
use rust_decimal_macros::dec;

#[test]
fn ledger_smoke() {
    profit_core::init();

    let (mut manager, _guard) = json_manager("smoke@example.com", "2025-01-01");
    manager.add_revenue(dec!(42), "smoke", None).unwrap();
    manager.add_cost("Ops", dec!(10), "fuel", None, None).unwrap();
    manager
        .allocate("Ops", &weights(&[("Road", dec!(100))]))
        .unwrap();

    let dashboard = manager.dashboard(5);
    assert_eq!(dashboard.latest.unwrap().profit(), dec!(22));
    assert_eq!(dashboard.recent_costs.len(), 2);
}
