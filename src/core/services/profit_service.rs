use chrono::NaiveDate;

use crate::errors::Result;
use crate::ledger::{Ledger, ProfitSnapshot};

/// Derives profit snapshots from the current ledger totals.
pub struct ProfitService;

impl ProfitService {
    /// Appends a snapshot of the current totals dated `today`. Always appends,
    /// even when a snapshot for the same date already exists. Totals that
    /// overflow fail before anything is appended.
    pub fn recompute_and_append(ledger: &mut Ledger, today: NaiveDate) -> Result<ProfitSnapshot> {
        let snapshot = ProfitSnapshot::new(today, ledger.revenue_total()?, ledger.cost_total()?)?;
        ledger.append_snapshot(snapshot.clone());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CostRecord, RevenueRecord};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn historical_snapshots_survive_later_removals() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut ledger = Ledger::new();
        ledger.add_revenue(RevenueRecord::new(dec!(500), "sale", today));
        ledger.add_cost("Ops", CostRecord::new(dec!(120), "rent", today), None);
        let first = ProfitService::recompute_and_append(&mut ledger, today).unwrap();
        assert_eq!(first.profit(), dec!(380));

        let _ = ledger.remove_revenue(0);
        let second = ProfitService::recompute_and_append(&mut ledger, today).unwrap();
        assert_eq!(second.profit(), dec!(-120));

        let history: Vec<_> = ledger.profit_history().iter().collect();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].profit(), dec!(380));
        assert_eq!(history[0].date(), history[1].date());
    }

    #[test]
    fn overflowing_totals_append_nothing() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut ledger = Ledger::new();
        ledger.add_cost("Ops", CostRecord::new(Decimal::MAX, "a", today), None);
        ledger.add_cost("Ops", CostRecord::new(Decimal::MAX, "b", today), None);
        assert!(ProfitService::recompute_and_append(&mut ledger, today).is_err());
        assert!(ledger.profit_history().is_empty());
    }
}
