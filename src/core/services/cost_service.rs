//! Business logic helpers for the categorized cost tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::input::optional_text;
use crate::errors::{LedgerError, Result};
use crate::ledger::{CostRecord, Ledger, Removal};

/// Provides validated insert/remove helpers and totals for cost categories.
pub struct CostService;

impl CostService {
    /// Files a cost under `category`, or under `category`/`subcategory` when a
    /// non-blank subcategory is given.
    pub fn add(
        ledger: &mut Ledger,
        category: &str,
        value: Decimal,
        description: &str,
        date: NaiveDate,
        subcategory: Option<&str>,
    ) -> Result<()> {
        let category = Self::validate_category(category)?;
        let record = CostRecord::new(value, description.trim(), date);
        ledger.add_cost(category, record, optional_text(subcategory));
        Ok(())
    }

    pub fn remove(
        ledger: &mut Ledger,
        category: &str,
        index: usize,
        subcategory: Option<&str>,
    ) -> Removal<CostRecord> {
        ledger.remove_cost(category.trim(), index, optional_text(subcategory))
    }

    pub fn category_total(ledger: &Ledger, category: &str) -> Result<Decimal> {
        ledger.category_total(category.trim())
    }

    pub fn grand_total(ledger: &Ledger) -> Result<Decimal> {
        ledger.cost_total()
    }

    pub(crate) fn validate_category(category: &str) -> Result<&str> {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            Err(LedgerError::InvalidInput(
                "category name must not be empty".into(),
            ))
        } else {
            Ok(trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[test]
    fn blank_subcategory_files_as_direct_cost() {
        let mut ledger = Ledger::new();
        CostService::add(&mut ledger, "Ops", dec!(50), "rent", date(), Some("  ")).unwrap();
        let ops = ledger.costs().category("Ops").unwrap();
        assert_eq!(ops.direct.len(), 1);
        assert!(ops.subcategories.is_empty());
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut ledger = Ledger::new();
        let err = CostService::add(&mut ledger, "  ", dec!(1), "x", date(), None)
            .expect_err("blank category must fail");
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert!(ledger.costs().is_empty());
    }

    #[test]
    fn totals_follow_adds_and_removals() {
        let mut ledger = Ledger::new();
        CostService::add(&mut ledger, "Marketing", dec!(200), "ads", date(), Some("Ads")).unwrap();
        CostService::add(&mut ledger, "Marketing", dec!(50), "print", date(), None).unwrap();
        CostService::add(&mut ledger, "Ops", dec!(75), "vm", date(), Some("Cloud")).unwrap();
        assert_eq!(CostService::category_total(&ledger, "Marketing").unwrap(), dec!(250));
        assert_eq!(CostService::grand_total(&ledger).unwrap(), dec!(325));

        let removed = CostService::remove(&mut ledger, "Marketing", 0, Some("Ads"));
        assert!(removed.is_removed());
        assert_eq!(CostService::grand_total(&ledger).unwrap(), dec!(125));
    }
}
