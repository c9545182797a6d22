//! Percentage-based redistribution of a category total into subcategories.
//!
//! The base amount is read once, before any allocation record is written, so
//! every share is computed against the pre-allocation total rather than a
//! compounding one. Allocation adds records; it does not move the originals,
//! which means the category total roughly doubles after a successful run.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::errors::{LedgerError, Result};
use crate::ledger::Ledger;

use super::cost_service::CostService;

/// One subcategory's slice of an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationShare {
    pub subcategory: String,
    pub percentage: Decimal,
    pub amount: Decimal,
}

impl AllocationShare {
    pub fn description(&self) -> String {
        format!(
            "Allocation of {}% to {}",
            self.percentage.normalize(),
            self.subcategory
        )
    }
}

/// Validated allocation, in the caller's weight order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan {
    pub category: String,
    pub base: Decimal,
    pub shares: Vec<AllocationShare>,
}

impl AllocationPlan {
    pub fn allocated_total(&self) -> Result<Decimal> {
        self.shares.iter().try_fold(Decimal::ZERO, |total, share| {
            total.checked_add(share.amount).ok_or_else(overflow)
        })
    }
}

pub struct AllocationService;

impl AllocationService {
    /// Maximum distance from 100 tolerated for the weight sum.
    pub fn tolerance() -> Decimal {
        Decimal::new(1, 2)
    }

    /// Checks that the weights sum to 100 (within [`Self::tolerance`]) and
    /// returns the sum. Subcategory names are compared after trimming and
    /// must be unique. Individual weights are not range-checked.
    pub fn validate_weights(weights: &[(String, Decimal)]) -> Result<Decimal> {
        let mut seen = HashSet::new();
        for (name, _) in weights {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(LedgerError::InvalidInput(format!(
                    "allocation subcategory `{name}` must not be blank"
                )));
            }
            if !seen.insert(trimmed) {
                return Err(LedgerError::InvalidInput(format!(
                    "allocation subcategory `{trimmed}` is listed more than once"
                )));
            }
        }
        let total = weights.iter().try_fold(Decimal::ZERO, |total, (_, pct)| {
            total.checked_add(*pct).ok_or_else(overflow)
        })?;
        let distance = total
            .checked_sub(Decimal::ONE_HUNDRED)
            .ok_or_else(overflow)?
            .abs();
        if distance > Self::tolerance() {
            return Err(LedgerError::InvalidDistribution { total });
        }
        Ok(total)
    }

    /// Computes the shares without touching the ledger.
    pub fn plan(
        ledger: &Ledger,
        category: &str,
        weights: &[(String, Decimal)],
    ) -> Result<AllocationPlan> {
        let category = CostService::validate_category(category)?;
        Self::validate_weights(weights)?;
        let base = ledger.category_total(category)?;
        let shares = weights
            .iter()
            .map(|(subcategory, percentage)| {
                let amount = base
                    .checked_mul(*percentage)
                    .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
                    .ok_or_else(overflow)?;
                Ok(AllocationShare {
                    subcategory: subcategory.trim().to_string(),
                    percentage: *percentage,
                    amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(AllocationPlan {
            category: category.to_string(),
            base,
            shares,
        })
    }
}

fn overflow() -> LedgerError {
    LedgerError::InvalidInput("allocation amount exceeds the supported range".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CostRecord;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn weights(pairs: &[(&str, Decimal)]) -> Vec<(String, Decimal)> {
        pairs
            .iter()
            .map(|(name, pct)| (name.to_string(), *pct))
            .collect()
    }

    fn ops_ledger() -> Ledger {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut ledger = Ledger::new();
        ledger.add_cost("Ops", CostRecord::new(dec!(300), "rent", date), None);
        ledger.add_cost("Ops", CostRecord::new(dec!(200), "power", date), None);
        ledger
    }

    #[test]
    fn plan_splits_current_total_in_caller_order() {
        let plan = AllocationService::plan(
            &ops_ledger(),
            "Ops",
            &weights(&[("Staff", dec!(40)), ("Cloud", dec!(60))]),
        )
        .unwrap();
        assert_eq!(plan.base, dec!(500));
        assert_eq!(plan.shares[0].subcategory, "Staff");
        assert_eq!(plan.shares[0].amount, dec!(200));
        assert_eq!(plan.shares[1].amount, dec!(300));
        assert_eq!(plan.allocated_total().unwrap(), dec!(500));
        assert_eq!(plan.shares[1].description(), "Allocation of 60% to Cloud");
    }

    #[test]
    fn sums_outside_tolerance_are_rejected() {
        for total in [dec!(95), dec!(105), dec!(99.98)] {
            let err = AllocationService::validate_weights(&weights(&[("A", total)]))
                .expect_err("sum must be rejected");
            assert!(matches!(err, LedgerError::InvalidDistribution { total: t } if t == total));
        }
        assert!(AllocationService::validate_weights(&weights(&[("A", dec!(99.995))])).is_ok());
        assert!(AllocationService::validate_weights(&[]).is_err());
    }

    #[test]
    fn individual_weights_are_not_range_checked() {
        let plan = AllocationService::plan(
            &ops_ledger(),
            "Ops",
            &weights(&[("Refund", dec!(-20)), ("Cloud", dec!(120))]),
        )
        .unwrap();
        assert_eq!(plan.shares[0].amount, dec!(-100));
        assert_eq!(plan.shares[1].amount, dec!(600));
    }

    #[test]
    fn repeated_subcategory_names_are_rejected() {
        for pairs in [
            [("Cloud", dec!(50)), ("Cloud", dec!(50))],
            [("Cloud", dec!(50)), (" Cloud ", dec!(50))],
        ] {
            let err = AllocationService::plan(&ops_ledger(), "Ops", &weights(&pairs))
                .expect_err("duplicate names must fail");
            assert!(matches!(err, LedgerError::InvalidInput(ref msg) if msg.contains("Cloud")));
        }
    }

    #[test]
    fn oversized_shares_are_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut ledger = Ledger::new();
        ledger.add_cost("Ops", CostRecord::new(Decimal::MAX, "huge", date), None);
        let err = AllocationService::plan(
            &ledger,
            "Ops",
            &weights(&[("Cloud", dec!(150)), ("Staff", dec!(-50))]),
        )
        .expect_err("share overflow must fail");
        assert!(err.is_validation());
    }

    #[test]
    fn blank_subcategory_names_are_rejected() {
        let err = AllocationService::validate_weights(&weights(&[(" ", dec!(100))]))
            .expect_err("blank name must fail");
        assert!(err.is_validation());
    }
}
