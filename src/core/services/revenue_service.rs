//! Business logic helpers for revenue entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::ledger::{Ledger, Removal, RevenueRecord};

/// Provides append/remove helpers for the ledger's revenue log.
pub struct RevenueService;

impl RevenueService {
    pub fn add(ledger: &mut Ledger, value: Decimal, description: &str, date: NaiveDate) {
        ledger.add_revenue(RevenueRecord::new(value, description.trim(), date));
    }

    /// Removes the entry at `index`, or reports [`Removal::NotFound`].
    pub fn remove(ledger: &mut Ledger, index: usize) -> Removal<RevenueRecord> {
        ledger.remove_revenue(index)
    }

    pub fn list(ledger: &Ledger) -> Vec<&RevenueRecord> {
        ledger.revenues().iter().collect()
    }

    pub fn total(ledger: &Ledger) -> Result<Decimal> {
        ledger.revenue_total()
    }
}
