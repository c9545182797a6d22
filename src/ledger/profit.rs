use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::out_of_range;
use crate::errors::Result;

/// Totals captured right after one ledger mutation.
///
/// Snapshots are never revised: removing a record later does not touch the
/// snapshots recorded before the removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitSnapshot {
    #[serde(rename = "data")]
    date: NaiveDate,
    #[serde(rename = "lucro", with = "rust_decimal::serde::arbitrary_precision")]
    profit: Decimal,
    #[serde(rename = "faturamento_total", with = "rust_decimal::serde::arbitrary_precision")]
    revenue_total: Decimal,
    #[serde(rename = "custos_total", with = "rust_decimal::serde::arbitrary_precision")]
    cost_total: Decimal,
}

impl ProfitSnapshot {
    /// Fails when the profit itself is not representable.
    pub fn new(date: NaiveDate, revenue_total: Decimal, cost_total: Decimal) -> Result<Self> {
        let profit = revenue_total
            .checked_sub(cost_total)
            .ok_or_else(out_of_range)?;
        Ok(Self {
            date,
            profit,
            revenue_total,
            cost_total,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn profit(&self) -> Decimal {
        self.profit
    }

    pub fn revenue_total(&self) -> Decimal {
        self.revenue_total
    }

    pub fn cost_total(&self) -> Decimal {
        self.cost_total
    }

    pub fn is_loss(&self) -> bool {
        self.profit.is_sign_negative() && !self.profit.is_zero()
    }
}

/// Append-only event log of profit snapshots, one per mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfitHistory {
    snapshots: Vec<ProfitSnapshot>,
}

impl ProfitHistory {
    pub(crate) fn append(&mut self, snapshot: ProfitSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// The most recent snapshot, which reflects the current ledger totals.
    pub fn latest(&self) -> Option<&ProfitSnapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfitSnapshot> {
        self.snapshots.iter()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &ProfitSnapshot> {
        self.snapshots.iter().rev()
    }
}
