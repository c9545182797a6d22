use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

use super::{
    category::CostTree,
    profit::{ProfitHistory, ProfitSnapshot},
    record::{CostRecord, Removal, RevenueRecord},
    revenue::RevenueLog,
};

/// Financial document for one account: revenues, costs and profit history.
///
/// Mutators here only touch memory. Persistence and profit recomputation are
/// driven by [`crate::core::ledger_manager::LedgerManager`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(rename = "faturamentos")]
    revenues: RevenueLog,
    #[serde(rename = "custos")]
    costs: CostTree,
    #[serde(rename = "lucros")]
    profit_history: ProfitHistory,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revenues(&self) -> &RevenueLog {
        &self.revenues
    }

    pub fn costs(&self) -> &CostTree {
        &self.costs
    }

    pub fn profit_history(&self) -> &ProfitHistory {
        &self.profit_history
    }

    pub fn add_revenue(&mut self, record: RevenueRecord) {
        self.revenues.append(record);
    }

    pub fn remove_revenue(&mut self, index: usize) -> Removal<RevenueRecord> {
        self.revenues.remove_at(index)
    }

    pub fn add_cost(&mut self, category: &str, record: CostRecord, subcategory: Option<&str>) {
        self.costs.add(category, record, subcategory);
    }

    pub fn remove_cost(
        &mut self,
        category: &str,
        index: usize,
        subcategory: Option<&str>,
    ) -> Removal<CostRecord> {
        self.costs.remove(category, index, subcategory)
    }

    pub fn revenue_total(&self) -> Result<Decimal> {
        self.revenues.total()
    }

    pub fn cost_total(&self) -> Result<Decimal> {
        self.costs.grand_total()
    }

    pub fn category_total(&self, category: &str) -> Result<Decimal> {
        self.costs.category_total(category)
    }

    pub(crate) fn append_snapshot(&mut self, snapshot: ProfitSnapshot) {
        self.profit_history.append(snapshot);
    }

    /// Counts every stored record across revenues and costs.
    pub fn record_count(&self) -> usize {
        self.revenues.len()
            + self
                .costs
                .categories()
                .map(|(_, category)| category.record_count())
                .sum::<usize>()
    }

    /// Earliest and latest record dates, if any record exists.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let revenue_dates = self.revenues.iter().map(|record| record.date);
        let cost_dates = self.costs.categories().flat_map(|(_, category)| {
            category
                .direct
                .iter()
                .chain(category.subcategories.values().flatten())
                .map(|record| record.date)
        });
        revenue_dates.chain(cost_dates).fold(None, |span, date| match span {
            None => Some((date, date)),
            Some((start, end)) => Some((start.min(date), end.max(date))),
        })
    }
}
