use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::ledger::{CostRecord, Ledger, ProfitSnapshot, RevenueRecord};

/// Recent costs considered per direct list and per subcategory bucket.
const RECENT_COSTS_PER_BUCKET: usize = 3;

/// A cost record flattened with its location in the cost tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostLine {
    pub date: NaiveDate,
    pub category: String,
    pub subcategory: Option<String>,
    pub description: String,
    pub value: Decimal,
}

impl CostLine {
    fn new(category: &str, subcategory: Option<&str>, record: &CostRecord) -> Self {
        Self {
            date: record.date,
            category: category.to_string(),
            subcategory: subcategory.map(str::to_string),
            description: record.description.clone(),
            value: record.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub latest: Option<ProfitSnapshot>,
    pub recent_revenues: Vec<RevenueRecord>,
    pub recent_costs: Vec<CostLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryReport {
    pub name: String,
    pub total: Decimal,
    pub records: Vec<CostRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub name: String,
    pub total: Decimal,
    pub direct: Vec<CostRecord>,
    pub subcategories: Vec<SubcategoryReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub revenues: Vec<RevenueRecord>,
    pub revenue_total: Decimal,
    pub categories: Vec<CategoryReport>,
    pub cost_total: Decimal,
    pub latest: Option<ProfitSnapshot>,
    /// Full profit history, newest first.
    pub history: Vec<ProfitSnapshot>,
}

pub struct SummaryService;

impl SummaryService {
    /// Latest totals plus the most recent revenues and costs, newest first.
    pub fn dashboard(ledger: &Ledger, limit: usize) -> Dashboard {
        let recent_revenues = ledger.revenues().recent(limit).cloned().collect();

        let mut recent_costs = Vec::new();
        for (name, category) in ledger.costs().categories() {
            recent_costs.extend(
                last_n(&category.direct, RECENT_COSTS_PER_BUCKET)
                    .iter()
                    .map(|record| CostLine::new(name, None, record)),
            );
            for (sub, records) in &category.subcategories {
                recent_costs.extend(
                    last_n(records, RECENT_COSTS_PER_BUCKET)
                        .iter()
                        .map(|record| CostLine::new(name, Some(sub), record)),
                );
            }
        }
        recent_costs.sort_by(|a, b| {
            (b.date, &b.category, &b.subcategory, &b.description, b.value).cmp(&(
                a.date,
                &a.category,
                &a.subcategory,
                &a.description,
                a.value,
            ))
        });
        recent_costs.truncate(limit);

        Dashboard {
            latest: ledger.profit_history().latest().cloned(),
            recent_revenues,
            recent_costs,
        }
    }

    pub fn report(ledger: &Ledger) -> Result<Report> {
        let mut categories = Vec::new();
        for (name, category) in ledger.costs().categories() {
            let subcategories = category
                .subcategories
                .iter()
                .map(|(sub, records)| {
                    Ok(SubcategoryReport {
                        name: sub.clone(),
                        total: category.subcategory_total(sub)?,
                        records: records.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            categories.push(CategoryReport {
                name: name.to_string(),
                total: category.total()?,
                direct: category.direct.clone(),
                subcategories,
            });
        }

        Ok(Report {
            revenues: ledger.revenues().iter().cloned().collect(),
            revenue_total: ledger.revenue_total()?,
            categories,
            cost_total: ledger.cost_total()?,
            latest: ledger.profit_history().latest().cloned(),
            history: ledger.profit_history().newest_first().cloned().collect(),
        })
    }
}

fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
