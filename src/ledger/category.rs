use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::{self, CostRecord, Removal};
use crate::errors::Result;

/// Cost entries filed under one category name.
///
/// Direct records and subcategory buckets can coexist. Documents written
/// without one of the two keys load with that side empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCategory {
    #[serde(rename = "registros", default)]
    pub direct: Vec<CostRecord>,
    #[serde(rename = "subcategorias", default)]
    pub subcategories: BTreeMap<String, Vec<CostRecord>>,
}

impl CostCategory {
    pub fn direct_total(&self) -> Result<Decimal> {
        record::sum(&self.direct)
    }

    /// Unknown subcategories sum to zero.
    pub fn subcategory_total(&self, name: &str) -> Result<Decimal> {
        match self.subcategories.get(name) {
            Some(records) => record::sum(records),
            None => Ok(Decimal::ZERO),
        }
    }

    pub fn total(&self) -> Result<Decimal> {
        self.subcategories
            .values()
            .try_fold(self.direct_total()?, |total, records| {
                record::add_amounts(total, record::sum(records)?)
            })
    }

    pub fn record_count(&self) -> usize {
        self.direct.len() + self.subcategories.values().map(Vec::len).sum::<usize>()
    }
}

/// Two-level cost grouping keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTree {
    #[serde(rename = "categorias")]
    categories: BTreeMap<String, CostCategory>,
}

impl CostTree {
    /// Appends `record`, creating the category and bucket on demand.
    pub fn add(&mut self, category: &str, record: CostRecord, subcategory: Option<&str>) {
        let entry = self.categories.entry(category.to_string()).or_default();
        match subcategory {
            Some(name) => entry
                .subcategories
                .entry(name.to_string())
                .or_default()
                .push(record),
            None => entry.direct.push(record),
        }
    }

    pub fn remove(
        &mut self,
        category: &str,
        index: usize,
        subcategory: Option<&str>,
    ) -> Removal<CostRecord> {
        let Some(entry) = self.categories.get_mut(category) else {
            return Removal::NotFound;
        };
        match subcategory {
            Some(name) => match entry.subcategories.get_mut(name) {
                Some(records) => record::remove_at(records, index),
                None => Removal::NotFound,
            },
            None => record::remove_at(&mut entry.direct, index),
        }
    }

    /// Unknown categories report zero.
    pub fn category_total(&self, category: &str) -> Result<Decimal> {
        match self.categories.get(category) {
            Some(entry) => entry.total(),
            None => Ok(Decimal::ZERO),
        }
    }

    pub fn grand_total(&self) -> Result<Decimal> {
        self.categories
            .values()
            .try_fold(Decimal::ZERO, |total, entry| {
                record::add_amounts(total, entry.total()?)
            })
    }

    pub fn category(&self, name: &str) -> Option<&CostCategory> {
        self.categories.get(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CostCategory)> {
        self.categories
            .iter()
            .map(|(name, category)| (name.as_str(), category))
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn cost(value: Decimal, description: &str) -> CostRecord {
        CostRecord::new(
            value,
            description,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
    }

    #[test]
    fn category_total_includes_direct_and_subcategories() {
        let mut tree = CostTree::default();
        tree.add("Ops", cost(dec!(100), "rent"), None);
        tree.add("Ops", cost(dec!(40), "vm"), Some("Cloud"));
        tree.add("Ops", cost(dec!(60), "vm"), Some("Cloud"));
        tree.add("Ops", cost(dec!(25), "payroll"), Some("Staff"));
        tree.add("Marketing", cost(dec!(10), "flyers"), None);

        assert_eq!(tree.category_total("Ops").unwrap(), dec!(225));
        let ops = tree.category("Ops").unwrap();
        assert_eq!(ops.subcategory_total("Cloud").unwrap(), dec!(100));
        assert_eq!(ops.subcategory_total("Missing").unwrap(), Decimal::ZERO);
        assert_eq!(tree.grand_total().unwrap(), dec!(235));
        assert_eq!(tree.category_total("Unknown").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn re_adding_keeps_existing_records() {
        let mut tree = CostTree::default();
        tree.add("Ops", cost(dec!(1), "a"), Some("Cloud"));
        tree.add("Ops", cost(dec!(2), "b"), Some("Cloud"));
        tree.add("Ops", cost(dec!(3), "c"), None);
        let ops = tree.category("Ops").unwrap();
        assert_eq!(ops.subcategories["Cloud"].len(), 2);
        assert_eq!(ops.direct.len(), 1);
        assert_eq!(ops.record_count(), 3);
    }

    #[test]
    fn remove_handles_unknown_targets_leniently() {
        let mut tree = CostTree::default();
        tree.add("Ops", cost(dec!(5), "a"), None);
        assert_eq!(tree.remove("Missing", 0, None), Removal::NotFound);
        assert_eq!(tree.remove("Ops", 0, Some("Cloud")), Removal::NotFound);
        assert_eq!(tree.remove("Ops", 3, None), Removal::NotFound);
        assert_eq!(tree.grand_total().unwrap(), dec!(5));

        let removed = tree.remove("Ops", 0, None).removed().unwrap();
        assert_eq!(removed.value, dec!(5));
        assert_eq!(tree.grand_total().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn loads_categories_missing_either_key() {
        let json = r#"{"categorias": {
            "Ops": {"registros": [{"valor": 10.0, "descricao": "x", "data": "2024-01-01"}]},
            "Ads": {"subcategorias": {"Social": [{"valor": 5, "descricao": "y", "data": "2024-01-02"}]}}
        }}"#;
        let tree: CostTree = serde_json::from_str(json).unwrap();
        assert!(tree.category("Ops").unwrap().subcategories.is_empty());
        assert!(tree.category("Ads").unwrap().direct.is_empty());
        assert_eq!(tree.grand_total().unwrap(), dec!(15));
    }

    #[test]
    fn overflowing_totals_are_errors() {
        let mut tree = CostTree::default();
        tree.add("Ops", cost(Decimal::MAX, "a"), None);
        tree.add("Ops", cost(Decimal::MAX, "b"), Some("Cloud"));
        tree.add("Ads", cost(dec!(1), "c"), None);
        assert!(tree.category_total("Ops").unwrap_err().is_validation());
        assert!(tree.grand_total().is_err());
        assert_eq!(tree.category_total("Ads").unwrap(), dec!(1));
    }
}
