use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::{self, Removal, RevenueRecord};
use crate::errors::Result;

/// Insertion-ordered list of revenue entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevenueLog {
    records: Vec<RevenueRecord>,
}

impl RevenueLog {
    pub fn append(&mut self, record: RevenueRecord) {
        self.records.push(record);
    }

    pub fn remove_at(&mut self, index: usize) -> Removal<RevenueRecord> {
        record::remove_at(&mut self.records, index)
    }

    /// Sum of every current value; recomputed on each call.
    pub fn total(&self) -> Result<Decimal> {
        record::sum(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RevenueRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RevenueRecord> {
        self.records.iter()
    }

    /// The last `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &RevenueRecord> {
        self.records.iter().rev().take(limit)
    }
}
