use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// A dated monetary entry. Revenues and costs share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "valor", with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "data")]
    pub date: NaiveDate,
}

pub type RevenueRecord = Record;
pub type CostRecord = Record;

impl Record {
    pub fn new(value: Decimal, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            value,
            description: description.into(),
            date,
        }
    }
}

/// Outcome of a positional removal.
///
/// Absence is not a failure: an out-of-range index or an unknown bucket yields
/// [`Removal::NotFound`] and leaves the ledger untouched. Callers that want a
/// hard error can use [`Removal::ok_or_else`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Removal<T> {
    Removed(T),
    NotFound,
}

impl<T> Removal<T> {
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed(_))
    }

    pub fn removed(self) -> Option<T> {
        match self {
            Removal::Removed(value) => Some(value),
            Removal::NotFound => None,
        }
    }

    pub fn ok_or_else<E, F>(self, err: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> E,
    {
        self.removed().ok_or_else(err)
    }
}

pub(crate) fn remove_at(records: &mut Vec<Record>, index: usize) -> Removal<Record> {
    if index < records.len() {
        Removal::Removed(records.remove(index))
    } else {
        Removal::NotFound
    }
}

pub(crate) fn sum(records: &[Record]) -> Result<Decimal> {
    records
        .iter()
        .try_fold(Decimal::ZERO, |total, record| add_amounts(total, record.value))
}

/// Adds two amounts, failing instead of overflowing.
pub(crate) fn add_amounts(left: Decimal, right: Decimal) -> Result<Decimal> {
    left.checked_add(right).ok_or_else(out_of_range)
}

pub(crate) fn out_of_range() -> LedgerError {
    LedgerError::InvalidInput("amount total exceeds the supported range".into())
}
