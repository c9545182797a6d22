//! Coercion of raw user-entered fields into ledger values.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{LedgerError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest magnitude accepted for a single entered value: 10^15.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Parses a monetary value. Accepts `1234.5`, `1,234.50` and the comma
/// decimal form `1234,50`. Magnitudes above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidInput("value must not be empty".into()));
    }
    let normalized = if trimmed.contains('.') {
        trimmed.replace(',', "")
    } else if trimmed.matches(',').count() == 1 {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let value = Decimal::from_str(&normalized)
        .map_err(|_| LedgerError::InvalidInput(format!("`{trimmed}` is not a numeric value")))?;
    if value.abs() > MAX_AMOUNT {
        return Err(LedgerError::InvalidInput(format!(
            "`{trimmed}` exceeds the largest accepted value ({MAX_AMOUNT})"
        )));
    }
    Ok(value)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        LedgerError::InvalidInput(format!("invalid date `{trimmed}` (use YYYY-MM-DD)"))
    })
}

/// Parses one `name=percentage` allocation weight.
pub fn parse_weight(raw: &str) -> Result<(String, Decimal)> {
    let (name, value) = raw.rsplit_once('=').ok_or_else(|| {
        LedgerError::InvalidInput(format!("weight `{raw}` must look like name=percentage"))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidInput(format!(
            "weight `{raw}` is missing a subcategory name"
        )));
    }
    let percentage = parse_amount(value.trim().trim_end_matches('%'))?;
    Ok((name.to_string(), percentage))
}

/// Treats blank optional fields as absent.
pub fn optional_text(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}
