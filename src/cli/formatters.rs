use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::input::DATE_FORMAT;

/// Renders `amount` as `R$1,234.56` (symbol configurable), with a leading
/// minus sign for negatives.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Percentage without trailing zeros, e.g. `12.5%`.
pub fn format_percentage(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
