#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use profit_core::{
    core::{AccountIdentity, FixedClock, LedgerManager, Session},
    storage::JsonStorage,
};
use tempfile::TempDir;

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

pub fn session(email: &str) -> Session {
    Session::new(AccountIdentity::parse(email).expect("valid identity"), Utc::now())
}

/// Manager for `email` backed by JSON files under a fresh temp dir. Keep the
/// returned guard alive for the duration of the test.
pub fn json_manager(email: &str, today: &str) -> (LedgerManager, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let manager = json_manager_in(&temp, email, today);
    (manager, temp)
}

pub fn json_manager_in(temp: &TempDir, email: &str, today: &str) -> LedgerManager {
    let storage =
        JsonStorage::new(Some(temp.path().to_path_buf())).expect("create json storage backend");
    LedgerManager::open(
        session(email),
        Box::new(storage),
        Arc::new(FixedClock::new(date(today))),
    )
    .expect("open ledger")
}

pub fn weights(pairs: &[(&str, rust_decimal::Decimal)]) -> Vec<(String, rust_decimal::Decimal)> {
    pairs
        .iter()
        .map(|(name, pct)| (name.to_string(), *pct))
        .collect()
}
