mod common;

use std::sync::Arc;

use common::date;
use profit_core::{
    auth::{AuthError, CredentialStore},
    core::{FixedClock, LedgerManager},
    storage::JsonStorage,
};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn store(temp: &TempDir, domain: Option<&str>) -> CredentialStore {
    CredentialStore::in_base(
        temp.path(),
        domain,
        Arc::new(FixedClock::new(date("2024-06-01"))),
    )
}

#[test]
fn signed_in_session_opens_its_own_ledger() {
    let temp = TempDir::new().unwrap();
    let credentials = store(&temp, Some("e-flow.digital"));
    credentials
        .register("ana@e-flow.digital", "hunter2", "hunter2")
        .unwrap();

    let session = credentials
        .authenticate("ana@e-flow.digital", "hunter2")
        .unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let mut manager = LedgerManager::open(
        session,
        Box::new(storage),
        Arc::new(FixedClock::new(date("2024-06-01"))),
    )
    .unwrap();
    manager.add_revenue(dec!(5), "first sale", None).unwrap();
    assert!(temp
        .path()
        .join("ledgers")
        .join("ana@e-flow.digital.json")
        .exists());
}

#[test]
fn credentials_file_never_holds_plaintext() {
    let temp = TempDir::new().unwrap();
    let credentials = store(&temp, None);
    credentials
        .register("ana@example.com", "hunter2", "hunter2")
        .unwrap();
    let raw = std::fs::read_to_string(credentials.path()).unwrap();
    assert!(!raw.contains("hunter2"));
    assert!(raw.contains("$argon2id$"));
    assert!(raw.contains("\"domain\": \"example.com\""));
}

#[test]
fn restricted_domain_blocks_other_addresses() {
    let temp = TempDir::new().unwrap();
    let credentials = store(&temp, Some("e-flow.digital"));
    let err = credentials
        .register("ana@gmail.com", "pw", "pw")
        .unwrap_err();
    assert!(matches!(err, AuthError::DomainNotAllowed { .. }));
    assert!(credentials.users().unwrap().is_empty());
}

#[test]
fn wrong_password_is_rejected() {
    let temp = TempDir::new().unwrap();
    let credentials = store(&temp, None);
    credentials.register("ana@example.com", "pw", "pw").unwrap();
    assert!(matches!(
        credentials.authenticate("ana@example.com", "PW"),
        Err(AuthError::InvalidCredentials)
    ));
}
