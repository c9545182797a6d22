use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    core::{
        session::AccountIdentity,
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    errors::{LedgerError, Result},
    ledger::Ledger,
};

use super::LedgerStore;

const LEDGER_EXTENSION: &str = "json";

/// Filesystem-backed JSON persistence, one document per account identity.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
}

impl JsonStorage {
    /// Stores documents under `<root>/ledgers`, defaulting `root` to the
    /// application home.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let ledgers_dir = PathResolver::ledger_dir_in(&base);
        ensure_dir(&ledgers_dir)?;
        Ok(Self { ledgers_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn ledgers_dir(&self) -> &Path {
        &self.ledgers_dir
    }

    pub fn ledger_path(&self, identity: &AccountIdentity) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", file_stem(identity), LEDGER_EXTENSION))
    }
}

impl LedgerStore for JsonStorage {
    fn load(&self, identity: &AccountIdentity) -> Result<Ledger> {
        let path = self.ledger_path(identity);
        if !path.exists() {
            debug!(identity = %identity, "no stored ledger, starting empty");
            return Ok(Ledger::default());
        }
        load_ledger_from_path(&path)
    }

    fn save(&self, identity: &AccountIdentity, ledger: &Ledger) -> Result<()> {
        let path = self.ledger_path(identity);
        save_ledger_to_path(ledger, &path)?;
        debug!(identity = %identity, path = %path.display(), "ledger saved");
        Ok(())
    }
}

pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    write_atomic(path, &json)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|source| LedgerError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// File-safe rendering of an identity. Characters outside `[a-z0-9@._-]`
/// become `~xxxxxx` (code point in hex) so distinct identities never share a
/// file.
fn file_stem(identity: &AccountIdentity) -> String {
    let mut stem = String::with_capacity(identity.as_str().len());
    for ch in identity.as_str().chars() {
        match ch {
            'a'..='z' | '0'..='9' | '@' | '.' | '_' | '-' => stem.push(ch),
            other => {
                let _ = write!(stem, "~{:06x}", other as u32);
            }
        }
    }
    if stem.starts_with('.') {
        stem.insert(0, '_');
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::RevenueRecord;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    fn identity(raw: &str) -> AccountIdentity {
        AccountIdentity::parse(raw).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_revenue(RevenueRecord::new(
            dec!(42.5),
            "Consulting",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ));
        ledger
    }

    #[test]
    fn missing_document_loads_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        let ledger = storage.load(&identity("new@example.com")).unwrap();
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let who = identity("ana@example.com");
        let ledger = sample_ledger();
        storage.save(&who, &ledger).expect("save ledger");
        assert_eq!(storage.load(&who).expect("load ledger"), ledger);
        assert!(storage.ledger_path(&who).ends_with("ana@example.com.json"));
    }

    #[test]
    fn corrupt_document_is_reported() {
        let (storage, _guard) = storage_with_temp_dir();
        let who = identity("ana@example.com");
        fs::write(storage.ledger_path(&who), r#"{"faturamentos": "nope"}"#).unwrap();
        let err = storage.load(&who).expect_err("corrupt document must fail");
        assert!(matches!(err, LedgerError::Corrupt { .. }), "unexpected: {err:?}");
    }

    #[test]
    fn failed_save_preserves_previous_document() {
        let (storage, _guard) = storage_with_temp_dir();
        let who = identity("ana@example.com");
        storage.save(&who, &Ledger::default()).unwrap();
        let path = storage.ledger_path(&who);
        let original = fs::read_to_string(&path).unwrap();

        // A directory squatting on the staging path makes the write fail.
        let tmp = crate::core::utils::tmp_path(&path);
        fs::create_dir_all(&tmp).unwrap();
        assert!(storage.save(&who, &sample_ledger()).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn file_stems_do_not_collide() {
        assert_eq!(file_stem(&identity("a+b@x.io")), "a~00002bb@x.io");
        assert_ne!(
            file_stem(&identity("a+b@x.io")),
            file_stem(&identity("a/b@x.io"))
        );
        assert_eq!(file_stem(&identity(".hidden")), "_.hidden");
    }
}
