use std::{
    collections::HashMap,
    io,
    sync::{Mutex, MutexGuard},
};

use crate::{
    core::session::AccountIdentity,
    errors::{LedgerError, Result},
    ledger::Ledger,
};

use super::LedgerStore;

/// Process-local store holding serialized documents. Used by tests and by
/// callers that do not want anything written to disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<AccountIdentity, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document for `identity`, if any.
    pub fn document(&self, identity: &AccountIdentity) -> Result<Option<String>> {
        Ok(self.lock()?.get(identity).cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AccountIdentity, String>>> {
        self.documents.lock().map_err(|_| {
            LedgerError::Io(io::Error::new(
                io::ErrorKind::Other,
                "memory storage lock poisoned",
            ))
        })
    }
}

impl LedgerStore for MemoryStorage {
    fn load(&self, identity: &AccountIdentity) -> Result<Ledger> {
        match self.lock()?.get(identity) {
            Some(document) => Ok(serde_json::from_str(document)?),
            None => Ok(Ledger::default()),
        }
    }

    fn save(&self, identity: &AccountIdentity, ledger: &Ledger) -> Result<()> {
        let document = serde_json::to_string(ledger)?;
        self.lock()?.insert(identity.clone(), document);
        Ok(())
    }
}
