pub mod json_backend;
pub mod memory;

use crate::{core::session::AccountIdentity, errors::Result, ledger::Ledger};

/// Load/save contract for per-account ledger documents.
///
/// `load` returns an empty ledger when nothing has been stored for the
/// identity yet. `save` replaces the whole document; callers never observe a
/// partially written one.
pub trait LedgerStore: Send + Sync {
    fn load(&self, identity: &AccountIdentity) -> Result<Ledger>;
    fn save(&self, identity: &AccountIdentity, ledger: &Ledger) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
