pub mod clock;
pub mod input;
pub mod ledger_manager;
pub mod services;
pub mod session;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger_manager::LedgerManager;
pub use session::{AccountIdentity, Session};
