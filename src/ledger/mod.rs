//! Ledger domain models and their persisted document shape.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod profit;
pub mod record;
pub mod revenue;

pub use category::{CostCategory, CostTree};
pub use ledger::Ledger;
pub use profit::{ProfitHistory, ProfitSnapshot};
pub use record::{CostRecord, Record, Removal, RevenueRecord};
pub use revenue::RevenueLog;
