use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::core::clock::Clock;
use crate::core::services::{
    AllocationPlan, AllocationService, CostService, Dashboard, ProfitService, Report,
    RevenueService, SummaryService,
};
use crate::core::session::Session;
use crate::errors::Result;
use crate::ledger::{CostRecord, Ledger, ProfitSnapshot, Removal, RevenueRecord};
use crate::storage::LedgerStore;

/// Facade that owns the signed-in account's ledger and persists every change.
///
/// Each mutation runs against a draft copy. The draft gets a fresh profit
/// snapshot dated by the clock, is written to storage once, and only then
/// replaces the in-memory ledger. A failed write leaves memory untouched.
pub struct LedgerManager {
    session: Session,
    ledger: Ledger,
    storage: Box<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
}

impl LedgerManager {
    pub fn open(
        session: Session,
        storage: Box<dyn LedgerStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let ledger = storage.load(session.identity())?;
        info!(
            identity = %session.identity(),
            records = ledger.record_count(),
            snapshots = ledger.profit_history().len(),
            "ledger opened"
        );
        Ok(Self {
            session,
            ledger,
            storage,
            clock,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Discards in-memory state and re-reads the stored document.
    pub fn reload(&mut self) -> Result<()> {
        self.ledger = self.storage.load(self.session.identity())?;
        Ok(())
    }

    pub fn add_revenue(
        &mut self,
        value: Decimal,
        description: &str,
        date: Option<NaiveDate>,
    ) -> Result<ProfitSnapshot> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let mut draft = self.ledger.clone();
        RevenueService::add(&mut draft, value, description, date);
        self.commit(draft)
    }

    /// Removes the revenue at `index`. Out-of-range indices are reported as
    /// [`Removal::NotFound`] and leave storage untouched.
    pub fn remove_revenue(&mut self, index: usize) -> Result<Removal<RevenueRecord>> {
        let mut draft = self.ledger.clone();
        let removal = RevenueService::remove(&mut draft, index);
        if removal.is_removed() {
            self.commit(draft)?;
        } else {
            debug!(index, "revenue removal matched nothing");
        }
        Ok(removal)
    }

    pub fn add_cost(
        &mut self,
        category: &str,
        value: Decimal,
        description: &str,
        date: Option<NaiveDate>,
        subcategory: Option<&str>,
    ) -> Result<ProfitSnapshot> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let mut draft = self.ledger.clone();
        CostService::add(&mut draft, category, value, description, date, subcategory)?;
        self.commit(draft)
    }

    pub fn remove_cost(
        &mut self,
        category: &str,
        index: usize,
        subcategory: Option<&str>,
    ) -> Result<Removal<CostRecord>> {
        let mut draft = self.ledger.clone();
        let removal = CostService::remove(&mut draft, category, index, subcategory);
        if removal.is_removed() {
            self.commit(draft)?;
        } else {
            debug!(category, index, ?subcategory, "cost removal matched nothing");
        }
        Ok(removal)
    }

    /// Splits the current total of `category` across subcategories. Every
    /// share is filed as a separate cost dated today, each followed by its
    /// own snapshot and save. Nothing is written when validation fails.
    ///
    /// Shares are not applied as one unit. If the save for a later share
    /// fails, the shares before it stay committed and persisted, and the
    /// error is returned.
    pub fn allocate(
        &mut self,
        category: &str,
        weights: &[(String, Decimal)],
    ) -> Result<AllocationPlan> {
        let plan = AllocationService::plan(&self.ledger, category, weights)?;
        let today = self.clock.today();
        for share in &plan.shares {
            self.add_cost(
                &plan.category,
                share.amount,
                &share.description(),
                Some(today),
                Some(&share.subcategory),
            )?;
        }
        info!(
            category = %plan.category,
            base = %plan.base,
            shares = plan.shares.len(),
            "allocation applied"
        );
        Ok(plan)
    }

    pub fn dashboard(&self, limit: usize) -> Dashboard {
        SummaryService::dashboard(&self.ledger, limit)
    }

    pub fn report(&self) -> Result<Report> {
        SummaryService::report(&self.ledger)
    }

    fn commit(&mut self, mut draft: Ledger) -> Result<ProfitSnapshot> {
        let snapshot = ProfitService::recompute_and_append(&mut draft, self.clock.today())?;
        if let Err(err) = self.storage.save(self.session.identity(), &draft) {
            warn!(identity = %self.session.identity(), error = %err, "ledger save failed");
            return Err(err);
        }
        self.ledger = draft;
        debug!(
            profit = %snapshot.profit(),
            snapshots = self.ledger.profit_history().len(),
            "ledger committed"
        );
        Ok(snapshot)
    }
}
