//! Composition root consumed by the front ends.

use std::sync::Arc;

use cashbook_domain::{
    Configuration, LedgerOverview, NewTransaction, PeriodTotals, Summary, Transaction,
};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    config_cache::ConfigurationCache,
    filter::TransactionFilter,
    report_service::ReportService,
    storage::{ConfigurationSource, TransactionLedger},
    summary_service::SummaryService,
    time::{Clock, SystemClock},
    validation, LoadError, ReadError, RecordError,
};

/// Wires configuration, ledger storage and the summary computations together.
///
/// Front ends only talk to this type; they never open the persisted resource.
/// Nothing here retries: a failed write is reported once and never replayed.
pub struct LedgerService {
    config_source: Box<dyn ConfigurationSource>,
    ledger: Box<dyn TransactionLedger>,
    cache: ConfigurationCache,
    clock: Box<dyn Clock>,
}

impl LedgerService {
    pub fn new(
        config_source: Box<dyn ConfigurationSource>,
        ledger: Box<dyn TransactionLedger>,
    ) -> Self {
        Self::with_clock(config_source, ledger, Box::new(SystemClock))
    }

    pub fn with_clock(
        config_source: Box<dyn ConfigurationSource>,
        ledger: Box<dyn TransactionLedger>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config_source,
            ledger,
            cache: ConfigurationCache::new(),
            clock,
        }
    }

    /// Current configuration, loaded on first use and cached until the next
    /// successful write.
    pub fn configuration(&self) -> Result<Arc<Configuration>, LoadError> {
        self.cache.get_or_load(self.config_source.as_ref())
    }

    pub fn cache(&self) -> &ConfigurationCache {
        &self.cache
    }

    /// Validates `fields` and appends the resulting entry.
    ///
    /// On any error the ledger is left exactly as it was.
    pub fn record_transaction(&self, fields: NewTransaction) -> Result<Transaction, RecordError> {
        let config = self.configuration()?;
        let transaction = validation::validate(&fields, &config).map_err(|err| {
            warn!(error = %err, "rejected transaction");
            err
        })?;
        self.ledger.append(&transaction).map_err(|err| {
            warn!(error = %err, "append failed");
            err
        })?;
        self.cache.invalidate();
        info!(
            date = %transaction.date,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "transaction recorded"
        );
        Ok(transaction)
    }

    pub fn get_summary(&self, today: NaiveDate) -> Result<Summary, ReadError> {
        let ledger = self.ledger.read_all()?;
        Ok(SummaryService::compute(&ledger, today)?)
    }

    pub fn today_summary(&self) -> Result<Summary, ReadError> {
        self.get_summary(self.clock.today())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The `n` most recently appended entries in append order.
    pub fn list_recent(&self, n: usize) -> Result<Vec<Transaction>, ReadError> {
        let ledger = self.ledger.read_all()?;
        Ok(ReportService::recent(&ledger, n).to_vec())
    }

    pub fn list_filtered(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, ReadError> {
        let ledger = self.ledger.read_all()?;
        Ok(ledger.into_iter().filter(|txn| filter.matches(txn)).collect())
    }

    /// Up to `n` realized entries, newest date first.
    pub fn realized_history(
        &self,
        today: NaiveDate,
        n: usize,
    ) -> Result<Vec<Transaction>, ReadError> {
        let ledger = self.ledger.read_all()?;
        Ok(ReportService::realized_history(&ledger, today, n)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn period_totals(&self, filter: &TransactionFilter) -> Result<PeriodTotals, ReadError> {
        let ledger = self.ledger.read_all()?;
        Ok(ReportService::totals(filter.apply(&ledger))?)
    }

    pub fn overview(&self) -> Result<LedgerOverview, ReadError> {
        let ledger = self.ledger.read_all()?;
        Ok(ReportService::overview(&ledger)?)
    }
}
