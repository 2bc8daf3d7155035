//! cashbook-core
//!
//! Ledger engine services shared by every front end.
//! Depends on cashbook-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod config_cache;
pub mod error;
pub mod filter;
pub mod ledger_service;
pub mod report_service;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod validation;

#[cfg(test)]
mod tests;

pub use config_cache::ConfigurationCache;
pub use error::*;
pub use filter::TransactionFilter;
pub use ledger_service::LedgerService;
pub use report_service::ReportService;
pub use storage::{ConfigurationSource, TransactionLedger};
pub use summary_service::SummaryService;
pub use time::{Clock, FixedClock, SystemClock};
