#![doc(test(attr(deny(warnings))))]

//! Cashbook records income and expense entries in a shared workbook and derives
//! balances and upcoming cash flow from them.
//!
//! The engine lives in the workspace crates; this crate wires them to the local
//! settings and hosts the `cashbook_cli` front end.

pub mod cli;
pub mod utils;

use std::{path::Path, sync::Once};

use cashbook_config::Settings;
use cashbook_core::LedgerService;
use cashbook_storage_json::{StoreOptions, WorkbookStore};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_FILTER);
}

/// Initializes global tracing and emits a startup debug log. Only the first call
/// has any effect.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("Cashbook tracing initialized.");
    });
}

/// Lock behaviour for workbook writers, taken from `settings`.
pub fn store_options(settings: &Settings) -> StoreOptions {
    StoreOptions {
        lock_timeout: settings.lock_timeout(),
        lock_retry: settings.lock_retry(),
    }
}

/// Builds a ledger service whose configuration and entries both come from the
/// workbook at `workbook`.
pub fn open_service(workbook: &Path, settings: &Settings) -> LedgerService {
    let store = WorkbookStore::with_options(workbook, store_options(settings));
    LedgerService::new(Box::new(store.clone()), Box::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init_with_filter("cashbook=debug");
    }

    #[test]
    fn store_options_follow_settings() {
        let mut settings = Settings::default();
        settings.lock_timeout_ms = 1_500;
        settings.lock_retry_ms = 0;
        let options = store_options(&settings);
        assert_eq!(options.lock_timeout.as_millis(), 1_500);
        assert_eq!(options.lock_retry.as_millis(), 1);
    }
}
