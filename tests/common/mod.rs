#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use cashbook::{cli::commands::starter_configuration, open_service};
use cashbook_config::Settings;
use cashbook_core::{FixedClock, LedgerService};
use cashbook_storage_json::{create_workbook, WorkbookStore};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh workbook with the starter configuration in its own temp directory.
pub fn setup_workbook() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("workbook.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    create_workbook(&path, &starter_configuration()).expect("create workbook");
    path
}

pub fn service_for(path: &Path) -> LedgerService {
    open_service(path, &Settings::default())
}

/// Service whose clock is pinned to `today`.
pub fn service_at(path: &Path, today: NaiveDate) -> LedgerService {
    let store = WorkbookStore::new(path);
    LedgerService::with_clock(
        Box::new(store.clone()),
        Box::new(store),
        Box::new(FixedClock::new(today)),
    )
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
