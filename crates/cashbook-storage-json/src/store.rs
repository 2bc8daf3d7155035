use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use cashbook_core::{
    ConfigurationSource, LoadError, ReadError, TransactionLedger, WriteError,
};
use cashbook_domain::{Configuration, Transaction};
use tracing::{debug, info};

use crate::{
    layout::{configuration_rows, encode_row, parse_configuration, parse_transactions},
    lock::WriteLock,
    workbook::{
        read_workbook, sibling_path, write_workbook, Sheet, Workbook, WorkbookReadError,
        CONFIGURATION_SHEET, TRANSACTIONS_HEADER, TRANSACTIONS_SHEET,
    },
};

const LOCK_SUFFIX: &str = "lock";
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_LOCK_RETRY: Duration = Duration::from_millis(50);

/// How long writers wait for each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub lock_timeout: Duration,
    pub lock_retry: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            lock_retry: DEFAULT_LOCK_RETRY,
        }
    }
}

/// Workbook-backed configuration store and transaction ledger.
///
/// Reads take no lock: the file is only ever swapped in whole by rename, so a
/// reader sees either the previous or the next complete document.
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    path: PathBuf,
    options: StoreOptions,
}

impl WorkbookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, StoreOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        sibling_path(&self.path, LOCK_SUFFIX)
    }

    fn lock(&self) -> Result<WriteLock, WriteError> {
        WriteLock::acquire(
            &self.lock_path(),
            self.options.lock_timeout,
            self.options.lock_retry,
        )
    }
}

impl ConfigurationSource for WorkbookStore {
    fn load(&self) -> Result<Configuration, LoadError> {
        let workbook = read_workbook(&self.path).map_err(|err| match err {
            WorkbookReadError::NotFound(path) => {
                LoadError::MissingResource(path.display().to_string())
            }
            other => LoadError::MalformedLayout(other.to_string()),
        })?;
        let sheet = workbook
            .sheet(CONFIGURATION_SHEET)
            .ok_or_else(|| LoadError::MissingSection(CONFIGURATION_SHEET.to_string()))?;
        parse_configuration(sheet)
    }
}

impl TransactionLedger for WorkbookStore {
    fn read_all(&self) -> Result<Vec<Transaction>, ReadError> {
        let workbook = read_workbook(&self.path).map_err(|err| match err {
            WorkbookReadError::NotFound(path) => ReadError::Missing(path.display().to_string()),
            other => ReadError::Corrupt(other.to_string()),
        })?;
        let sheet = workbook
            .sheet(TRANSACTIONS_SHEET)
            .ok_or_else(|| ReadError::Missing(format!("{TRANSACTIONS_SHEET} sheet")))?;
        parse_transactions(sheet)
    }

    fn append(&self, transaction: &Transaction) -> Result<(), WriteError> {
        let _guard = self.lock()?;

        let mut workbook = read_workbook(&self.path)
            .map_err(|err| WriteError::new(format!("cannot read workbook: {err}")))?;
        let sheet = workbook.sheet_mut(TRANSACTIONS_SHEET).ok_or_else(|| {
            WriteError::new(format!("workbook has no {TRANSACTIONS_SHEET} sheet"))
        })?;
        let last = sheet.last_populated_row().ok_or_else(|| {
            WriteError::new(format!("{TRANSACTIONS_SHEET} sheet has no header row"))
        })?;
        sheet.rows.truncate(last + 1);
        sheet.rows.push(encode_row(transaction));
        let row_number = sheet.rows.len();

        write_workbook(&self.path, &workbook)?;
        debug!(path = %self.path.display(), row = row_number, "row appended");
        Ok(())
    }
}

/// Writes a fresh workbook holding `config` and an empty transactions sheet.
/// Never overwrites an existing file.
pub fn create_workbook(path: &Path, config: &Configuration) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let _guard = WriteLock::acquire(
        &sibling_path(path, LOCK_SUFFIX),
        DEFAULT_LOCK_TIMEOUT,
        DEFAULT_LOCK_RETRY,
    )?;
    if path.exists() {
        return Err(WriteError::new(format!(
            "{} already exists",
            path.display()
        )));
    }
    let workbook = Workbook {
        sheets: vec![
            Sheet {
                name: CONFIGURATION_SHEET.to_string(),
                rows: configuration_rows(config),
            },
            Sheet::new(TRANSACTIONS_SHEET, &TRANSACTIONS_HEADER),
        ],
    };
    write_workbook(path, &workbook)?;
    info!(path = %path.display(), "workbook created");
    Ok(())
}
