//! cashbook-storage-json
//!
//! The persisted workbook: a JSON document with a `Configuration` sheet and a
//! `Transactions` sheet. Implements the core storage traits on top of it.

pub mod layout;
pub mod lock;
pub mod store;
pub mod workbook;

pub use lock::WriteLock;
pub use store::{create_workbook, StoreOptions, WorkbookStore};
pub use workbook::{Cell, Sheet, Workbook, CONFIGURATION_SHEET, TRANSACTIONS_SHEET};
