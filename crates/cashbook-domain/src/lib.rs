//! cashbook-domain
//!
//! Pure domain models (Transaction, Configuration, summaries).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod configuration;
pub mod summary;
pub mod transaction;

pub use common::*;
pub use configuration::*;
pub use summary::*;
pub use transaction::*;
