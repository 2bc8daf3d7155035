use cashbook_domain::{Configuration, Transaction};

use crate::{LoadError, ReadError, WriteError};

/// Source of the operator-maintained configuration.
pub trait ConfigurationSource: Send + Sync {
    fn load(&self) -> Result<Configuration, LoadError>;
}

/// Durable, append-only log of transactions.
///
/// Implementations must make `append` all-or-nothing from the perspective of
/// `read_all`, and must serialize concurrent appends against the same resource,
/// including appends issued by other processes.
pub trait TransactionLedger: Send + Sync {
    /// Every persisted entry in stored order. Empty when nothing was recorded yet.
    fn read_all(&self) -> Result<Vec<Transaction>, ReadError>;

    /// Persists `transaction` after the last existing entry.
    fn append(&self, transaction: &Transaction) -> Result<(), WriteError>;
}
