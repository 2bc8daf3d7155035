use cashbook_domain::DateRangeError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure to load the operator configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("missing resource: {0}")]
    MissingResource(String),
    #[error("missing section: {0}")]
    MissingSection(String),
    #[error("malformed layout: {0}")]
    MalformedLayout(String),
}

/// Failure to read the persisted ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("ledger resource missing: {0}")]
    Missing(String),
    #[error("ledger resource corrupt: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Overflow(#[from] AmountOverflow),
}

/// A running total left the range `Decimal` can represent.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("amount total out of range")]
pub struct AmountOverflow;

/// An append did not reach durable storage. Prior entries are unaffected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("write failed: {reason}")]
pub struct WriteError {
    pub reason: String,
}

impl WriteError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        WriteError::new(err.to_string())
    }
}

/// Caller-supplied fields violate a field constraint or configured membership.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("amount exceeds the per-entry limit, got {0}")]
    AmountTooLarge(Decimal),
    #[error("unknown transaction type: {0}")]
    UnknownType(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown payment method: {0}")]
    UnknownMethod(String),
}

/// Outcome of a rejected or failed `record_transaction` call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("configuration unavailable: {0}")]
    Configuration(#[from] LoadError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Invalid filter parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid date range: {0}")]
    DateRange(#[from] DateRangeError),
}
