//! Domain models for ledger transactions.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest amount a single entry may carry (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// A recorded income or expense entry. Immutable once appended to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub method: String,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        kind: TransactionType,
        amount: Decimal,
        method: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            kind,
            amount,
            method: method.into(),
            status: TransactionStatus::Realized,
        }
    }

    /// `true` when the entry is dated on or before `today`.
    pub fn is_realized_by(&self, today: NaiveDate) -> bool {
        self.date <= today
    }

    /// Signed contribution to a balance: income adds, expense subtracts, anything
    /// else is neutral.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
            TransactionType::Other(_) => Decimal::ZERO,
        }
    }
}

/// Caller-supplied fields for a transaction that has not been recorded yet.
///
/// `kind` is the raw configured label; it is validated against the configuration
/// before being turned into a [`TransactionType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: String,
    pub amount: Decimal,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
/// Direction of a transaction. Only `Income` and `Expense` take part in totals.
pub enum TransactionType {
    Income,
    Expense,
    Other(String),
}

impl TransactionType {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Income" => TransactionType::Income,
            "Expense" => TransactionType::Expense,
            other => TransactionType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Other(label) => label,
        }
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        TransactionType::from_label(&value)
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
/// Lifecycle state of a transaction. Every new entry is `Realized`; other labels are
/// preserved as read.
pub enum TransactionStatus {
    #[default]
    Realized,
    Other(String),
}

impl TransactionStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" | "Realized" => TransactionStatus::Realized,
            other => TransactionStatus::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TransactionStatus::Realized => "Realized",
            TransactionStatus::Other(label) => label,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        TransactionStatus::from_label(&value)
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
