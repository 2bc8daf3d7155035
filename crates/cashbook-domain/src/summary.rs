//! Value objects produced by the summary computations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{common::DateRange, transaction::Transaction};

/// Amount due on a single date, summed across all same-type entries of that date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledTotal {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Derived view of the ledger relative to a reference day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub today: NaiveDate,
    pub realized_income: Decimal,
    pub realized_expense: Decimal,
    pub realized_balance: Decimal,
    /// `None` only when `today` is the last representable date.
    pub upcoming_window: Option<DateRange>,
    pub upcoming_income: Decimal,
    pub upcoming_expense: Decimal,
    pub next_income: Option<ScheduledTotal>,
    pub next_expense: Option<ScheduledTotal>,
    pub last_realized: Option<Transaction>,
}

/// Income, expense and their difference over some set of entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// One row of a grouped breakdown (per category or per method).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelTotal {
    pub label: String,
    pub amount: Decimal,
}

/// All-time totals with category and payment-method breakdowns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerOverview {
    pub totals: PeriodTotals,
    pub expense_by_category: Vec<LabelTotal>,
    pub income_by_category: Vec<LabelTotal>,
    pub amount_by_method: Vec<LabelTotal>,
}
