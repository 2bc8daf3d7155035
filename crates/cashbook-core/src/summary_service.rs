//! Realized balance, upcoming cash flow and next scheduled entries.

use cashbook_domain::{
    next_day, DateRange, ScheduledTotal, Summary, Transaction, TransactionType,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::AmountOverflow;

/// Pure computations over a ledger snapshot. Never touches storage.
pub struct SummaryService;

impl SummaryService {
    /// Summarises `ledger` as seen on `today`. All windows are day-granular.
    pub fn compute(ledger: &[Transaction], today: NaiveDate) -> Result<Summary, AmountOverflow> {
        let realized_income = Self::sum_where(ledger, TransactionType::Income, |date| {
            date <= today
        })?;
        let realized_expense = Self::sum_where(ledger, TransactionType::Expense, |date| {
            date <= today
        })?;

        let upcoming_window = DateRange::upcoming_after(today);
        let (upcoming_income, upcoming_expense) = match upcoming_window {
            Some(window) => (
                Self::sum_where(ledger, TransactionType::Income, |date| window.contains(date))?,
                Self::sum_where(ledger, TransactionType::Expense, |date| {
                    window.contains(date)
                })?,
            ),
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        Ok(Summary {
            today,
            realized_income,
            realized_expense,
            realized_balance: realized_income
                .checked_sub(realized_expense)
                .ok_or(AmountOverflow)?,
            upcoming_window,
            upcoming_income,
            upcoming_expense,
            next_income: Self::next_scheduled(ledger, today, &TransactionType::Income)?,
            next_expense: Self::next_scheduled(ledger, today, &TransactionType::Expense)?,
            last_realized: Self::last_realized(ledger, today).cloned(),
        })
    }

    /// `Σ income − Σ expense` over entries dated on or before `today`.
    pub fn realized_balance(
        ledger: &[Transaction],
        today: NaiveDate,
    ) -> Result<Decimal, AmountOverflow> {
        checked_sum(
            ledger
                .iter()
                .filter(|txn| txn.is_realized_by(today))
                .map(Transaction::signed_amount),
        )
    }

    /// Earliest date after `today` carrying entries of `kind`, with all of that
    /// date's amounts summed into one value.
    pub fn next_scheduled(
        ledger: &[Transaction],
        today: NaiveDate,
        kind: &TransactionType,
    ) -> Result<Option<ScheduledTotal>, AmountOverflow> {
        let Some(tomorrow) = next_day(today) else {
            return Ok(None);
        };
        let future = || {
            ledger
                .iter()
                .filter(move |txn| &txn.kind == kind && txn.date >= tomorrow)
        };
        let Some(date) = future().map(|txn| txn.date).min() else {
            return Ok(None);
        };
        let amount = checked_sum(
            future()
                .filter(|txn| txn.date == date)
                .map(|txn| txn.amount),
        )?;
        Ok(Some(ScheduledTotal { date, amount }))
    }

    /// Latest entry dated on or before `today`; among same-date entries the one
    /// appended last wins.
    pub fn last_realized(ledger: &[Transaction], today: NaiveDate) -> Option<&Transaction> {
        ledger
            .iter()
            .enumerate()
            .filter(|(_, txn)| txn.is_realized_by(today))
            .max_by_key(|(position, txn)| (txn.date, *position))
            .map(|(_, txn)| txn)
    }

    fn sum_where(
        ledger: &[Transaction],
        kind: TransactionType,
        in_window: impl Fn(NaiveDate) -> bool,
    ) -> Result<Decimal, AmountOverflow> {
        checked_sum(
            ledger
                .iter()
                .filter(|txn| txn.kind == kind && in_window(txn.date))
                .map(|txn| txn.amount),
        )
    }
}

/// Adds `amounts`, failing instead of panicking when the total leaves `Decimal` range.
pub(crate) fn checked_sum(
    amounts: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, AmountOverflow> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| {
            total.checked_add(amount).ok_or(AmountOverflow)
        })
}
