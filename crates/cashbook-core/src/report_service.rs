//! Listing and aggregate reports over a ledger snapshot.

use std::collections::BTreeMap;

use cashbook_domain::{LabelTotal, LedgerOverview, PeriodTotals, Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{summary_service::checked_sum, AmountOverflow};

pub struct ReportService;

impl ReportService {
    /// The last `n` appended entries, oldest first, regardless of date.
    pub fn recent(ledger: &[Transaction], n: usize) -> &[Transaction] {
        &ledger[ledger.len().saturating_sub(n)..]
    }

    /// Realized entries, newest date first, ties broken by latest append, capped at `n`.
    pub fn realized_history(ledger: &[Transaction], today: NaiveDate, n: usize) -> Vec<&Transaction> {
        let mut realized: Vec<(usize, &Transaction)> = ledger
            .iter()
            .enumerate()
            .filter(|(_, txn)| txn.is_realized_by(today))
            .collect();
        realized.sort_by(|(pa, a), (pb, b)| b.date.cmp(&a.date).then(pb.cmp(pa)));
        realized.into_iter().take(n).map(|(_, txn)| txn).collect()
    }

    pub fn totals<'a, I>(entries: I) -> Result<PeriodTotals, AmountOverflow>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for txn in entries {
            let total = match txn.kind {
                TransactionType::Income => &mut income,
                TransactionType::Expense => &mut expense,
                TransactionType::Other(_) => continue,
            };
            *total = total.checked_add(txn.amount).ok_or(AmountOverflow)?;
        }
        let balance = income.checked_sub(expense).ok_or(AmountOverflow)?;
        Ok(PeriodTotals {
            income,
            expense,
            balance,
        })
    }

    /// All-time totals plus per-category and per-method breakdowns.
    pub fn overview(ledger: &[Transaction]) -> Result<LedgerOverview, AmountOverflow> {
        let expense_by_category = Self::breakdown(
            ledger.iter().filter(|t| t.kind == TransactionType::Expense),
            |t| &t.category,
        )?;
        let income_by_category = Self::breakdown(
            ledger.iter().filter(|t| t.kind == TransactionType::Income),
            |t| &t.category,
        )?;
        let amount_by_method = Self::breakdown(ledger.iter(), |t| &t.method)?;

        Ok(LedgerOverview {
            totals: Self::totals(ledger)?,
            expense_by_category,
            income_by_category,
            amount_by_method,
        })
    }

    /// Sums amounts per label, largest first; equal amounts sort by label.
    fn breakdown<'a, I, F>(entries: I, label: F) -> Result<Vec<LabelTotal>, AmountOverflow>
    where
        I: Iterator<Item = &'a Transaction>,
        F: Fn(&'a Transaction) -> &'a String,
    {
        let mut sums: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
        for txn in entries {
            sums.entry(label(txn).as_str()).or_default().push(txn.amount);
        }
        let mut rows = sums
            .into_iter()
            .map(|(label, amounts)| {
                Ok(LabelTotal {
                    label: label.to_string(),
                    amount: checked_sum(amounts)?,
                })
            })
            .collect::<Result<Vec<_>, AmountOverflow>>()?;
        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.label.cmp(&b.label)));
        Ok(rows)
    }
}
