use std::collections::BTreeSet;

use cashbook_domain::{DateRange, Transaction, TransactionType};
use chrono::NaiveDate;

use crate::FilterError;

/// Selection criteria for listing transactions.
///
/// `None` places no restriction on a dimension; an empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub types: Option<BTreeSet<String>>,
    pub categories: Option<BTreeSet<String>>,
    pub date_range: Option<DateRange>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn between(self, start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        Ok(self.with_range(DateRange::new(start, end)?))
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_type(&txn.kind)
            && self
                .categories
                .as_ref()
                .map_or(true, |set| set.contains(&txn.category))
            && self
                .date_range
                .map_or(true, |range| range.contains(txn.date))
    }

    fn matches_type(&self, kind: &TransactionType) -> bool {
        self.types
            .as_ref()
            .map_or(true, |set| set.contains(kind.label()))
    }

    /// Matching entries in their original order.
    pub fn apply<'a>(&self, ledger: &'a [Transaction]) -> Vec<&'a Transaction> {
        ledger.iter().filter(|txn| self.matches(txn)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn ledger() -> Vec<Transaction> {
        vec![
            Transaction::new(date(1), "rent", "Rent", TransactionType::Expense, Decimal::ONE, "Card"),
            Transaction::new(date(5), "pay", "Work", TransactionType::Income, Decimal::ONE, "Bank"),
            Transaction::new(date(9), "meal", "Dining", TransactionType::Expense, Decimal::ONE, "Cash"),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let ledger = ledger();
        let picked = TransactionFilter::new().apply(&ledger);
        let names: Vec<_> = picked.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, ["rent", "pay", "meal"]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let ledger = ledger();
        let filter = TransactionFilter::new()
            .with_types(["Expense"])
            .with_categories(["Dining", "Rent"])
            .between(date(2), date(9))
            .unwrap();
        let picked = filter.apply(&ledger);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].description, "meal");
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let ledger = ledger();
        let filter = TransactionFilter::new().with_categories(Vec::<String>::new());
        assert!(filter.apply(&ledger).is_empty());
    }

    #[test]
    fn inverted_dates_are_rejected() {
        assert!(TransactionFilter::new().between(date(9), date(1)).is_err());
    }
}
