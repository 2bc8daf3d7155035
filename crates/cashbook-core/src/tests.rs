use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use cashbook_domain::{CategoryGroups, Configuration, NewTransaction, Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    AmountOverflow, ConfigurationSource, FixedClock, LedgerService, LoadError, ReadError,
    RecordError, TransactionFilter, TransactionLedger, ValidationError, WriteError,
};

#[derive(Clone, Default)]
struct MemoryLedger {
    entries: Arc<Mutex<Vec<Transaction>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryLedger {
    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl TransactionLedger for MemoryLedger {
    fn read_all(&self) -> Result<Vec<Transaction>, ReadError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn append(&self, transaction: &Transaction) -> Result<(), WriteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(WriteError::new("disk full"));
        }
        self.entries.lock().unwrap().push(transaction.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CountingSource {
    loads: Arc<AtomicUsize>,
    missing: Arc<AtomicBool>,
}

impl ConfigurationSource for CountingSource {
    fn load(&self) -> Result<Configuration, LoadError> {
        if self.missing.load(Ordering::SeqCst) {
            return Err(LoadError::MissingSection("Configuration".into()));
        }
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Configuration::new(
            CategoryGroups {
                needs: vec!["Rent".into(), "Groceries".into()],
                wants: vec!["Dining".into()],
                investments: vec!["Stocks".into()],
            },
            vec!["Card".into(), "Cash".into()],
            vec!["Income".into(), "Expense".into()],
        ))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service() -> (LedgerService, MemoryLedger, CountingSource) {
    let ledger = MemoryLedger::default();
    let source = CountingSource::default();
    let service = LedgerService::with_clock(
        Box::new(source.clone()),
        Box::new(ledger.clone()),
        Box::new(FixedClock::new(date(2024, 1, 15))),
    );
    (service, ledger, source)
}

fn fields(on: NaiveDate, kind: &str, amount: i64, description: &str) -> NewTransaction {
    NewTransaction {
        date: on,
        description: description.into(),
        category: "Groceries".into(),
        kind: kind.into(),
        amount: Decimal::new(amount, 0),
        method: "Card".into(),
    }
}

#[test]
fn record_transaction_appends_validated_entry() {
    let (service, ledger, _) = service();

    let recorded = service
        .record_transaction(fields(date(2024, 1, 10), "Expense", 50, " market "))
        .expect("record");

    assert_eq!(recorded.description, "market");
    assert_eq!(recorded.kind, TransactionType::Expense);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn non_positive_amounts_leave_ledger_untouched() {
    let (service, ledger, _) = service();
    service
        .record_transaction(fields(date(2024, 1, 1), "Income", 10, "seed"))
        .unwrap();

    for amount in [0, -5] {
        let err = service
            .record_transaction(fields(date(2024, 1, 2), "Expense", amount, "bad"))
            .expect_err("must reject");
        assert!(matches!(
            err,
            RecordError::Validation(ValidationError::NonPositiveAmount(_))
        ));
    }
    assert_eq!(ledger.len(), 1);
}

#[test]
fn oversized_amounts_are_rejected_before_append() {
    let (service, ledger, _) = service();
    let mut input = fields(date(2024, 1, 2), "Income", 1, "jackpot");
    input.amount = Decimal::MAX;

    let err = service.record_transaction(input).expect_err("must reject");
    assert_eq!(
        err,
        RecordError::Validation(ValidationError::AmountTooLarge(Decimal::MAX))
    );
    assert_eq!(ledger.len(), 0);
    service.get_summary(date(2024, 1, 15)).unwrap();
}

#[test]
fn overflowing_stored_totals_surface_as_read_errors() {
    let (service, ledger, _) = service();
    for _ in 0..2 {
        ledger.entries.lock().unwrap().push(Transaction::new(
            date(2024, 1, 1),
            "imported",
            "Groceries",
            TransactionType::Income,
            Decimal::MAX,
            "Card",
        ));
    }
    let overflow = ReadError::Overflow(AmountOverflow);

    assert_eq!(service.get_summary(date(2024, 1, 15)), Err(overflow.clone()));
    assert_eq!(service.overview(), Err(overflow.clone()));
    assert_eq!(
        service.period_totals(&TransactionFilter::new()),
        Err(overflow)
    );
    assert_eq!(service.list_recent(5).unwrap().len(), 2);
}

#[test]
fn configuration_is_cached_until_a_successful_write() {
    let (service, _, source) = service();

    let first = service.configuration().unwrap();
    let second = service.configuration().unwrap();
    assert_eq!(*first, *second);
    service.get_summary(date(2024, 1, 15)).unwrap();
    service.list_recent(5).unwrap();
    assert_eq!(source.loads.load(Ordering::SeqCst), 1);

    service
        .record_transaction(fields(date(2024, 1, 3), "Expense", 5, "coffee"))
        .unwrap();
    assert!(!service.cache().is_loaded());

    service.configuration().unwrap();
    assert_eq!(source.loads.load(Ordering::SeqCst), 2);
}

#[test]
fn rejected_or_failed_records_keep_the_cache() {
    let (service, ledger, source) = service();

    service
        .record_transaction(fields(date(2024, 1, 3), "Refund", 5, "odd type"))
        .expect_err("unknown type");
    assert!(service.cache().is_loaded());

    ledger.fail_writes.store(true, Ordering::SeqCst);
    let err = service
        .record_transaction(fields(date(2024, 1, 3), "Expense", 5, "coffee"))
        .expect_err("write failure");
    assert_eq!(err, RecordError::Write(WriteError::new("disk full")));
    assert!(service.cache().is_loaded());
    assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.len(), 0);
}

#[test]
fn missing_configuration_surfaces_as_record_error() {
    let (service, ledger, source) = service();
    source.missing.store(true, Ordering::SeqCst);

    let err = service
        .record_transaction(fields(date(2024, 1, 3), "Expense", 5, "coffee"))
        .expect_err("no configuration");
    assert!(matches!(err, RecordError::Configuration(LoadError::MissingSection(_))));
    assert_eq!(ledger.len(), 0);
}

#[test]
fn today_summary_uses_service_clock() {
    let (service, _, _) = service();
    service
        .record_transaction(fields(date(2024, 1, 10), "Expense", 50, "groceries"))
        .unwrap();
    service
        .record_transaction(fields(date(2024, 1, 20), "Income", 1000, "salary"))
        .unwrap();

    let summary = service.today_summary().unwrap();
    assert_eq!(summary.today, date(2024, 1, 15));
    assert_eq!(summary.realized_balance, Decimal::new(-50, 0));
    assert_eq!(summary.upcoming_income, Decimal::new(1000, 0));
    assert_eq!(summary, service.get_summary(date(2024, 1, 15)).unwrap());
}

#[test]
fn listings_follow_append_order() {
    let (service, _, _) = service();
    for (day, kind, description) in [
        (20, "Income", "salary"),
        (2, "Expense", "rent"),
        (9, "Expense", "market"),
    ] {
        service
            .record_transaction(fields(date(2024, 1, day), kind, 10, description))
            .unwrap();
    }

    let recent: Vec<_> = service
        .list_recent(2)
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(recent, ["rent", "market"]);

    let filter = TransactionFilter::new()
        .with_types(["Expense"])
        .between(date(2024, 1, 1), date(2024, 1, 31))
        .unwrap();
    let filtered = service.list_filtered(&filter).unwrap();
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].description, "rent");

    let totals = service.period_totals(&filter).unwrap();
    assert_eq!(totals.expense, Decimal::new(20, 0));
    assert_eq!(totals.balance, Decimal::new(-20, 0));

    let history = service.realized_history(date(2024, 1, 15), 5).unwrap();
    assert_eq!(history[0].description, "market");
    assert_eq!(history.len(), 2);
}
