//! Field and membership checks applied before a transaction is recorded.

use cashbook_domain::{Configuration, NewTransaction, Transaction, TransactionType, MAX_AMOUNT};
use rust_decimal::Decimal;

use crate::ValidationError;

/// Checks `fields` against `config` and builds the transaction to append.
///
/// The description is stored trimmed. Checks run in form order: description,
/// amount, type, category, method; the first failure is reported.
pub fn validate(
    fields: &NewTransaction,
    config: &Configuration,
) -> Result<Transaction, ValidationError> {
    let description = fields.description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if fields.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(fields.amount));
    }
    if fields.amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(fields.amount));
    }
    if !config.has_type(&fields.kind) {
        return Err(ValidationError::UnknownType(fields.kind.clone()));
    }
    if !config.has_category(&fields.category) {
        return Err(ValidationError::UnknownCategory(fields.category.clone()));
    }
    if !config.has_method(&fields.method) {
        return Err(ValidationError::UnknownMethod(fields.method.clone()));
    }

    Ok(Transaction::new(
        fields.date,
        description,
        fields.category.clone(),
        TransactionType::from_label(&fields.kind),
        fields.amount,
        fields.method.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashbook_domain::{CategoryGroups, TransactionStatus};
    use chrono::NaiveDate;

    fn config() -> Configuration {
        Configuration::new(
            CategoryGroups {
                needs: vec!["Rent".into()],
                wants: vec!["Dining".into()],
                investments: vec![],
            },
            vec!["Card".into()],
            vec!["Income".into(), "Expense".into()],
        )
    }

    fn fields() -> NewTransaction {
        NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            description: "  Pizza night ".into(),
            category: "Dining".into(),
            kind: "Expense".into(),
            amount: Decimal::new(4250, 2),
            method: "Card".into(),
        }
    }

    #[test]
    fn valid_fields_build_realized_transaction() {
        let txn = validate(&fields(), &config()).expect("valid");
        assert_eq!(txn.description, "Pizza night");
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.status, TransactionStatus::Realized);
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut input = fields();
        input.description = "   ".into();
        assert_eq!(
            validate(&input, &config()),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for amount in [Decimal::ZERO, Decimal::new(-1, 0)] {
            let mut input = fields();
            input.amount = amount;
            assert_eq!(
                validate(&input, &config()),
                Err(ValidationError::NonPositiveAmount(amount))
            );
        }
    }

    #[test]
    fn amounts_above_the_limit_are_rejected() {
        let mut input = fields();
        input.amount = MAX_AMOUNT;
        assert!(validate(&input, &config()).is_ok());

        for amount in [MAX_AMOUNT + Decimal::new(1, 2), Decimal::MAX] {
            input.amount = amount;
            assert_eq!(
                validate(&input, &config()),
                Err(ValidationError::AmountTooLarge(amount))
            );
        }
    }

    #[test]
    fn type_must_come_from_configuration() {
        let mut input = fields();
        input.kind = "Transfer".into();
        assert_eq!(
            validate(&input, &config()),
            Err(ValidationError::UnknownType("Transfer".into()))
        );
    }

    #[test]
    fn configured_non_arithmetic_type_is_accepted() {
        let mut cfg = config();
        cfg.transaction_types.push("Transfer".into());
        let mut input = fields();
        input.kind = "Transfer".into();
        let txn = validate(&input, &cfg).expect("configured type");
        assert_eq!(txn.kind, TransactionType::Other("Transfer".into()));
    }

    #[test]
    fn unknown_category_and_method_are_rejected() {
        let mut input = fields();
        input.category = "Travel".into();
        assert_eq!(
            validate(&input, &config()),
            Err(ValidationError::UnknownCategory("Travel".into()))
        );

        let mut input = fields();
        input.method = "Cheque".into();
        assert_eq!(
            validate(&input, &config()),
            Err(ValidationError::UnknownMethod("Cheque".into()))
        );
    }
}
