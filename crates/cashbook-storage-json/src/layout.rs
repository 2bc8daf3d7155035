//! Mapping between sheet rows and domain values.

use std::str::FromStr;

use cashbook_core::{LoadError, ReadError};
use cashbook_domain::{
    CategoryGroups, Configuration, Transaction, TransactionStatus, TransactionType, MAX_AMOUNT,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::workbook::{
    cell_text, is_blank, row_is_populated, Cell, Sheet, CONFIGURATION_HEADER, TRANSACTIONS_HEADER,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Reads the five configuration columns below the header row.
///
/// Each column is read on its own: it ends at its first absent cell (`null`, or a
/// row too short to reach it), and blank cells inside it are skipped.
pub fn parse_configuration(sheet: &Sheet) -> Result<Configuration, LoadError> {
    let header = sheet
        .rows
        .first()
        .ok_or_else(|| LoadError::MalformedLayout(format!("{} has no header row", sheet.name)))?;
    if header.len() < CONFIGURATION_HEADER.len() {
        return Err(LoadError::MalformedLayout(format!(
            "{} header has {} columns, expected {}",
            sheet.name,
            header.len(),
            CONFIGURATION_HEADER.len()
        )));
    }

    let data = &sheet.rows[1..];
    let [needs, wants, investments, methods, types] =
        std::array::from_fn(|column| read_column(data, column));

    Ok(Configuration::new(
        CategoryGroups {
            needs,
            wants,
            investments,
        },
        methods,
        types,
    ))
}

fn read_column(rows: &[Vec<Cell>], column: usize) -> Vec<String> {
    let mut values = Vec::new();
    for row in rows {
        let Some(Some(text)) = row.get(column) else {
            break;
        };
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            values.push(trimmed.to_string());
        }
    }
    values
}

/// Configuration sheet rows (header included) for `config`. Shorter columns are
/// padded with absent cells.
pub fn configuration_rows(config: &Configuration) -> Vec<Vec<Cell>> {
    let groups = &config.category_groups;
    let columns: [&[String]; 5] = [
        &groups.needs,
        &groups.wants,
        &groups.investments,
        &config.payment_methods,
        &config.transaction_types,
    ];
    let depth = columns.iter().map(|c| c.len()).max().unwrap_or(0);

    let mut rows = Vec::with_capacity(depth + 1);
    rows.push(
        CONFIGURATION_HEADER
            .iter()
            .map(|h| Some(h.to_string()))
            .collect(),
    );
    for index in 0..depth {
        rows.push(
            columns
                .iter()
                .map(|column| column.get(index).cloned())
                .collect(),
        );
    }
    rows
}

/// Decodes every populated data row of the transactions sheet.
pub fn parse_transactions(sheet: &Sheet) -> Result<Vec<Transaction>, ReadError> {
    if sheet.rows.is_empty() {
        return Err(ReadError::Corrupt(format!(
            "{} has no header row",
            sheet.name
        )));
    }
    sheet
        .rows
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| row_is_populated(row))
        .map(|(index, row)| decode_row(row).map_err(|reason| {
            ReadError::Corrupt(format!("{} row {}: {}", sheet.name, index + 1, reason))
        }))
        .collect()
}

fn decode_row(row: &[Cell]) -> Result<Transaction, String> {
    let date = parse_date(required(row, 0)?)?;
    let description = required(row, 1)?.to_string();
    let kind = TransactionType::from_label(required(row, 3)?);
    let raw_amount = required(row, 4)?;
    let amount = Decimal::from_str(raw_amount)
        .map_err(|err| format!("invalid Amount `{raw_amount}`: {err}"))?;
    // Stored rows obey the same bounds as recorded ones.
    if amount <= Decimal::ZERO || amount > MAX_AMOUNT {
        return Err(format!("Amount `{raw_amount}` is out of range"));
    }

    Ok(Transaction {
        date,
        description,
        category: optional(row, 2).to_string(),
        kind,
        amount,
        method: optional(row, 5).to_string(),
        status: TransactionStatus::from_label(optional(row, 6)),
    })
}

fn required(row: &[Cell], index: usize) -> Result<&str, String> {
    let cell = row.get(index);
    if is_blank(cell) {
        return Err(format!("missing {}", TRANSACTIONS_HEADER[index]));
    }
    Ok(optional(row, index))
}

fn optional(row: &[Cell], index: usize) -> &str {
    cell_text(row.get(index)).unwrap_or_default().trim()
}

/// Parses a stored date; any time-of-day component is dropped.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.date())
        .ok_or_else(|| format!("invalid Date `{raw}`"))
}

pub fn encode_row(txn: &Transaction) -> Vec<Cell> {
    vec![
        Some(txn.date.format(DATE_FORMAT).to_string()),
        Some(txn.description.clone()),
        Some(txn.category.clone()),
        Some(txn.kind.label().to_string()),
        Some(txn.amount.to_string()),
        Some(txn.method.clone()),
        Some(txn.status.label().to_string()),
    ]
}
