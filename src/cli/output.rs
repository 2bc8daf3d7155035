use std::{fmt, io::IsTerminal};

use cashbook_domain::{LabelTotal, Transaction, TransactionType};
use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Success,
    Warning,
    Error,
    Hint,
}

/// Terminal output helpers. Color is applied only when enabled in the settings,
/// stdout is a terminal and `NO_COLOR` is unset.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    use_color: bool,
}

impl Formatter {
    pub fn new(color_enabled: bool) -> Self {
        let use_color = color_enabled
            && std::io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none();
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.apply(Style::Header, format!("=== {title} ===")));
    }

    pub fn print_info(&self, message: impl fmt::Display) {
        println!("{message}");
    }

    pub fn print_success(&self, message: impl fmt::Display) {
        println!("{}", self.apply(Style::Success, format!("OK: {message}")));
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.apply(Style::Warning, format!("WARNING: {message}")));
    }

    pub fn print_error(&self, message: impl fmt::Display) {
        eprintln!("{}", self.apply(Style::Error, format!("ERROR: {message}")));
    }

    pub fn print_hint(&self, message: impl fmt::Display) {
        println!("{}", self.apply(Style::Hint, message.to_string()));
    }

    pub fn print_two_column(&self, entries: &[(&str, String)]) {
        let width = entries.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in entries {
            println!("  {label:<width$}  {value}", width = width + 2);
        }
    }

    pub fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        for line in render_table(headers, rows) {
            println!("{line}");
        }
    }

    /// Signed amount colored by direction: income green, expense red.
    pub fn money(&self, amount: Decimal) -> String {
        let text = format_amount(amount);
        if !self.use_color {
            return text;
        }
        if amount.is_sign_negative() && !amount.is_zero() {
            text.red().to_string()
        } else {
            text.green().to_string()
        }
    }

    fn apply(&self, style: Style, text: String) -> String {
        if !self.use_color {
            return text;
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::Success => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
            Style::Hint => text.dimmed().to_string(),
        }
    }
}

/// Two decimal places, rounded half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn format_date(date: chrono::NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub const TRANSACTION_HEADERS: [&str; 6] =
    ["Date", "Description", "Category", "Type", "Amount", "Method"];

pub fn transaction_row(txn: &Transaction) -> Vec<String> {
    let amount = match txn.kind {
        TransactionType::Expense => format!("-{}", format_amount(txn.amount)),
        _ => format_amount(txn.amount),
    };
    vec![
        format_date(txn.date),
        txn.description.clone(),
        txn.category.clone(),
        txn.kind.to_string(),
        amount,
        txn.method.clone(),
    ]
}

pub fn label_rows(totals: &[LabelTotal]) -> Vec<Vec<String>> {
    totals
        .iter()
        .map(|row| vec![row.label.clone(), format_amount(row.amount)])
        .collect()
}

/// Left-aligned text table with a dashed rule under the header.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_line(&cells, &widths));
    }
    lines
}

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn amounts_use_two_decimals() {
        assert_eq!(format_amount(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35");
        assert_eq!(Formatter::plain().money(Decimal::new(-250, 2)), "-2.50");
    }

    #[test]
    fn expenses_render_negative() {
        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "Lunch",
            "Dining",
            TransactionType::Expense,
            Decimal::new(1250, 2),
            "Card",
        );
        let row = transaction_row(&txn);
        assert_eq!(row[0], "10/01/2024");
        assert_eq!(row[4], "-12.50");
    }

    #[test]
    fn table_columns_align() {
        let lines = render_table(
            &["Name", "Amount"],
            &[
                vec!["Rent".into(), "900.00".into()],
                vec!["Groceries".into(), "80.00".into()],
            ],
        );
        assert_eq!(lines[0], "Name       Amount");
        assert_eq!(lines[1], "---------  ------");
        assert_eq!(lines[2], "Rent       900.00");
        assert_eq!(lines[3], "Groceries  80.00");
    }
}
