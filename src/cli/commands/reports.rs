use cashbook_core::TransactionFilter;
use cashbook_domain::{ScheduledTotal, Summary, Transaction};
use chrono::NaiveDate;

use super::usage;
use crate::cli::context::ShellContext;
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::input::{parse_count, parse_date};
use crate::cli::output::{
    format_amount, format_date, label_rows, transaction_row, TRANSACTION_HEADERS,
};
use crate::cli::registry::CommandEntry;

const LIST_USAGE: &str =
    "list [--type <type>]... [--category <category>]... [--from <date>] [--to <date>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show realized balance and upcoming cash flow",
            "summary [date]",
            cmd_summary,
        ),
        CommandEntry::new(
            "recent",
            "Show the most recently recorded entries",
            "recent [count]",
            cmd_recent,
        ),
        CommandEntry::new(
            "history",
            "Show the latest realized entries by date",
            "history [count]",
            cmd_history,
        ),
        CommandEntry::new(
            "list",
            "List entries by type, category and date range",
            LIST_USAGE,
            cmd_list,
        ),
        CommandEntry::new(
            "overview",
            "Show all-time totals by category and payment method",
            "overview",
            cmd_overview,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let summary = match args {
        [] => context.service.today_summary()?,
        [date] => {
            let today = context.service.today();
            context.service.get_summary(parse_date(date, today)?)?
        }
        _ => return Err(usage("summary [date]")),
    };
    print_summary(context, &summary);
    Ok(())
}

fn print_summary(context: &ShellContext, summary: &Summary) {
    let fmt = &context.formatter;
    fmt.print_header(format!("Summary for {}", format_date(summary.today)));
    let window = summary
        .upcoming_window
        .map(|range| format!("{} to {}", format_date(range.start), format_date(range.end)))
        .unwrap_or_else(|| "none".into());
    fmt.print_two_column(&[
        ("Realized income", format_amount(summary.realized_income)),
        ("Realized expense", format_amount(summary.realized_expense)),
        ("Balance", fmt.money(summary.realized_balance)),
        ("Upcoming window", window),
        ("Upcoming income", format_amount(summary.upcoming_income)),
        ("Upcoming expense", format_amount(summary.upcoming_expense)),
        ("Next income", scheduled(summary.next_income)),
        ("Next expense", scheduled(summary.next_expense)),
        ("Last entry", last_entry(summary.last_realized.as_ref())),
    ]);
}

fn scheduled(total: Option<ScheduledTotal>) -> String {
    total
        .map(|total| format!("{} on {}", format_amount(total.amount), format_date(total.date)))
        .unwrap_or_else(|| "none scheduled".into())
}

fn last_entry(txn: Option<&Transaction>) -> String {
    txn.map(|txn| {
        format!(
            "{} ({} {}) on {}",
            txn.description,
            txn.kind,
            format_amount(txn.amount),
            format_date(txn.date)
        )
    })
    .unwrap_or_else(|| "none".into())
}

fn count_arg(context: &ShellContext, args: &[&str], usage_text: &str) -> Result<usize, CommandError> {
    match args {
        [] => Ok(context.settings.recent_limit),
        [raw] => parse_count(raw),
        _ => Err(usage(usage_text)),
    }
}

fn cmd_recent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let n = count_arg(context, args, "recent [count]")?;
    let entries = context.service.list_recent(n)?;
    print_entries(context, "Recent entries", &entries);
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let n = count_arg(context, args, "history [count]")?;
    let today = context.service.today();
    let entries = context.service.realized_history(today, n)?;
    print_entries(context, "Realized history", &entries);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = parse_filter(args, context.service.today())?;
    let entries = context.service.list_filtered(&filter)?;
    print_entries(context, "Entries", &entries);
    if !entries.is_empty() {
        let totals = context.service.period_totals(&filter)?;
        context.formatter.print_two_column(&[
            ("Income", format_amount(totals.income)),
            ("Expense", format_amount(totals.expense)),
            ("Balance", context.formatter.money(totals.balance)),
        ]);
    }
    Ok(())
}

/// Builds a filter from `--type`, `--category`, `--from` and `--to` flags.
/// Repeated `--type`/`--category` flags widen the set; an open end of the date
/// range is unbounded.
fn parse_filter(args: &[&str], today: NaiveDate) -> Result<TransactionFilter, CommandError> {
    let mut types = Vec::new();
    let mut categories = Vec::new();
    let mut from = None;
    let mut to = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let Some(value) = iter.next() else {
            return Err(usage(LIST_USAGE));
        };
        match *flag {
            "--type" | "-t" => types.push(value.to_string()),
            "--category" | "-c" => categories.push(value.to_string()),
            "--from" => from = Some(parse_date(value, today)?),
            "--to" => to = Some(parse_date(value, today)?),
            _ => return Err(usage(LIST_USAGE)),
        }
    }

    let mut filter = TransactionFilter::new();
    if !types.is_empty() {
        filter = filter.with_types(types);
    }
    if !categories.is_empty() {
        filter = filter.with_categories(categories);
    }
    if from.is_some() || to.is_some() {
        filter = filter.between(
            from.unwrap_or(NaiveDate::MIN),
            to.unwrap_or(NaiveDate::MAX),
        )?;
    }
    Ok(filter)
}

fn cmd_overview(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage("overview"));
    }
    let overview = context.service.overview()?;
    let fmt = &context.formatter;
    fmt.print_header("Overview");
    fmt.print_two_column(&[
        ("Income", format_amount(overview.totals.income)),
        ("Expense", format_amount(overview.totals.expense)),
        ("Balance", fmt.money(overview.totals.balance)),
    ]);
    for (title, rows) in [
        ("Expense by category", &overview.expense_by_category),
        ("Income by category", &overview.income_by_category),
        ("By payment method", &overview.amount_by_method),
    ] {
        if rows.is_empty() {
            continue;
        }
        fmt.print_header(title);
        fmt.print_table(&["Name", "Amount"], &label_rows(rows));
    }
    Ok(())
}

fn print_entries(context: &ShellContext, title: &str, entries: &[Transaction]) {
    let fmt = &context.formatter;
    fmt.print_header(title);
    if entries.is_empty() {
        fmt.print_info("No entries found.");
        return;
    }
    let rows: Vec<_> = entries.iter().map(transaction_row).collect();
    fmt.print_table(&TRANSACTION_HEADERS, &rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashbook_domain::TransactionType;
    use rust_decimal::Decimal;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn entry(date: NaiveDate, category: &str, kind: TransactionType) -> Transaction {
        Transaction::new(date, "x", category, kind, Decimal::ONE, "Card")
    }

    #[test]
    fn filter_flags_combine() {
        let filter = parse_filter(
            &["--type", "Expense", "-c", "Rent", "-c", "Dining", "--from", "2024-01-10"],
            day(6, 1),
        )
        .unwrap();

        assert!(filter.matches(&entry(day(1, 10), "Rent", TransactionType::Expense)));
        assert!(filter.matches(&entry(day(3, 1), "Dining", TransactionType::Expense)));
        assert!(!filter.matches(&entry(day(1, 9), "Rent", TransactionType::Expense)));
        assert!(!filter.matches(&entry(day(2, 1), "Rent", TransactionType::Income)));
        assert!(!filter.matches(&entry(day(2, 1), "Stocks", TransactionType::Expense)));
    }

    #[test]
    fn filter_rejects_dangling_and_inverted_input() {
        assert!(matches!(
            parse_filter(&["--type"], day(1, 1)),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_filter(&["--color", "red"], day(1, 1)),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_filter(&["--from", "2024-02-01", "--to", "2024-01-01"], day(1, 1)),
            Err(CommandError::Filter(_))
        ));
    }
}
