use cashbook_domain::{CategoryGroups, Configuration, NewTransaction};
use cashbook_storage_json::create_workbook;

use super::usage;
use crate::cli::context::{CliMode, ShellContext};
use crate::cli::error::CommandResult;
use crate::cli::input::{match_option, parse_amount, parse_date};
use crate::cli::output::{format_amount, format_date};
use crate::cli::registry::CommandEntry;
use crate::cli::wizard::record_wizard;

const RECORD_USAGE: &str = "record <date> <description> <category> <type> <amount> <method>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "init",
            "Create the workbook with a starter configuration",
            "init",
            cmd_init,
        ),
        CommandEntry::new(
            "record",
            "Record an income or expense entry (no arguments opens a form)",
            RECORD_USAGE,
            cmd_record,
        ),
    ]
}

/// Configuration written by `init`; edit the workbook afterwards to taste.
pub fn starter_configuration() -> Configuration {
    let list = |items: &[&str]| -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    };
    Configuration::new(
        CategoryGroups {
            needs: list(&["Rent", "Groceries", "Utilities", "Transport", "Health"]),
            wants: list(&["Dining", "Leisure", "Shopping"]),
            investments: list(&["Savings", "Stocks"]),
        },
        list(&["Card", "Cash", "Transfer"]),
        list(&["Income", "Expense"]),
    )
}

fn cmd_init(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage("init"));
    }
    create_workbook(context.workbook_path(), &starter_configuration())?;
    context.service.cache().invalidate();
    context.formatter.print_success(format!(
        "Workbook created at {}",
        context.workbook_path().display()
    ));
    Ok(())
}

fn cmd_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = match args {
        [] if context.mode == CliMode::Interactive => {
            let config = context.service.configuration()?;
            let today = context.service.today();
            match record_wizard(&context.theme, &config, today)? {
                Some(fields) => fields,
                None => {
                    context.formatter.print_warning("Entry cancelled.");
                    return Ok(());
                }
            }
        }
        [date, description, category, kind, amount, method] => {
            let today = context.service.today();
            let config = context.service.configuration()?;
            NewTransaction {
                date: parse_date(date, today)?,
                description: description.to_string(),
                category: canonical(category, &config.all_categories),
                kind: canonical(kind, &config.transaction_types),
                amount: parse_amount(amount)?,
                method: canonical(method, &config.payment_methods),
            }
        }
        _ => return Err(usage(RECORD_USAGE)),
    };

    let recorded = context.service.record_transaction(fields)?;
    let group = context
        .service
        .configuration()
        .ok()
        .and_then(|config| config.group_of(&recorded.category))
        .map_or_else(|| "-".to_string(), |group| group.label().to_string());
    context.formatter.print_success("Entry recorded.");
    context.formatter.print_two_column(&[
        ("Description", recorded.description.clone()),
        ("Amount", format_amount(recorded.amount)),
        ("Type", recorded.kind.to_string()),
        ("Method", recorded.method.clone()),
        ("Category", recorded.category.clone()),
        ("Group", group),
        ("Date", format_date(recorded.date)),
    ]);
    Ok(())
}

/// Configured spelling of `raw`, or `raw` itself so validation can reject it.
fn canonical(raw: &str, options: &[String]) -> String {
    match_option(raw, options)
        .map(str::to_string)
        .unwrap_or_else(|| raw.trim().to_string())
}

