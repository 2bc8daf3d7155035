use cashbook_domain::CategoryGroup;

use super::usage;
use crate::cli::context::ShellContext;
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

const SETTINGS_USAGE: &str = "settings [show | path | set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show categories, payment methods and types from the workbook",
            "config",
            cmd_config,
        ),
        CommandEntry::new(
            "settings",
            "Show or change local settings",
            SETTINGS_USAGE,
            cmd_settings,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage("config"));
    }
    let config = context.service.configuration()?;
    let fmt = &context.formatter;
    fmt.print_header("Configuration");
    let mut rows: Vec<(&str, String)> = CategoryGroup::ALL
        .iter()
        .map(|group| (group.label(), config.category_groups.group(*group).join(", ")))
        .collect();
    rows.push(("Methods", config.payment_methods.join(", ")));
    rows.push(("Types", config.transaction_types.join(", ")));
    rows.push(("Workbook", context.workbook_path().display().to_string()));
    fmt.print_two_column(&rows);
    Ok(())
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            let settings = context.settings();
            let rows: Vec<(&str, String)> = cashbook_config::Settings::KEYS
                .iter()
                .map(|key| (*key, settings.get(key).unwrap_or_default()))
                .collect();
            context.formatter.print_header("Settings");
            context.formatter.print_two_column(&rows);
            context.formatter.print_two_column(&[(
                "(workbook)",
                context.workbook_path().display().to_string(),
            )]);
            Ok(())
        }
        ["path"] => {
            context
                .formatter
                .print_info(context.settings_manager.settings_path().display());
            Ok(())
        }
        ["set", key, value] => {
            let mut updated = context.settings.clone();
            updated.set(key, value)?;
            context.replace_settings(updated)?;
            context
                .formatter
                .print_success(format!("`{key}` updated."));
            Ok(())
        }
        _ => Err(usage(SETTINGS_USAGE)),
    }
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    context
        .formatter
        .print_header(format!("Cashbook {}", meta.version));
    context.formatter.print_two_column(&meta.rows());
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fmt = context.formatter;
    if let Some(name) = args.first() {
        let entry = context
            .registry
            .get(&name.to_lowercase())
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        fmt.print_header(entry.name);
        fmt.print_info(entry.description);
        fmt.print_info(format!("Usage: {}", entry.usage));
        return Ok(());
    }

    fmt.print_header("Available commands");
    let rows: Vec<(&str, String)> = context
        .registry
        .list()
        .into_iter()
        .map(|entry| (entry.name, entry.description.to_string()))
        .collect();
    fmt.print_two_column(&rows);
    fmt.print_hint("Type `help <command>` for usage details.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
