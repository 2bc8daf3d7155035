//! Step-by-step entry form for the interactive shell.

use cashbook_domain::{Configuration, NewTransaction};
use chrono::NaiveDate;
use dialoguer::{theme::Theme, Input, Select};
use rust_decimal::Decimal;

use crate::cli::error::CommandError;
use crate::cli::input::{parse_amount, parse_date};

/// Asks for each field in turn. Returns `None` when a pick list is dismissed.
pub fn record_wizard(
    theme: &dyn Theme,
    config: &Configuration,
    today: NaiveDate,
) -> Result<Option<NewTransaction>, CommandError> {
    let description: String = Input::with_theme(theme)
        .with_prompt("Description")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Description cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let amount_text: String = Input::with_theme(theme)
        .with_prompt("Amount")
        .validate_with(|input: &String| -> Result<(), String> {
            match parse_amount(input) {
                Ok(amount) if amount > Decimal::ZERO => Ok(()),
                Ok(_) => Err("Amount must be greater than zero".into()),
                Err(err) => Err(err.to_string()),
            }
        })
        .interact_text()?;
    let amount = parse_amount(&amount_text)?;

    let Some(kind) = pick(theme, "Type", &config.transaction_types)? else {
        return Ok(None);
    };
    let Some(method) = pick(theme, "Payment method", &config.payment_methods)? else {
        return Ok(None);
    };
    let Some(category) = pick(theme, "Category", &config.all_categories)? else {
        return Ok(None);
    };

    let date_text: String = Input::with_theme(theme)
        .with_prompt("Date")
        .default("today".to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_date(input, today).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    let date = parse_date(&date_text, today)?;

    Ok(Some(NewTransaction {
        date,
        description: description.trim().to_string(),
        category,
        kind,
        amount,
        method,
    }))
}

fn pick(theme: &dyn Theme, prompt: &str, options: &[String]) -> Result<Option<String>, CommandError> {
    if options.is_empty() {
        return Err(CommandError::Message(format!(
            "the workbook configuration lists no values for {prompt}"
        )));
    }
    let choice = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact_opt()?;
    Ok(choice.and_then(|index| options.get(index).cloned()))
}
