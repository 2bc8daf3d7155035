//! Parsing of user-typed values.

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::cli::error::CommandError;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Parses an amount, accepting `,` as the decimal separator (`12,50`).
///
/// Sign is not checked here; the ledger rejects non-positive amounts itself.
pub fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };
    Decimal::from_str(&normalized).map_err(|_| {
        CommandError::InvalidArguments(format!(
            "invalid amount `{raw}` (use digits, e.g. 50.00 or 50,00)"
        ))
    })
}

/// Parses `today`, `tomorrow`, `yesterday`, `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    let trimmed = raw.trim();
    let relative = match trimmed.to_ascii_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_signed(Duration::days(1)),
        "yesterday" => today.checked_sub_signed(Duration::days(1)),
        _ => None,
    };
    if let Some(date) = relative {
        return Ok(date);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "invalid date `{raw}` (expected YYYY-MM-DD, DD/MM/YYYY, today or tomorrow)"
            ))
        })
}

pub fn parse_count(raw: &str) -> Result<usize, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid count `{raw}`")))
}

/// Case-insensitive lookup of `raw` in `options`, returning the configured spelling.
pub fn match_option<'a>(raw: &str, options: &'a [String]) -> Option<&'a str> {
    let needle = raw.trim();
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(needle))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn comma_is_a_decimal_separator() {
        assert_eq!(parse_amount("12,50").unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount(" 7.5 ").unwrap(), Decimal::new(75, 1));
        assert_eq!(parse_amount("-3").unwrap(), Decimal::from(-3));
        assert!(parse_amount("1.000,50").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn relative_and_formatted_dates() {
        let today = day(2024, 12, 31);
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("Tomorrow", today).unwrap(), day(2025, 1, 1));
        assert_eq!(parse_date("yesterday", today).unwrap(), day(2024, 12, 30));
        assert_eq!(parse_date("2024-02-29", today).unwrap(), day(2024, 2, 29));
        assert_eq!(parse_date("05/01/2024", today).unwrap(), day(2024, 1, 5));
        assert!(parse_date("2024-13-01", today).is_err());
    }

    #[test]
    fn options_match_ignoring_case() {
        let options = vec!["Card".to_string(), "Cash".to_string()];
        assert_eq!(match_option("cash", &options), Some("Cash"));
        assert_eq!(match_option("Pix", &options), None);
    }
}
