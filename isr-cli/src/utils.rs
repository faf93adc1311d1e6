use isr_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned when a yes/no column holds something else.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid flag '{0}', expected true/false, yes/no, si/no or 1/0")]
pub struct ParseFlagError(pub String);

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().trim_start_matches('$').replace(',', "")
}

/// Parses an amount into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"10,000.50"`) and a leading
/// `$`. Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a yes/no value. Empty input is `false`.
pub fn parse_flag(s: &str) -> Result<bool, ParseFlagError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "si" | "sí" | "1" => Ok(true),
        _ => Err(ParseFlagError(s.to_string())),
    }
}

/// Formats an amount rounded to cents with thousands separators, e.g. `9,270.98`.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Formats a percentage with two decimals, e.g. `10.88%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}
