//! Pure value-to-display-string conversion.
//!
//! Every formatting rule here is deterministic and stateless: the table
//! renderer derives display cells by calling into this module and never
//! edits a formatted string afterwards.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::spec::ColumnKind;

/// Digit grouping rule used by a currency's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// Groups of three (1,234,567).
    Thousands,
    /// Indian notation: one group of three, then groups of two (12,34,567).
    Indian,
}

/// Narrow symbol and grouping rule for the currency codes we know about.
/// Codes outside this table fall back to the code-prefixed rendering.
fn currency_symbol(code: &str) -> Option<(&'static str, Grouping)> {
    match code {
        "INR" => Some(("₹", Grouping::Indian)),
        "USD" => Some(("$", Grouping::Thousands)),
        "EUR" => Some(("€", Grouping::Thousands)),
        "GBP" => Some(("£", Grouping::Thousands)),
        "JPY" => Some(("¥", Grouping::Thousands)),
        "CNY" => Some(("¥", Grouping::Thousands)),
        "AUD" | "CAD" | "SGD" | "HKD" | "NZD" => Some(("$", Grouping::Thousands)),
        _ => None,
    }
}

/// Insert group separators into the integer part of a fixed-point string.
fn group_digits(s: &str, grouping: Grouping) -> String {
    let (int_part, dec_part) = match s.find('.') {
        Some(pos) => (&s[..pos], Some(&s[pos..])),
        None => (s, None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut reversed = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        let boundary = match grouping {
            Grouping::Thousands => i > 0 && i % 3 == 0,
            Grouping::Indian => i == 3 || (i > 3 && (i - 3) % 2 == 0),
        };
        if boundary {
            reversed.push(',');
        }
        reversed.push(c);
    }
    let grouped: String = reversed.chars().rev().collect();

    format!("{}{}{}", sign, grouped, dec_part.unwrap_or(""))
}

/// Format a money amount with the currency's narrow symbol and grouping.
///
/// Currency codes without a known symbol fall back to `"<CODE> <number>"`
/// with plain thousands grouping.
pub fn format_money(amount: f64, precision: usize, currency: &str) -> String {
    let fixed = format!("{amount:.precision$}");
    match currency_symbol(currency) {
        Some((symbol, grouping)) => format!("{}{}", symbol, group_digits(&fixed, grouping)),
        None => format!("{} {}", currency, group_digits(&fixed, Grouping::Thousands)),
    }
}

/// Format a dual-currency (or n-currency) amount list, one line per slot.
///
/// The precision and currency used for slot `i` come from index `i`,
/// clamped to the last available entry when the amount list is longer.
pub fn format_money2(amounts: &[f64], precisions: &[usize], currencies: &[String]) -> String {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            let precision = precisions
                .get(i)
                .or_else(|| precisions.last())
                .copied()
                .unwrap_or(0);
            let currency = currencies
                .get(i)
                .or_else(|| currencies.last())
                .map(String::as_str)
                .unwrap_or("");
            format_money(*amount, precision, currency)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grouped decimal formatting with fixed fraction digits.
pub fn format_number(value: f64, precision: usize) -> String {
    group_digits(&format!("{value:.precision$}"), Grouping::Thousands)
}

/// Multiply by 100, fixed point, append `%`.
pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.precision$}%", value * 100.0)
}

/// Parse a date value and format it as `YYYY-MM-DD`.
///
/// Accepts RFC 3339 datetimes or a `YYYY-MM-DD` prefix. Anything that does
/// not parse formats as the empty string.
pub fn format_date(value: &Value) -> String {
    let Some(text) = value.as_str() else {
        return String::new();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    let prefix = text.get(..10).unwrap_or(text);
    if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    String::new()
}

/// Coerce a raw cell value to a number, accepting numeric strings.
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Raw value as the string used for composite keys and data attributes.
pub(crate) fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Dispatch on the column kind to produce the display string for one cell.
///
/// Type-mismatched row data degrades to an empty or zero-valued rendering
/// instead of failing the render.
pub fn format_cell(kind: &ColumnKind, raw: &Value) -> String {
    match kind {
        ColumnKind::Money {
            precision,
            currency,
        } => format_money(numeric(raw).unwrap_or(0.0), *precision, currency),
        ColumnKind::MoneyPair {
            precisions,
            currencies,
        } => {
            let Some(items) = raw.as_array() else {
                return String::new();
            };
            let amounts: Vec<f64> = items.iter().map(|v| numeric(v).unwrap_or(0.0)).collect();
            format_money2(&amounts, precisions, currencies)
        }
        ColumnKind::Float { precision } => format_number(numeric(raw).unwrap_or(0.0), *precision),
        ColumnKind::ScaledFloat => format_number(numeric(raw).unwrap_or(0.0), 5),
        ColumnKind::Percent { precision } => {
            format_percent(numeric(raw).unwrap_or(0.0), *precision)
        }
        ColumnKind::Date => format_date(raw),
        ColumnKind::Text => value_string(raw),
    }
}
