//! Lenient coercion of sheet cells into typed values.
//!
//! Every function here is total: unparseable input becomes absent (or
//! `false` for flags) and is reported at debug level.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const TRUTHY: [&str; 8] = ["1", "1.0", "true", "yes", "y", "x", "checked", "sim"];

/// Trims text and treats blank or placeholder cells as absent.
pub fn text(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("null")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses a currency amount such as `"$1,250.00"` or `"1e3"`.
pub fn amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("USD")
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let parsed = Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned));
    match parsed {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(event = "coerce_failed", kind = "amount", raw);
            None
        }
    }
}

/// Parses a calendar date in ISO or US form, with or without a time part.
pub fn date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or(trimmed);
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok());
    if parsed.is_none() {
        debug!(event = "coerce_failed", kind = "date", raw);
    }
    parsed
}

/// Interprets a checkbox-style cell.
pub fn flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    TRUTHY.iter().any(|truthy| truthy.eq_ignore_ascii_case(trimmed))
}
