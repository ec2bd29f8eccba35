//! Fixed dates for deterministic tests.

use chrono::{Duration, NaiveDate};

/// The "today" every fixture is relative to: 2025-03-15.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap_or_default()
}

/// Reference date shifted by `days`; negative values are in the past.
pub fn days_from_reference(days: i64) -> NaiveDate {
    reference_date() + Duration::days(days)
}
