//! Display locale.
//!
//! Locale is explicit configuration passed to whoever renders text. Nothing
//! in the engine reads process-wide locale state.

use chrono::{Datelike, NaiveDate};

/// Language used for display text.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pipeline_hygiene_core::Locale;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
/// assert_eq!(Locale::Portuguese.format_month_year(date), "Março de 2025");
/// assert_eq!(Locale::English.format_month_year(date), "March 2025");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Locale {
    /// Brazilian Portuguese.
    #[default]
    Portuguese,
    /// English.
    English,
}

const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Locale {
    /// Returns the month name for a 1-based month number.
    ///
    /// Out-of-range months yield an empty string.
    pub fn month_name(self, month: u32) -> &'static str {
        let names = match self {
            Locale::Portuguese => &MONTHS_PT,
            Locale::English => &MONTHS_EN,
        };
        month
            .checked_sub(1)
            .and_then(|idx| names.get(idx as usize))
            .copied()
            .unwrap_or("")
    }

    /// Formats a date as "month year" the way report subjects print it.
    pub fn format_month_year(self, date: NaiveDate) -> String {
        let month = self.month_name(date.month());
        match self {
            Locale::Portuguese => format!("{} de {}", month, date.year()),
            Locale::English => format!("{} {}", month, date.year()),
        }
    }

    /// Formats a calendar date in the locale's numeric convention.
    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            Locale::Portuguese => date.format("%d/%m/%Y").to_string(),
            Locale::English => date.format("%m/%d/%Y").to_string(),
        }
    }

    /// Placeholder used when a contact or partner name is missing.
    pub fn unnamed_partner(self) -> &'static str {
        match self {
            Locale::Portuguese => "Parceiro",
            Locale::English => "Partner",
        }
    }
}
