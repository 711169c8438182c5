//! Date rendering for profile fields.
//!
//! The API sends dates as plain strings. They are parsed leniently and
//! rendered in the configured locale; anything absent or unparseable shows
//! the placeholder instead.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Shown for every absent optional profile value
pub const PLACEHOLDER: &str = "غير متوفر";

const AR_SY_MONTHS: [&str; 12] = [
    "كانون الثاني",
    "شباط",
    "آذار",
    "نيسان",
    "أيار",
    "حزيران",
    "تموز",
    "آب",
    "أيلول",
    "تشرين الأول",
    "تشرين الثاني",
    "كانون الأول",
];

const EN_MONTHS: [&str; 12] = [
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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateLocale {
    /// Syrian Arabic: `١٥ آذار ٢٠٢٠`
    #[default]
    ArSy,
    /// English: `March 15, 2020`
    En,
}

impl FromStr for DateLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "ar" | "ar-sy" => Ok(DateLocale::ArSy),
            "en" | "en-us" | "en-gb" => Ok(DateLocale::En),
            other => Err(format!("unsupported date locale: {other}")),
        }
    }
}

/// Parse `YYYY-MM-DD`, RFC 3339 or `YYYY-MM-DD HH:MM:SS`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Render an optional raw date, falling back to [`PLACEHOLDER`]
pub fn format_date(raw: Option<&str>, locale: DateLocale) -> String {
    match raw.and_then(parse_date) {
        Some(date) => render(date, locale),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn render(date: NaiveDate, locale: DateLocale) -> String {
    let month = date.month0() as usize;
    match locale {
        DateLocale::ArSy => format!(
            "{} {} {}",
            arabic_digits(&date.day().to_string()),
            AR_SY_MONTHS[month],
            arabic_digits(&date.year().to_string())
        ),
        DateLocale::En => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
    }
}

/// Replace ASCII digits with Arabic-Indic digits
fn arabic_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}
