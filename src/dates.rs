//! Date formats used by forms, tables and the CSV export.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The format used by `<input type="date">` and query strings, e.g. "2024-03-15".
pub const ISO_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The format shown to users, e.g. "15/03/2024".
pub const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]/[month]/[year]");

/// Parse an ISO date, treating blank or malformed text as no date.
pub fn parse_iso_date(text: &str) -> Option<Date> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    Date::parse(text, ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT).unwrap_or_else(|error| {
        tracing::error!("Could not format {date} as an ISO date: {error}");
        date.to_string()
    })
}

/// Format `date` as dd/mm/yyyy.
pub fn format_display_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT).unwrap_or_else(|error| {
        tracing::error!("Could not format {date} for display: {error}");
        date.to_string()
    })
}
