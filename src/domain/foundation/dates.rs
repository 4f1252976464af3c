//! Date formatting and parsing helpers.
//!
//! Display formats match the editor conventions: "Mar 5, 2025" for dates,
//! the same plus a 12-hour clock for timestamps, and a relative phrase
//! ("Today", "in 3 weeks", "2 months ago") for target-date proximity.

use chrono::{NaiveDate, Utc};

use super::Timestamp;

/// Formats a calendar date as "Mon D, YYYY".
///
/// `None` renders as "Not set".
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "Not set".to_string(),
    }
}

/// Formats a timestamp as "Mon D, YYYY h:mm AM/PM".
pub fn format_date_time(ts: &Timestamp) -> String {
    ts.as_datetime().format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Formats a date for input fields as "YYYY-MM-DD".
///
/// `None` renders as the empty string.
pub fn format_for_input(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Returns the number of whole days from today until `date`.
///
/// Negative when the date is in the past; zero when the date is absent.
pub fn days_until(date: Option<NaiveDate>) -> i64 {
    days_until_at(date, Utc::now().date_naive())
}

/// Day difference evaluated against an explicit "today".
pub fn days_until_at(date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match date {
        Some(d) => (d - today).num_days(),
        None => 0,
    }
}

/// Returns a relative phrase for a date compared with today.
pub fn relative_time(date: Option<NaiveDate>) -> String {
    relative_time_at(date, Utc::now().date_naive())
}

/// Relative phrase evaluated against an explicit "today".
///
/// Escalates days to weeks at 7, weeks to months at 4 weeks, months to
/// years at 12 months, with singular/plural suffixing throughout.
pub fn relative_time_at(date: Option<NaiveDate>, today: NaiveDate) -> String {
    let date = match date {
        Some(d) => d,
        None => return String::new(),
    };
    let diff_days = (date - today).num_days();
    let abs_days = diff_days.abs();

    match diff_days {
        0 => return "Today".to_string(),
        1 => return "Tomorrow".to_string(),
        -1 => return "Yesterday".to_string(),
        _ => {}
    }

    if abs_days < 7 {
        return phrase(abs_days, "day", diff_days > 0);
    }

    let weeks = abs_days / 7;
    if weeks < 4 {
        return phrase(weeks, "week", diff_days > 0);
    }

    let months = abs_days / 30;
    if months < 12 {
        return phrase(months, "month", diff_days > 0);
    }

    let years = abs_days / 365;
    phrase(years, "year", diff_days > 0)
}

fn phrase(count: i64, unit: &str, future: bool) -> String {
    let suffix = if count > 1 { "s" } else { "" };
    if future {
        format!("in {} {}{}", count, unit, suffix)
    } else {
        format!("{} {}{} ago", count, unit, suffix)
    }
}

/// Parses a date cell leniently.
///
/// Tries ISO "YYYY-MM-DD" first, then "MM/DD/YYYY" and "Mon D, YYYY"
/// (abbreviated or full month name). Unparseable input yields `None`.
pub fn parse_flexible(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Some(date);
        }
    }

    // Timestamp strings ("2025-01-15T10:30:00Z") carry a usable date.
    chrono::DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.date_naive())
}

/// True when the date lies strictly before today.
pub fn is_past(date: Option<NaiveDate>) -> bool {
    match date {
        Some(d) => d < Utc::now().date_naive(),
        None => false,
    }
}
