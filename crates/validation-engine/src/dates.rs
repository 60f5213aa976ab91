//! Date-token parsing for commission expiry and execution dates

use chrono::NaiveDate;

/// Formats accepted for date tokens found in document text, tried in order.
/// Two-digit-year formats come first: `%y` reads at most two digits and
/// rejects four-digit years via trailing input, while `%Y` would happily
/// read "27" as the year 27.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%Y-%m-%d",
];

/// Parse a matched date token into a `NaiveDate`.
///
/// Returns `None` for tokens that look date-like but do not parse to a real
/// calendar date (e.g. "13/45/2020").
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return Some(date);
        }
    }
    // Month names are matched case-insensitively upstream; normalize
    // capitalization ("march 15, 2027" -> "March 15, 2027") and retry.
    let normalized = capitalize_first(token);
    for format in &["%B %d, %Y", "%B %d %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            return Some(date);
        }
    }
    None
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
