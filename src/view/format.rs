//! Pure conversions from raw service values into display-safe strings.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

pub const MISSING_TEXT: &str = "N/A";
pub const UNKNOWN_NAME: &str = "Unknown";
pub const INVALID_DATE: &str = "Invalid Date";

/// Escape text for insertion into the rendering surface.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Inverse of [`escape_html`], used to recover the visible text of a cell.
pub fn unescape_html(markup: &str) -> String {
    markup
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Group thousands with commas: `25000` becomes `25,000`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Average members per channel, rounded to a whole number.
pub fn round_average(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

/// Parse a displayed counter back into its value, ignoring grouping separators.
pub fn parse_display_count(text: &str) -> u64 {
    text.trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == ',')
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

/// Short date in the default (en-US) locale style, e.g. `1/15/2024`.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return MISSING_TEXT.to_string();
    };

    match parse_timestamp(raw) {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local).date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(parsed.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `min(value / max * 100, 100)`, always within `[0, 100]`.
pub fn progress_percent(value: u64, max: u64) -> f64 {
    if max == 0 {
        return if value > 0 { 100.0 } else { 0.0 };
    }
    (value as f64 / max as f64 * 100.0).clamp(0.0, 100.0)
}

pub fn format_percent(percent: f64) -> String {
    format!("{}%", (percent * 100.0).round() / 100.0)
}
