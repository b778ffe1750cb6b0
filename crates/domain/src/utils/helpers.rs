//! Numeric and formatting helpers
//!
//! Rounding and currency formatting are part of the observable contract:
//! flag messages and scenario amounts must reproduce these exactly.

use chrono::{SecondsFormat, Utc};

/// Round to 1 decimal place (used for PO ratios)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to 2 decimal places (used for percentages and scenario amounts)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` over `whole`, 0 when `whole` is 0
pub fn calculate_percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole) * 100.0
}

/// Format as currency with two decimals, e.g. `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("${sign}{}.{:02}", group_thousands(abs / 100), abs % 100)
}

/// Format as whole-dollar currency, e.g. `$1,234`
pub fn format_currency_whole(amount: f64) -> String {
    let dollars = amount.round() as i64;
    let sign = if dollars < 0 { "-" } else { "" };
    format!("${sign}{}", group_thousands(dollars.abs()))
}

/// Current UTC timestamp in ISO-8601 with a `Z` suffix
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
