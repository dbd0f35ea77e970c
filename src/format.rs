//! Display Formatting
//!
//! Helpers the screens use to render timestamps, counters and sizes, plus
//! input validation for the login form.

use std::sync::LazyLock;

use chrono::{DateTime, Local, TimeZone, Utc};
use regex::Regex;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("phone pattern compiles"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Format a millisecond Unix timestamp in local time.
///
/// `pattern` understands `YYYY`, `MM`, `DD`, `HH`, `mm` and `ss`; each token
/// is replaced once, left to right. Returns `None` for out-of-range timestamps.
pub fn format_time(timestamp_ms: i64, pattern: &str) -> Option<String> {
    let local = Local.timestamp_millis_opt(timestamp_ms).single()?;
    Some(
        pattern
            .replacen("YYYY", &local.format("%Y").to_string(), 1)
            .replacen("MM", &local.format("%m").to_string(), 1)
            .replacen("DD", &local.format("%d").to_string(), 1)
            .replacen("HH", &local.format("%H").to_string(), 1)
            .replacen("mm", &local.format("%M").to_string(), 1)
            .replacen("ss", &local.format("%S").to_string(), 1),
    )
}

/// Default pattern of [`format_time`]
pub const DEFAULT_TIME_PATTERN: &str = "YYYY-MM-DD HH:mm:ss";

/// Human-readable distance from `then` to `now` ("just now", "3 hours ago", ...)
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let diff = (now - then).num_seconds();

    let (amount, unit) = if diff < MINUTE {
        return "just now".to_string();
    } else if diff < HOUR {
        (diff / MINUTE, "minute")
    } else if diff < DAY {
        (diff / HOUR, "hour")
    } else if diff < WEEK {
        (diff / DAY, "day")
    } else if diff < MONTH {
        (diff / WEEK, "week")
    } else if diff < YEAR {
        (diff / MONTH, "month")
    } else {
        (diff / YEAR, "year")
    };

    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

/// Insert thousands separators: `1234567` -> `"1,234,567"`
pub fn format_number(num: i64) -> String {
    let digits = num.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if num < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Byte count with a binary unit and up to two decimals: `1536` -> `"1.5 KB"`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Compact counter for likes and comments.
///
/// Below 1000 the number is shown as is; then `K` (thousands), `W` (ten
/// thousands) and `Y` (hundred millions), each with one decimal.
pub fn format_count(count: u64) -> String {
    let c = count as f64;
    if count < 1_000 {
        count.to_string()
    } else if count < 10_000 {
        format!("{:.1}K", c / 1_000.0)
    } else if count < 100_000_000 {
        format!("{:.1}W", c / 10_000.0)
    } else {
        format!("{:.1}Y", c / 100_000_000.0)
    }
}

/// Mainland mobile number: `1`, then `3`-`9`, then nine digits
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Loose `local@domain.tld` check with a 2+ letter TLD
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
