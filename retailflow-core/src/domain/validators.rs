// retailflow-core/src/domain/validators.rs
//
// Pure per-record predicates. No side effects, no normalization.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn re_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// `local@domain.tld` shape check. Missing or empty input is invalid.
pub fn is_valid_email(value: Option<&str>) -> bool {
    match value {
        None | Some("") => false,
        Some(email) => re_email().is_match(email),
    }
}

/// True iff the value is an existing calendar date written exactly as `YYYY-MM-DD`.
pub fn is_valid_date(value: Option<&str>) -> bool {
    value.and_then(parse_date).is_some()
}

/// Strict `YYYY-MM-DD` parser: zero-padded, four-digit year, real calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Integer coercion. Accepts `42` as well as an integral float such as `42.0`.
pub fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Decimal coercion. Non-numeric text, NaN and infinities coerce to `None`.
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
}
