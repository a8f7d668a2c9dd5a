//! 数值解析
//!
//! Report data keeps every value as a string. Reading it back uses
//! leading-number semantics: the longest numeric prefix wins, and a string
//! without one becomes `NaN`. Values entering the system from the editor or
//! the CLI go through the strict parsers instead and are rejected when they
//! are not numbers.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::ReportError;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("valid regex"));

/// Parse a stored currency value (`parseFloat` semantics)
///
/// `"12.5 €"` → 12.5, `"abc"` → NaN, `""` → NaN.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a stored count value (`parseInt(_, 10)` semantics)
///
/// `"12"` → 12, `"3.9"` → 3, `"x"` → NaN. Returned as `f64` so that NaN can
/// flow through the same sums as currency values.
pub fn parse_int(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return f64::NAN;
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Remove everything that is not a digit, a dot or a minus sign
///
/// Used on spreadsheet cells such as `"1234.50 €"`.
pub fn strip_non_numeric(input: &str) -> String {
    NON_NUMERIC.replace_all(input, "").into_owned()
}

/// Strictly parse a user-entered amount
///
/// Accepts a decimal comma and fr-FR digit grouping (`"1 234,50"`).
/// Rejects empty input, trailing garbage, NaN and infinities.
pub fn parse_amount_strict(input: &str) -> Result<f64, ReportError> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if normalized.is_empty() {
        return Err(ReportError::validation("Amount cannot be empty"));
    }
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ReportError::validation(format!(
            "Invalid amount: '{}'",
            input.trim()
        ))),
    }
}

/// Strictly parse a user-entered count (non-negative integer)
pub fn parse_count_strict(input: &str) -> Result<u64, ReportError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReportError::validation("Count cannot be empty"));
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| ReportError::validation(format!("Invalid count: '{}'", trimmed)))
}
