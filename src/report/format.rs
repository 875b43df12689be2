//! Number formatting for report cells.

use serde_json::Value;

/// Shown wherever a value is missing or not a number.
pub const PLACEHOLDER: &str = "—";

/// Last element of a history to 4 decimals, or [`PLACEHOLDER`].
pub fn format_last(history: Option<&[Value]>) -> String {
    history
        .and_then(<[Value]>::last)
        .and_then(Value::as_f64)
        .map(|value| to_fixed(value, 4))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Precision, recall and F1 use 3 decimals.
pub fn format_score(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_f64)
        .map(|value| to_fixed(value, 3))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Supports are counts: integers print as-is, other numbers get 3 decimals.
pub fn format_support(value: Option<&Value>) -> String {
    match value {
        Some(value) if value.is_u64() || value.is_i64() => value.to_string(),
        other => format_score(other),
    }
}

/// Fixed-point text with the same rounding as JavaScript's `toFixed`: an
/// exact tie rounds away from zero, and `-0.0` prints without a sign.
pub(crate) fn to_fixed(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let text = match exact_tie_prefix(magnitude, digits) {
        Some(prefix) => increment_last_digit(&prefix),
        None => format!("{magnitude:.digits$}"),
    };
    format!("{sign}{text}")
}

/// Truncated `digits`-place text of `magnitude`, if it sits exactly halfway
/// between two such values.
fn exact_tie_prefix(magnitude: f64, digits: usize) -> Option<String> {
    let scaled = magnitude * 10f64.powi(i32::try_from(digits).ok()?);
    if !scaled.is_finite() || (scaled.fract() - 0.5).abs() > 1e-6 {
        return None;
    }
    // f64 values have at most 1074 fractional digits, so this expansion is exact.
    let exact = format!("{magnitude:.1100}");
    let point = exact.find('.')?;
    let cut = point + 1 + digits;
    let mut tail = exact[cut..].chars();
    if tail.next() != Some('5') || !tail.all(|digit| digit == '0') {
        return None;
    }
    let end = if digits == 0 { point } else { cut };
    Some(exact[..end].to_string())
}

fn increment_last_digit(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();
    for idx in (0..bytes.len()).rev() {
        match bytes[idx] {
            b'.' => continue,
            b'9' => bytes[idx] = b'0',
            digit => {
                bytes[idx] = digit + 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}
