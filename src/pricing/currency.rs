//! Brazilian-real parsing and formatting for user-typed values.
//!
//! Everything here is lenient: malformed input falls back to a default
//! instead of failing, so an edit can always be applied.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").expect("leading decimal pattern is valid")
});

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("leading integer pattern is valid"));

/// Parse a price such as `"R$ 1.234,56"`.
///
/// Dots are thousands separators and only the last comma is the decimal
/// point; earlier commas are dropped. Anything unparseable, and any negative
/// amount, becomes 0.
pub fn parse_currency(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, 'R' | '$' | '.') && !c.is_whitespace())
        .collect();

    let normalized = match cleaned.rfind(',') {
        Some(idx) => format!("{}.{}", cleaned[..idx].replace(',', ""), &cleaned[idx + 1..]),
        None => cleaned,
    };

    LEADING_DECIMAL
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

fn leading_integer(value: &str) -> Option<i64> {
    LEADING_INTEGER
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse a gram quantity or package weight. Empty, invalid or negative input is 0.
pub fn parse_count(value: &str) -> f64 {
    leading_integer(value).filter(|v| *v > 0).unwrap_or(0) as f64
}

/// Parse an extra's quantity. Empty, invalid or non-positive input is 1.
pub fn parse_extra_quantity(value: &str) -> u32 {
    leading_integer(value)
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(1)
}

/// Format as `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if value < 1000 {
            groups.push(value.to_string());
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups.join(".")
}

/// Prefill text for a numeric field: blank for zero, comma decimals.
pub fn format_number_input(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string().replace('.', ",")
    }
}

/// Prefill text for a price field: always shows cents for whole values.
pub fn format_price_input(value: f64) -> String {
    if value == 0.0 {
        "0,00".to_string()
    } else if value.fract() == 0.0 {
        format!("{},00", value as i64)
    } else {
        value.to_string().replace('.', ",")
    }
}
