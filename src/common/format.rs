//! Number formatting for popups, tables and legend labels.

use serde::{Deserialize, Serialize};

/// Separators used for locale-grouped numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub group: String,
    pub decimal: String,
}

impl Default for NumberLocale {
    /// pt-BR: `1.234.567,89`
    fn default() -> Self {
        Self { group: ".".to_string(), decimal: ",".to_string() }
    }
}

/// Maximum number of fraction digits kept by [`format_grouped`].
const MAX_FRACTION_DIGITS: usize = 3;

/// Format with thousands grouping and at most three fraction digits,
/// dropping trailing zeros (`1234.5` -> `1.234,5` in pt-BR).
pub fn format_grouped(value: f64, locale: &NumberLocale) -> String {
    if !value.is_finite() { return value.to_string() }

    let text = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    if negative { out.push('-') }

    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 { out.push_str(&locale.group) }
        out.push(digit);
    }

    if !frac_part.is_empty() {
        out.push_str(&locale.decimal);
        out.push_str(frac_part);
    }

    out
}

/// Format with a fixed number of decimals and a plain `.` separator.
#[inline]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}
