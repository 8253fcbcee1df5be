//! Locale-aware number formatting for calculator results.

use crate::i18n::Locale;

/// Format a number with a fixed number of decimals using the locale's
/// decimal and digit-group separators.
///
/// Non-finite values are rendered as an empty string; calculators are
/// expected to mark such results invalid instead of displaying them.
pub fn format_number(value: f64, decimals: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let config = locale.config();
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);

    // "-0.00" reads as noise; only keep the sign when a digit survives rounding
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }

    let len = integer.len();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(config.group_separator);
        }
        out.push(digit);
    }

    if let Some(fraction) = fraction {
        out.push(config.decimal_separator);
        out.push_str(fraction);
    }

    out
}

/// Parse a user-entered number, accepting the locale's decimal separator.
///
/// A dot is always read as the decimal point, so "1.234" is 1.234 in every
/// locale. Group separators are not accepted.
pub fn parse_number(raw: &str, locale: Locale) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return value.is_finite().then_some(value);
    }

    let separator = locale.config().decimal_separator;
    if separator != '.' && trimmed.matches(separator).count() == 1 && !trimmed.contains('.') {
        let normalized = trimmed.replace(separator, ".");
        return normalized.parse::<f64>().ok().filter(|v| v.is_finite());
    }

    None
}
