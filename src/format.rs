//! Display formatting for amounts and rates.
//!
//! Rendering is presentation-only: values are rounded to two fractional
//! digits for display while the underlying `Decimal` keeps full precision.
//! Separators come from the injected [`NumberFormat`] rather than
//! process-wide locale state.

use rust_decimal::Decimal;

use crate::config::NumberFormat;

/// Render a value with exactly two fractional digits and optional thousands
/// grouping, e.g. `1234.5` -> `"1,234.50"`.
pub fn format_amount(value: Decimal, format: &NumberFormat) -> String {
    let rounded = value.round_dp(2);
    let text = rounded.to_string();

    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

    // round_dp(2) leaves at most two fractional digits; pad the rest.
    let mut frac = frac_part.to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    let int_grouped = if format.grouping {
        group_digits(int_part, &format.group_separator)
    } else {
        int_part.to_string()
    };

    format!("{sign}{int_grouped}{}{frac}", format.decimal_separator)
}

/// Insert the group separator every three digits, counting from the right.
fn group_digits(digits: &str, separator: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 3 == offset {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }
    grouped
}
