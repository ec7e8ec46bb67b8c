//! Decimal conversion between currencies.
//!
//! All arithmetic is exact decimal over the fetched EUR-based table; rates
//! and amounts never pass through binary floating point. Failures are a
//! tagged error whose display strings are exactly what the user sees in the
//! result row.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::error;

use crate::currencies;
use crate::rates::{self, RateSource};

/// A successful conversion: the snapshot date and the unrounded amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub date: String,
    pub amount: Decimal,
}

/// User-visible conversion failures.
///
/// These are rendered directly as result rows; only [`RatesUnavailable`]
/// corresponds to a logged system error.
///
/// [`RatesUnavailable`]: ConvertError::RatesUnavailable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Code not in the built-in allow-list.
    #[error("Currency not supported: {0}")]
    Unsupported(String),

    /// The rate fetch failed; fatal for this request only.
    #[error("Error fetching rates")]
    RatesUnavailable,

    /// Amount parsed to exactly zero.
    #[error("Warning - amount entered must be greater than zero")]
    ZeroAmount,

    /// Code passed the allow-list but is missing from the fetched table.
    #[error("Invalid currency code")]
    UnknownRate,

    /// Amount did not parse, or the arithmetic itself failed.
    #[error("Conversion error: {0}")]
    Arithmetic(String),
}

/// Convert `amount` (a decimal string) from `from` to `to`.
///
/// Checks run in a fixed order: allow-list (source before destination), rate
/// fetch, amount parse and zero check, then the arithmetic itself. The
/// returned amount is unrounded; rounding happens at display time.
pub fn convert<S: RateSource>(
    source: &S,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<Converted, ConvertError> {
    let from_lower = from.to_lowercase();
    let to_lower = to.to_lowercase();

    if !currencies::is_allowed(&from_lower) {
        return Err(ConvertError::Unsupported(from.to_string()));
    }
    if !currencies::is_allowed(&to_lower) {
        return Err(ConvertError::Unsupported(to.to_string()));
    }

    let snapshot = source.fetch().map_err(|e| {
        error!(error = %e, "failed to fetch rates");
        ConvertError::RatesUnavailable
    })?;

    let amount = parse_amount(amount)?;
    if amount.is_zero() {
        return Err(ConvertError::ZeroAmount);
    }

    let converted = if from_lower == "eur" {
        let rate = lookup(&snapshot, &to_lower)?;
        checked_mul(amount, rate)?
    } else if to_lower == "eur" {
        let rate = lookup(&snapshot, &from_lower)?;
        checked_div(amount, rate)?
    } else {
        // Cross-rate via EUR; the source rate is resolved first so a miss
        // there is the one reported.
        let from_rate = lookup(&snapshot, &from_lower)?;
        let to_rate = lookup(&snapshot, &to_lower)?;
        checked_mul(checked_div(amount, from_rate)?, to_rate)?
    };

    Ok(Converted {
        date: snapshot.date,
        amount: converted,
    })
}

/// Parse an amount the way the rates are parsed: plain or scientific decimal.
pub fn parse_amount(s: &str) -> Result<Decimal, ConvertError> {
    rates::parse_decimal(s.trim())
        .ok_or_else(|| ConvertError::Arithmetic(format!("invalid decimal '{}'", s.trim())))
}

fn lookup(snapshot: &crate::rates::RateSnapshot, code: &str) -> Result<Decimal, ConvertError> {
    snapshot.rate(code).ok_or(ConvertError::UnknownRate)
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, ConvertError> {
    a.checked_mul(b)
        .ok_or_else(|| ConvertError::Arithmetic("amount out of range".to_string()))
}

fn checked_div(a: Decimal, b: Decimal) -> Result<Decimal, ConvertError> {
    a.checked_div(b)
        .ok_or_else(|| ConvertError::Arithmetic("rate is zero or out of range".to_string()))
}
