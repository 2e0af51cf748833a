//! Amount parsing and formatting
//!
//! Amounts are plain `f64` values. Balances keep full precision and are only
//! rounded to cents when rendered.

use std::fmt;

/// Parse a user-entered amount
///
/// Accepts an optional leading `$` and surrounding whitespace. The result must
/// be finite and strictly positive.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

    if trimmed.is_empty() {
        return Err(AmountError::Missing);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| AmountError::NotANumber(input.trim().to_string()))?;

    check_amount(value)?;
    Ok(value)
}

/// Check an already-numeric amount against the same rules as `parse_amount`
pub fn check_amount(value: f64) -> Result<(), AmountError> {
    if !value.is_finite() {
        return Err(AmountError::NotFinite);
    }
    if value <= 0.0 {
        return Err(AmountError::NotPositive(value));
    }
    Ok(())
}

/// Render an amount as a JavaScript number would print: `20`, `12.5`, `0.1`
///
/// Magnitudes of at least 1e21 or below 1e-6 switch to exponent form with
/// the shortest round-trip mantissa and a signed exponent (`1e+21`, `1e-7`).
pub fn format_plain(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

/// Render an amount rounded to cents with a currency symbol
pub fn format_currency(value: f64, symbol: &str) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded < 0.0 {
        format!("-{}{:.2}", symbol, -rounded)
    } else {
        // -0.00 collapses to 0.00
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Reasons an amount is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum AmountError {
    Missing,
    NotANumber(String),
    NotFinite,
    NotPositive(f64),
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Amount is required"),
            Self::NotANumber(s) => write!(f, "Amount is not a number: '{}'", s),
            Self::NotFinite => write!(f, "Amount must be a finite number"),
            Self::NotPositive(v) => write!(f, "Amount must be greater than zero (got {})", v),
        }
    }
}

impl std::error::Error for AmountError {}
