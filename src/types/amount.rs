//! Monetary amount utilities.
//!
//! ## Overview
//!
//! Every balance, donation and allocation is a [`Decimal`]. Floating-point
//! arithmetic drifts when funds are drained and refilled many times, which
//! breaks balance conservation, so nothing here touches `f64`.
//!
//! ## Examples
//!
//! ```
//! use fund_matcher::types::amount::{parse_amount, format_amount};
//!
//! let amount = parse_amount("130.5").unwrap();
//! assert_eq!(format_amount(amount), "130.50");
//!
//! assert!(parse_amount("500g").is_err());
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{MatchError, Result};

/// Decimal places shown by [`format_amount`].
pub const DISPLAY_SCALE: u32 = 2;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a textual amount into a non-negative [`Decimal`].
///
/// Surrounding whitespace is ignored. Scientific notation is accepted
/// (`"1e3"`), negative values are not.
///
/// # Errors
///
/// [`MatchError::InvalidAmount`] if the text is not numeric or is negative.
///
/// # Example
///
/// ```
/// use fund_matcher::types::amount::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("100").unwrap(), Decimal::from(100));
/// assert!(parse_amount("-1").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| MatchError::InvalidAmount(s.to_string()))?;
    non_negative(value)
}

/// Reject negative amounts.
pub fn non_negative(value: Decimal) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MatchError::InvalidAmount(value.to_string()));
    }
    Ok(value)
}

/// Format an amount with two decimal places.
///
/// # Example
///
/// ```
/// use fund_matcher::types::amount::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::from(50)), "50.00");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", DISPLAY_SCALE as usize, rounded)
}

/// Compare two amounts with a tolerance.
///
/// Ratio conversions that do not divide evenly leave residue in the last
/// decimal places; use this when asserting conservation.
pub fn approx_eq(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_basic() {
        assert_eq!(parse_amount("1").unwrap(), dec!(1));
        assert_eq!(parse_amount("0.5").unwrap(), dec!(0.5));
        assert_eq!(parse_amount(" 25000.00 ").unwrap(), dec!(25000));
        assert_eq!(parse_amount("1e3").unwrap(), dec!(1000));
        assert_eq!(parse_amount("0").unwrap(), dec!(0));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(
            parse_amount("500g"),
            Err(MatchError::InvalidAmount("500g".to_string()))
        );
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        assert!(parse_amount("-1.0").is_err());
        assert!(non_negative(dec!(-0.01)).is_err());
        assert_eq!(non_negative(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(50)), "50.00");
        assert_eq!(format_amount(dec!(0.5)), "0.50");
        assert_eq!(format_amount(dec!(12.345)), "12.35");
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(dec!(100), dec!(100), dec!(0)));
        assert!(approx_eq(dec!(100.0000001), dec!(100), dec!(0.000001)));
        assert!(!approx_eq(dec!(100.01), dec!(100), dec!(0.001)));
    }
}
