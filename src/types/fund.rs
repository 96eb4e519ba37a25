//! Matching funds and their ratios.
//!
//! ## Ratio
//!
//! A fund's [`Ratio`] says how much fund money backs one unit of donor money.
//! A 2:1 fund contributes 50.00 to match a 25.00 donation.
//!
//! ## Balance
//!
//! The balance never goes negative. Only the engine mutates it after
//! construction: reservations draw it down, expiries pay it back.

use rust_decimal::Decimal;

use super::amount::{non_negative, parse_amount};
use super::FundId;
use crate::error::{MatchError, Result};

// ============================================================================
// Ratio
// ============================================================================

/// Fund money : donor money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numerator: u32,
    denominator: u32,
}

impl Default for Ratio {
    fn default() -> Self {
        Self::ONE_TO_ONE
    }
}

impl Ratio {
    pub const ONE_TO_ONE: Ratio = Ratio {
        numerator: 1,
        denominator: 1,
    };

    /// Create a ratio; both terms must be positive.
    ///
    /// # Example
    ///
    /// ```
    /// use fund_matcher::types::Ratio;
    ///
    /// assert!(Ratio::new(2, 1).is_ok());
    /// assert!(Ratio::new(1, 0).is_err());
    /// ```
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(MatchError::InvalidRatio {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    #[inline]
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// `numerator / denominator` as a decimal.
    pub fn multiplier(&self) -> Decimal {
        Decimal::from(self.numerator) / Decimal::from(self.denominator)
    }

    /// Fund money needed to match `donor_amount` of donor money.
    ///
    /// `None` if the product leaves the `Decimal` range.
    #[inline]
    pub fn to_fund(&self, donor_amount: Decimal) -> Option<Decimal> {
        donor_amount
            .checked_mul(Decimal::from(self.numerator))?
            .checked_div(Decimal::from(self.denominator))
    }

    /// Donor money matched by `fund_amount` of fund money.
    ///
    /// `None` if the product leaves the `Decimal` range.
    #[inline]
    pub fn to_donor(&self, fund_amount: Decimal) -> Option<Decimal> {
        fund_amount
            .checked_mul(Decimal::from(self.denominator))?
            .checked_div(Decimal::from(self.numerator))
    }
}

// ============================================================================
// MatchFund
// ============================================================================

/// A prioritized pool of matching money.
///
/// ## Example
///
/// ```
/// use fund_matcher::types::{MatchFund, Ratio};
/// use rust_decimal::Decimal;
///
/// let fund = MatchFund::new("fund_2", Decimal::from(100), 7)
///     .unwrap()
///     .with_ratio(Ratio::new(2, 1).unwrap());
///
/// assert_eq!(fund.ratio_multiplier(), Decimal::from(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFund {
    pub(crate) id: FundId,
    pub(crate) balance: Decimal,
    pub(crate) priority: i64,
    pub(crate) ratio: Ratio,
}

impl MatchFund {
    /// Create a fund with a 1:1 ratio.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidAmount`] if `balance` is negative.
    pub fn new(id: impl Into<FundId>, balance: Decimal, priority: i64) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            balance: non_negative(balance)?,
            priority,
            ratio: Ratio::default(),
        })
    }

    /// Create a fund from a textual balance.
    pub fn parse(id: impl Into<FundId>, balance: &str, priority: i64) -> Result<Self> {
        Self::new(id, parse_amount(balance)?, priority)
    }

    pub fn with_ratio(mut self, ratio: Ratio) -> Self {
        self.ratio = ratio;
        self
    }

    #[inline]
    pub fn id(&self) -> &FundId {
        &self.id
    }

    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Lower values are matched first.
    #[inline]
    pub fn priority(&self) -> i64 {
        self.priority
    }

    #[inline]
    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    pub fn ratio_multiplier(&self) -> Decimal {
        self.ratio.multiplier()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.balance.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratio_default_is_one_to_one() {
        let ratio = Ratio::default();
        assert_eq!(ratio.numerator(), 1);
        assert_eq!(ratio.denominator(), 1);
        assert_eq!(ratio.multiplier(), dec!(1));
    }

    #[test]
    fn test_ratio_rejects_zero_terms() {
        assert_eq!(
            Ratio::new(1, 0),
            Err(MatchError::InvalidRatio {
                numerator: 1,
                denominator: 0
            })
        );
        assert!(Ratio::new(0, 1).is_err());
    }

    #[test]
    fn test_ratio_conversions() {
        let ratio = Ratio::new(2, 1).unwrap();
        assert_eq!(ratio.to_fund(dec!(25)), Some(dec!(50)));
        assert_eq!(ratio.to_donor(dec!(100)), Some(dec!(50)));

        let ratio = Ratio::new(1, 2).unwrap();
        assert_eq!(ratio.multiplier(), dec!(0.5));
        assert_eq!(ratio.to_fund(dec!(30)), Some(dec!(15)));
        assert_eq!(ratio.to_donor(dec!(15)), Some(dec!(30)));
    }

    #[test]
    fn test_ratio_conversions_overflow() {
        let ratio = Ratio::new(10, 1).unwrap();
        assert_eq!(ratio.to_fund(Decimal::MAX), None);
        assert_eq!(ratio.to_donor(Decimal::MAX), Some(Decimal::MAX / dec!(10)));

        let ratio = Ratio::new(1, u32::MAX).unwrap();
        assert_eq!(ratio.to_donor(Decimal::MAX), None);
        assert!(ratio.to_fund(Decimal::MAX).is_some());
    }

    #[test]
    fn test_match_fund_new() {
        let fund = MatchFund::new("fund_1", dec!(100000.5), 3).unwrap();
        assert_eq!(fund.id().as_str(), "fund_1");
        assert_eq!(fund.balance(), dec!(100000.5));
        assert_eq!(fund.priority(), 3);
        assert_eq!(fund.ratio(), Ratio::ONE_TO_ONE);
        assert!(!fund.is_exhausted());
    }

    #[test]
    fn test_match_fund_with_ratio() {
        let fund = MatchFund::new("fund_2", dec!(100), 7)
            .unwrap()
            .with_ratio(Ratio::new(3, 1).unwrap());
        assert_eq!(fund.ratio_multiplier(), dec!(3));
    }

    #[test]
    fn test_match_fund_rejects_negative_balance() {
        assert!(matches!(
            MatchFund::new("fund_1", dec!(-1), 1),
            Err(MatchError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_match_fund_parse() {
        let fund = MatchFund::parse("fund_1", "100.00", 1).unwrap();
        assert_eq!(fund.balance(), dec!(100));

        assert_eq!(
            MatchFund::parse("fund_1", "lots", 1),
            Err(MatchError::InvalidAmount("lots".to_string()))
        );
    }

    #[test]
    fn test_zero_balance_is_exhausted() {
        let fund = MatchFund::new("fund_1", Decimal::ZERO, 1).unwrap();
        assert!(fund.is_exhausted());
    }
}
