//! Validated donations.

use rust_decimal::Decimal;

use super::amount::parse_amount;
use super::DonationId;
use crate::error::{MatchError, Result};

/// Smallest accepted donation: 5.00
pub const MIN_DONATION: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Largest accepted donation: 25000.00
pub const MAX_DONATION: Decimal = Decimal::from_parts(2_500_000, 0, 0, false, 2);

/// Inclusive bounds for a donation amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonationLimits {
    min: Decimal,
    max: Decimal,
}

impl Default for DonationLimits {
    fn default() -> Self {
        Self {
            min: MIN_DONATION,
            max: MAX_DONATION,
        }
    }
}

impl DonationLimits {
    /// # Errors
    ///
    /// [`MatchError::InvalidAmount`] if `min` is not positive or `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self> {
        // A zero donation would reserve zero-amount allocations
        if min <= Decimal::ZERO || min > max {
            return Err(MatchError::InvalidAmount(format!("{min}..={max}")));
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> Decimal {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn check(&self, amount: Decimal) -> Result<Decimal> {
        if amount < self.min || amount > self.max {
            return Err(MatchError::AmountOutOfRange {
                amount,
                min: self.min,
                max: self.max,
            });
        }
        Ok(amount)
    }
}

/// A donation whose amount has passed range validation.
///
/// Immutable once built.
///
/// ## Example
///
/// ```
/// use fund_matcher::types::Donation;
/// use rust_decimal::Decimal;
///
/// let donation = Donation::new("donation_1", Decimal::from(50)).unwrap();
/// assert_eq!(donation.amount(), Decimal::from(50));
///
/// assert!(Donation::new("donation_2", Decimal::from(4)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    id: DonationId,
    amount: Decimal,
}

impl Donation {
    /// Validate against [`DonationLimits::default`].
    pub fn new(id: impl Into<DonationId>, amount: Decimal) -> Result<Self> {
        Self::with_limits(id, amount, &DonationLimits::default())
    }

    pub fn with_limits(
        id: impl Into<DonationId>,
        amount: Decimal,
        limits: &DonationLimits,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            amount: limits.check(amount)?,
        })
    }

    /// Parse a textual amount, then validate against the default limits.
    ///
    /// Non-numeric text fails with [`MatchError::InvalidAmount`] before any
    /// range check.
    pub fn parse(id: impl Into<DonationId>, amount: &str) -> Result<Self> {
        Self::new(id, parse_amount(amount)?)
    }

    #[inline]
    pub fn id(&self) -> &DonationId {
        &self.id
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
