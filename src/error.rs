//! Errors raised by the matcher.
//!
//! Construction errors ([`InvalidAmount`], [`AmountOutOfRange`],
//! [`InvalidRatio`], [`DuplicateFund`]) stop a value or engine from ever
//! existing. Operation errors ([`NotFound`], [`InvalidState`],
//! [`UnknownFund`], [`Overflow`]) abort the call and leave the ledger and
//! every fund balance exactly as they were.
//!
//! [`InvalidAmount`]: MatchError::InvalidAmount
//! [`AmountOutOfRange`]: MatchError::AmountOutOfRange
//! [`InvalidRatio`]: MatchError::InvalidRatio
//! [`DuplicateFund`]: MatchError::DuplicateFund
//! [`NotFound`]: MatchError::NotFound
//! [`InvalidState`]: MatchError::InvalidState
//! [`UnknownFund`]: MatchError::UnknownFund
//! [`Overflow`]: MatchError::Overflow

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{AllocationStatus, DonationId, FundId};

/// Matcher errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A monetary value could not be interpreted as a non-negative number.
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),

    /// A donation amount fell outside the accepted range.
    #[error("amount {amount} outside accepted range [{min}, {max}]")]
    AmountOutOfRange {
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("invalid ratio {numerator}:{denominator}")]
    InvalidRatio { numerator: u32, denominator: u32 },

    #[error("match fund `{0}` registered more than once")]
    DuplicateFund(FundId),

    #[error("no allocations recorded for donation `{0}`")]
    NotFound(DonationId),

    /// An allocation was expected to be `Reserved`.
    #[error("donation `{donation_id}` allocations are {status}, expected Reserved")]
    InvalidState {
        donation_id: DonationId,
        status: AllocationStatus,
    },

    /// An allocation refers to a fund the matcher does not hold.
    #[error("match fund `{0}` is not registered")]
    UnknownFund(FundId),

    /// Ratio or balance arithmetic left the representable decimal range.
    #[error("amount overflow while matching against fund `{0}`")]
    Overflow(FundId),
}

pub type Result<T> = std::result::Result<T, MatchError>;
