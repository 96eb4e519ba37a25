//! Core value types for the fund matcher.
//!
//! All monetary values are [`rust_decimal::Decimal`]; nothing here uses
//! floating point.
//!
//! ## Types
//!
//! - [`MatchFund`]: A prioritized pool of matching money
//! - [`Ratio`]: Fund money to donor money ratio of a fund
//! - [`Donation`]: A range-checked incoming donation
//! - [`Allocation`]: One slice of a donation matched against one fund
//! - [`AllocationStatus`]: Reserved, Collected or Expired

mod allocation;
mod donation;
mod fund;
mod ids;
pub mod amount;

// Re-export all types at module level
pub use allocation::{Allocation, AllocationRecord, AllocationStatus};
pub use donation::{Donation, DonationLimits, MAX_DONATION, MIN_DONATION};
pub use fund::{MatchFund, Ratio};
pub use ids::{DonationId, FundId};
