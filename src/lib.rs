//! # Fund Matcher
//!
//! Matches donations against a prioritized pool of matching funds.
//!
//! ## Architecture
//!
//! - **Types**: Core values (MatchFund, Donation, Allocation)
//! - **Ledger**: Per-donation allocation records with slab-based storage
//! - **Engine**: Greedy matcher with reserve / collect / expire lifecycle
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical operation sequences produce identical state roots
//! 2. **No Floating Point**: All money is `rust_decimal::Decimal`
//! 3. **Conservation**: Money leaves a fund only as an allocation and comes
//!    back only when that allocation expires
//! 4. **Synchronous Execution**: One owner, no locking, no async
//!
//! ## Example
//!
//! ```
//! use fund_matcher::{Donation, FundMatcher, MatchFund, Ratio};
//! use rust_decimal::Decimal;
//!
//! let fund = MatchFund::new("fund_2", Decimal::from(100), 7)
//!     .unwrap()
//!     .with_ratio(Ratio::new(2, 1).unwrap());
//! let mut matcher = FundMatcher::new(vec![fund]).unwrap();
//!
//! let donation = Donation::new("donation_1", Decimal::from(25)).unwrap();
//! let entry = matcher.reserve(&donation).unwrap();
//! assert_eq!(entry.allocations()[0].amount(), Decimal::from(50));
//!
//! matcher.expire(donation.id()).unwrap();
//! assert_eq!(matcher.funds()[0].balance(), Decimal::from(100));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: MatchFund, Donation, Allocation
pub mod types;

/// Allocation ledger: per-donation entries
pub mod ledger;

/// Matching engine: reservation lifecycle
pub mod engine;

/// Error type shared by every fallible operation
pub mod error;

/// Runtime settings (settings.toml + environment)
pub mod settings;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::FundMatcher;
pub use error::{MatchError, Result};
pub use ledger::{DonationReport, Ledger, LedgerEntry};
pub use settings::Settings;
pub use types::{
    Allocation, AllocationRecord, AllocationStatus, Donation, DonationId, DonationLimits,
    FundId, MatchFund, Ratio,
};
