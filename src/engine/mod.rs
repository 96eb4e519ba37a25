//! Allocation and reservation engine.
//!
//! ## Matching Rules
//!
//! - Funds are visited in ascending priority; ties keep insertion order
//! - A fund that can cover the remaining donation ends the walk
//! - A fund that cannot gives up its whole balance and the walk continues
//! - Exhausted funds are skipped
//! - Donor money left over is recorded as unmatched
//!
//! ## Example
//!
//! ```
//! use fund_matcher::{Donation, FundMatcher, MatchFund};
//! use rust_decimal::Decimal;
//!
//! let mut matcher = FundMatcher::new(vec![
//!     MatchFund::new("fund_1", Decimal::from(100), 3).unwrap(),
//!     MatchFund::new("fund_3", Decimal::from(100), 1).unwrap(),
//! ])
//! .unwrap();
//!
//! let donation = Donation::new("donation_1", Decimal::from(130)).unwrap();
//! let entry = matcher.reserve(&donation).unwrap();
//!
//! assert_eq!(entry.allocations().len(), 2);
//! assert!(entry.is_fully_matched());
//!
//! matcher.collect(donation.id()).unwrap();
//! assert_eq!(matcher.list_allocations().len(), 1);
//! ```

pub mod matcher;

pub use matcher::FundMatcher;
