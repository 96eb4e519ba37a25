//! Allocation ledger.
//!
//! ## Components
//!
//! - [`LedgerEntry`]: Allocations and amounts recorded for one donation
//! - [`DonationReport`]: Serializable view of a ledger entry
//! - [`Ledger`]: Slab-backed mapping from donation id to entry
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert entry | O(1) |
//! | Lookup by donation ID | O(1) |
//! | Iterate in insertion order | O(n) |

pub mod book;
pub mod entry;

pub use book::Ledger;
pub use entry::{DonationReport, LedgerEntry};
