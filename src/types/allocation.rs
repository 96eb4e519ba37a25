//! Allocation of matching money against one fund.
//!
//! An allocation is created by a reservation and afterwards only ever changes
//! status:
//!
//! ```text
//! Reserved ──collect──▶ Collected
//!     │
//!     └────expire────▶ Expired   (amount returned to the fund)
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FundId;

/// Lifecycle status of an allocation or of a whole ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AllocationStatus {
    #[default]
    Reserved,
    Collected,
    Expired,
}

impl AllocationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AllocationStatus::Reserved => "Reserved",
            AllocationStatus::Collected => "Collected",
            AllocationStatus::Expired => "Expired",
        }
    }

    /// `Collected` and `Expired` accept no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, AllocationStatus::Reserved)
    }

    /// Byte tag used when hashing ledger state.
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            AllocationStatus::Reserved => 0,
            AllocationStatus::Collected => 1,
            AllocationStatus::Expired => 2,
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slice of a donation matched against one fund.
///
/// `amount` is in fund money, so a 2:1 fund matching a 25.00 donation carries
/// an allocation of 50.00.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub(crate) fund_id: FundId,
    pub(crate) amount: Decimal,
    pub(crate) status: AllocationStatus,
}

impl Allocation {
    pub(crate) fn reserved(fund_id: FundId, amount: Decimal) -> Self {
        Self {
            fund_id,
            amount,
            status: AllocationStatus::Reserved,
        }
    }

    #[inline]
    pub fn fund_id(&self) -> &FundId {
        &self.fund_id
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[inline]
    pub fn status(&self) -> AllocationStatus {
        self.status
    }

    /// Plain value form for reporting.
    pub fn to_record(&self) -> AllocationRecord {
        AllocationRecord {
            fund_id: self.fund_id.clone(),
            amount: self.amount,
            status: self.status,
        }
    }
}

/// Serializable `{fundId, amount, status}` view of an [`Allocation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub fund_id: FundId,
    pub amount: Decimal,
    pub status: AllocationStatus,
}
