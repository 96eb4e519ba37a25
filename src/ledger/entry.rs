//! Per-donation ledger entry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::types::{Allocation, AllocationRecord, AllocationStatus, DonationId};

/// The outcome of reserving one donation.
///
/// Allocations are kept in the order they were created, which is fund
/// priority order. Their statuses are always homogeneous and equal to
/// [`overall_status`](Self::overall_status).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub(crate) donation_id: DonationId,
    pub(crate) allocations: Vec<Allocation>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) original_amount: Decimal,
    pub(crate) unmatched_balance: Decimal,
    pub(crate) overall_status: AllocationStatus,
}

impl LedgerEntry {
    pub(crate) fn reserved(
        donation_id: DonationId,
        allocations: Vec<Allocation>,
        original_amount: Decimal,
        unmatched_balance: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            donation_id,
            allocations,
            created_at: now,
            updated_at: now,
            original_amount,
            unmatched_balance,
            overall_status: AllocationStatus::Reserved,
        }
    }

    #[inline]
    pub fn donation_id(&self) -> &DonationId {
        &self.donation_id
    }

    #[inline]
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[inline]
    pub fn original_amount(&self) -> Decimal {
        self.original_amount
    }

    /// Donor money no fund could match. Zero when fully matched.
    #[inline]
    pub fn unmatched_balance(&self) -> Decimal {
        self.unmatched_balance
    }

    #[inline]
    pub fn overall_status(&self) -> AllocationStatus {
        self.overall_status
    }

    /// Sum of allocation amounts, in fund money.
    pub fn matched_total(&self) -> Decimal {
        self.allocations.iter().map(Allocation::amount).sum()
    }

    pub fn is_fully_matched(&self) -> bool {
        self.unmatched_balance.is_zero()
    }

    /// Fails unless every allocation is still `Reserved`.
    ///
    /// Checked before any mutation so that a rejected transition leaves the
    /// entry untouched.
    pub(crate) fn ensure_reserved(&self) -> Result<()> {
        let offending = self
            .allocations
            .iter()
            .map(Allocation::status)
            .chain(std::iter::once(self.overall_status))
            .find(|status| status.is_terminal());

        match offending {
            Some(status) => Err(MatchError::InvalidState {
                donation_id: self.donation_id.clone(),
                status,
            }),
            None => Ok(()),
        }
    }

    /// Move every allocation and the entry itself to `status`.
    pub(crate) fn set_status(&mut self, status: AllocationStatus, now: DateTime<Utc>) {
        for allocation in &mut self.allocations {
            allocation.status = status;
        }
        self.overall_status = status;
        self.updated_at = now;
    }

    /// External-facing view of this entry.
    pub fn to_report(&self) -> DonationReport {
        DonationReport {
            donation_id: self.donation_id.clone(),
            allocations: self.allocations.iter().map(Allocation::to_record).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            original_amount: self.original_amount,
            unmatched_balance: self.unmatched_balance,
            overall_status: self.overall_status,
        }
    }
}

/// Serializable summary of one donation, as produced by
/// [`FundMatcher::list_allocations`](crate::engine::FundMatcher::list_allocations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReport {
    pub donation_id: DonationId,
    pub allocations: Vec<AllocationRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub original_amount: Decimal,
    pub unmatched_balance: Decimal,
    pub overall_status: AllocationStatus,
}
