//! Greedy priority matcher.
//!
//! ## Reservation
//!
//! A donation walks the funds in priority order. Each fund either covers the
//! rest of the donation (full match, walk stops) or gives up its whole balance
//! (partial match, walk continues). Whatever no fund covers is recorded as the
//! entry's unmatched balance; that is an outcome, not an error.
//!
//! Ratios are applied in both directions: the fund money needed for the
//! remaining donation is `remaining * num / den`, and a partial match reduces
//! the remaining donation by `balance * den / num`. Both conversions are
//! checked; a reservation whose arithmetic overflows fails with
//! [`MatchError::Overflow`].
//!
//! ## Transitions
//!
//! `reserve` plans every draw before applying any. `collect` and `expire`
//! validate the whole entry before touching it. A rejected call never leaves
//! funds or entries half-updated.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{MatchError, Result};
use crate::ledger::{DonationReport, Ledger, LedgerEntry};
use crate::types::{Allocation, AllocationStatus, Donation, DonationId, FundId, MatchFund};

/// Allocation and reservation engine.
///
/// Owns every fund balance and every ledger entry. Funds are sorted by
/// priority once at construction; equal priorities keep their input order.
#[derive(Debug)]
pub struct FundMatcher {
    /// Funds in matching order
    funds: Vec<MatchFund>,

    /// Fund ID to position in `funds`
    fund_index: HashMap<FundId, usize>,

    /// Per-donation outcomes
    ledger: Ledger,
}

impl FundMatcher {
    /// Take ownership of `funds` and fix their matching order.
    ///
    /// # Errors
    ///
    /// [`MatchError::DuplicateFund`] if two funds share an id.
    ///
    /// # Example
    ///
    /// ```
    /// use fund_matcher::{FundMatcher, MatchFund};
    /// use rust_decimal::Decimal;
    ///
    /// let matcher = FundMatcher::new(vec![
    ///     MatchFund::new("fund_1", Decimal::from(100), 3).unwrap(),
    ///     MatchFund::new("fund_3", Decimal::from(100), 1).unwrap(),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(matcher.funds()[0].id().as_str(), "fund_3");
    /// ```
    pub fn new(funds: impl IntoIterator<Item = MatchFund>) -> Result<Self> {
        let mut funds: Vec<MatchFund> = funds.into_iter().collect();
        // Vec::sort_by_key is stable
        funds.sort_by_key(MatchFund::priority);

        let mut fund_index = HashMap::with_capacity(funds.len());
        for (position, fund) in funds.iter().enumerate() {
            if fund_index.insert(fund.id.clone(), position).is_some() {
                return Err(MatchError::DuplicateFund(fund.id.clone()));
            }
        }

        debug!(funds = funds.len(), "fund matcher initialised");

        Ok(Self {
            funds,
            fund_index,
            ledger: Ledger::new(),
        })
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Funds in matching order.
    #[inline]
    pub fn funds(&self) -> &[MatchFund] {
        &self.funds
    }

    pub fn fund(&self, fund_id: &FundId) -> Option<&MatchFund> {
        self.fund_index.get(fund_id).map(|&position| &self.funds[position])
    }

    /// Sum of every fund's current balance.
    pub fn total_available(&self) -> Decimal {
        self.funds.iter().map(MatchFund::balance).sum()
    }

    /// Ledger entry for a donation, whatever its status.
    #[inline]
    pub fn entry(&self, donation_id: &DonationId) -> Option<&LedgerEntry> {
        self.ledger.get(donation_id)
    }

    #[inline]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Number of donations recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Reserve matching money for `donation` and record the outcome.
    ///
    /// Reusing a donation id replaces the earlier entry without releasing
    /// its reservations.
    ///
    /// # Errors
    ///
    /// [`MatchError::Overflow`] if a ratio conversion leaves the `Decimal`
    /// range. No fund is drawn down and no entry is recorded.
    pub fn reserve(&mut self, donation: &Donation) -> Result<&LedgerEntry> {
        let (allocations, unmatched) = match self.allocate(donation.amount()) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(donation_id = %donation.id(), error = %err, "reserve rejected");
                return Err(err);
            }
        };

        info!(
            donation_id = %donation.id(),
            amount = %donation.amount(),
            allocations = allocations.len(),
            unmatched = %unmatched,
            "donation reserved"
        );

        let entry = LedgerEntry::reserved(
            donation.id().clone(),
            allocations,
            donation.amount(),
            unmatched,
            Utc::now(),
        );

        let (stored, replaced) = self.ledger.insert(entry);
        if let Some(replaced) = replaced {
            warn!(
                donation_id = %donation.id(),
                previous_status = %replaced.overall_status(),
                previous_amount = %replaced.original_amount(),
                "donation id reused, previous ledger entry replaced"
            );
        }
        Ok(stored)
    }

    /// Confirm every reservation of a donation.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NotFound`] if the donation was never reserved
    /// - [`MatchError::InvalidState`] if it was already collected or expired
    pub fn collect(&mut self, donation_id: &DonationId) -> Result<()> {
        let entry = self
            .ledger
            .get_mut(donation_id)
            .ok_or_else(|| MatchError::NotFound(donation_id.clone()))?;

        if let Err(err) = entry.ensure_reserved() {
            warn!(donation_id = %donation_id, error = %err, "collect rejected");
            return Err(err);
        }

        entry.set_status(AllocationStatus::Collected, Utc::now());

        info!(
            donation_id = %donation_id,
            matched = %entry.matched_total(),
            "donation collected"
        );
        Ok(())
    }

    /// Cancel every reservation of a donation and return the money to the
    /// funds it came from.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NotFound`] if the donation was never reserved
    /// - [`MatchError::InvalidState`] if it was already collected or expired
    /// - [`MatchError::UnknownFund`] if an allocation names a fund this
    ///   matcher does not hold
    pub fn expire(&mut self, donation_id: &DonationId) -> Result<()> {
        let entry = self
            .ledger
            .get_mut(donation_id)
            .ok_or_else(|| MatchError::NotFound(donation_id.clone()))?;

        if let Err(err) = entry.ensure_reserved() {
            warn!(donation_id = %donation_id, error = %err, "expire rejected");
            return Err(err);
        }

        // Stage every refund before applying any of them
        let mut refunds = Vec::with_capacity(entry.allocations().len());
        for allocation in entry.allocations() {
            let fund_id = allocation.fund_id();
            let position = *self
                .fund_index
                .get(fund_id)
                .ok_or_else(|| MatchError::UnknownFund(fund_id.clone()))?;
            let restored = self.funds[position]
                .balance
                .checked_add(allocation.amount())
                .ok_or_else(|| MatchError::Overflow(fund_id.clone()))?;
            refunds.push((position, restored));
        }

        for (position, restored) in refunds {
            let fund = &mut self.funds[position];
            debug!(fund_id = %fund.id, balance = %restored, "fund balance restored");
            fund.balance = restored;
        }

        entry.set_status(AllocationStatus::Expired, Utc::now());

        info!(
            donation_id = %donation_id,
            released = %entry.matched_total(),
            "donation expired"
        );
        Ok(())
    }

    /// Reports for every donation that has not expired, in reservation order.
    pub fn list_allocations(&self) -> Vec<DonationReport> {
        self.ledger.active().map(LedgerEntry::to_report).collect()
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 digest of fund balances and ledger contents.
    ///
    /// Timestamps are left out, so replaying the same operations yields the
    /// same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update((self.funds.len() as u64).to_le_bytes());
        for fund in &self.funds {
            hash_str(&mut hasher, fund.id.as_str());
            hash_amount(&mut hasher, fund.balance);
        }

        hasher.update((self.ledger.len() as u64).to_le_bytes());
        for entry in self.ledger.iter() {
            hash_str(&mut hasher, entry.donation_id().as_str());
            hasher.update([entry.overall_status().to_u8()]);
            hash_amount(&mut hasher, entry.original_amount());
            hash_amount(&mut hasher, entry.unmatched_balance());

            hasher.update((entry.allocations().len() as u64).to_le_bytes());
            for allocation in entry.allocations() {
                hash_str(&mut hasher, allocation.fund_id().as_str());
                hash_amount(&mut hasher, allocation.amount());
                hasher.update([allocation.status().to_u8()]);
            }
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Draw down fund balances for `amount` of donor money.
    ///
    /// Returns the allocations made and the donor money left unmatched.
    /// Balances are untouched on error.
    fn allocate(&mut self, amount: Decimal) -> Result<(Vec<Allocation>, Decimal)> {
        let (draws, unmatched) = self.plan(amount)?;

        let allocations = draws
            .into_iter()
            .map(|(position, drawn)| {
                let fund = &mut self.funds[position];
                fund.balance -= drawn;
                Allocation::reserved(fund.id.clone(), drawn)
            })
            .collect();

        Ok((allocations, unmatched))
    }

    /// Walk the funds in priority order without mutating them.
    ///
    /// Returns `(fund position, amount drawn)` pairs in walk order and the
    /// donor money no fund covers.
    fn plan(&self, amount: Decimal) -> Result<(Vec<(usize, Decimal)>, Decimal)> {
        let mut remaining = amount;
        let mut draws = Vec::new();

        if remaining.is_zero() {
            return Ok((draws, remaining));
        }

        for (position, fund) in self.funds.iter().enumerate() {
            if fund.is_exhausted() {
                continue;
            }

            let required = fund
                .ratio
                .to_fund(remaining)
                .ok_or_else(|| MatchError::Overflow(fund.id.clone()))?;

            if fund.balance >= required {
                // Full match
                debug!(fund_id = %fund.id, amount = %required, "full match");
                draws.push((position, required));
                remaining = Decimal::ZERO;
                break;
            }

            // Partial match: the fund gives up everything it has
            let drawn = fund.balance;
            let covered = fund
                .ratio
                .to_donor(drawn)
                .ok_or_else(|| MatchError::Overflow(fund.id.clone()))?;
            remaining = (remaining - covered).max(Decimal::ZERO);
            debug!(fund_id = %fund.id, amount = %drawn, remaining = %remaining, "partial match");
            draws.push((position, drawn));

            if remaining.is_zero() {
                break;
            }
        }

        Ok((draws, remaining))
    }
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_amount(hasher: &mut Sha256, value: Decimal) {
    // Normalise so 50 and 50.00 hash alike
    hasher.update(value.normalize().serialize());
}

// ============================================================================
// Unit Tests
// ============================================================================
