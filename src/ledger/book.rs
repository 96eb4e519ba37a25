//! Ledger storage.
//!
//! ## Memory Model
//!
//! Per slab docs (https://docs.rs/slab/0.4.11), keys are only reused after
//! removal. Ledger entries are never removed, so iterating the slab yields
//! entries in the order their donations were first reserved.
//!
//! A `HashMap` maps each donation id to its slab key for O(1) lookup.

use std::collections::HashMap;

use slab::Slab;

use crate::ledger::LedgerEntry;
use crate::types::{AllocationStatus, DonationId};

/// Mapping from donation id to [`LedgerEntry`], in insertion order.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Entry storage
    /// Key: slab index, Value: LedgerEntry
    entries: Slab<LedgerEntry>,

    /// Donation ID to slab key mapping
    index: HashMap<DonationId, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with room for `capacity` donations.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record an entry under its donation id.
    ///
    /// An existing entry for the same id is replaced in place, keeping its
    /// position, and handed back alongside the stored entry.
    pub fn insert(&mut self, entry: LedgerEntry) -> (&LedgerEntry, Option<LedgerEntry>) {
        let existing = self.index.get(entry.donation_id()).copied();
        if let Some(key) = existing {
            let replaced = std::mem::replace(&mut self.entries[key], entry);
            return (&self.entries[key], Some(replaced));
        }

        let donation_id = entry.donation_id().clone();
        let key = self.entries.insert(entry);
        self.index.insert(donation_id, key);
        (&self.entries[key], None)
    }

    #[inline]
    pub fn get(&self, donation_id: &DonationId) -> Option<&LedgerEntry> {
        let key = *self.index.get(donation_id)?;
        self.entries.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, donation_id: &DonationId) -> Option<&mut LedgerEntry> {
        let key = *self.index.get(donation_id)?;
        self.entries.get_mut(key)
    }

    /// All entries in insertion order, expired ones included.
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Entries whose overall status is not `Expired`, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.iter()
            .filter(|entry| entry.overall_status() != AllocationStatus::Expired)
    }

    /// Number of entries currently in `status`.
    pub fn count_with_status(&self, status: AllocationStatus) -> usize {
        self.iter()
            .filter(|entry| entry.overall_status() == status)
            .count()
    }
}
