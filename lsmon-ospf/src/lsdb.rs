//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::packet::lsa::{Lsa, LsaHdr, LsaKey};

// Architectural Constants.
pub const LSA_MAX_AGE: u16 = 3600;
pub const LSA_MAX_AGE_DIFF: u16 = 900;
pub const LSA_INIT_SEQ_NO: u32 = 0x80000001;
pub const LSA_RESERVED_SEQ_NO: u32 = 0x80000000;
pub const LSA_MIN_ARRIVAL: u64 = 1;

// Link-state database entry.
//
// Entries are created on the first acceptance of an identity and replaced in
// place on each subsequent acceptance. The stored advertisement is immutable
// once installed and safely shared by reference.
#[derive(Clone, Debug)]
pub struct LsaEntry {
    // LSA data.
    pub data: Arc<Lsa>,
    // Time the LSA was accepted into the database.
    pub rcvd_time: Instant,
}

// Policy applied when a withdraw notification arrives for a stored entry.
//
// Retaining withdrawn entries preserves history for diffing successive
// versions of the same advertisement.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum WithdrawPolicy {
    #[default]
    Retain,
    Remove,
}

// Link-state database.
#[derive(Debug, Default)]
pub struct Lsdb {
    entries: BTreeMap<LsaKey, LsaEntry>,
}

// ===== impl Lsdb =====

impl Lsdb {
    pub fn new() -> Lsdb {
        Default::default()
    }

    pub fn get(&self, key: &LsaKey) -> Option<&LsaEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, LsaKey, LsaEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn install(&mut self, lsa: Arc<Lsa>, now: Instant) {
        let key = lsa.hdr.key();
        self.entries.insert(
            key,
            LsaEntry {
                data: lsa,
                rcvd_time: now,
            },
        );
    }

    pub(crate) fn remove(&mut self, key: &LsaKey) -> Option<LsaEntry> {
        self.entries.remove(key)
    }
}

// ===== global functions =====

// Compares which LSA is more recent according to the rules specified in
// Section 13.1 of RFC 2328.
//
// Returns:
// - Ordering::Greater when `a` is more recent
// - Ordering::Less when `b` is more recent
// - Ordering::Equal when the two LSAs are considered to be identical
//
// Note that Ordering::Equal means "do not replace", not "identical
// contents": ages within LSA_MAX_AGE_DIFF of each other are treated as
// duplicates.
pub fn lsa_compare(a: &LsaHdr, b: &LsaHdr) -> Ordering {
    let a_seq_no = a.seq_no as i32;
    let b_seq_no = b.seq_no as i32;
    let cmp = a_seq_no.cmp(&b_seq_no);
    if cmp != Ordering::Equal {
        return cmp;
    }

    // Differing checksums defer to the sequence number comparison, which is
    // necessarily Equal at this point.
    if a.cksum != b.cksum {
        return cmp;
    }

    if a.is_maxage() && !b.is_maxage() {
        return Ordering::Greater;
    } else if !a.is_maxage() && b.is_maxage() {
        return Ordering::Less;
    }

    if a.age.abs_diff(b.age) > LSA_MAX_AGE_DIFF {
        return a.age.cmp(&b.age);
    }

    Ordering::Equal
}

// Checks whether enough time has elapsed since the database entry was last
// accepted for a newer copy to be accepted (MinLSArrival).
pub(crate) fn lsa_min_arrival_check(
    lse: &LsaEntry,
    min_arrival: Duration,
    now: Instant,
) -> bool {
    now.saturating_duration_since(lse.rcvd_time) >= min_arrival
}
