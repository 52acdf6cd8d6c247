//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::debug;

use crate::events::LsaMsg;
use crate::packet::lsa::{LsaHdr, LsaKey};

// Debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    LsaMsgRx(&'a LsaMsg),
    LsaInstall(&'a LsaHdr),
    LsaDiscard(LsaDiscardReason, &'a LsaHdr),
    LsaWithdraw(&'a LsaKey),
}

// Reasons an incoming advertisement is silently dropped. Duplicates and
// stale retransmissions are expected protocol traffic, not errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LsaDiscardReason {
    MaxAgeAbsent,
    MinArrival,
    NotMoreRecent,
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::LsaMsgRx(msg) => {
                debug!(msg_type = ?msg.msg_type, ifaddr = %msg.ifaddr,
                    bytes = msg.raw.len(), "{}", self);
            }
            Debug::LsaInstall(hdr) => {
                debug!(lsa_type = %hdr.lsa_type, lsa_id = %hdr.lsa_id,
                    adv_rtr = %hdr.adv_rtr, seq_no = hdr.seq_no, "{}", self);
            }
            Debug::LsaDiscard(reason, hdr) => {
                debug!(?reason, lsa_type = %hdr.lsa_type,
                    lsa_id = %hdr.lsa_id, adv_rtr = %hdr.adv_rtr, "{}", self);
            }
            Debug::LsaWithdraw(key) => {
                debug!(lsa_type = %key.lsa_type, lsa_id = %key.lsa_id,
                    adv_rtr = %key.adv_rtr, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::LsaMsgRx(..) => {
                write!(f, "LSA message received")
            }
            Debug::LsaInstall(..) => {
                write!(f, "LSA installed")
            }
            Debug::LsaDiscard(..) => {
                write!(f, "LSA discarded")
            }
            Debug::LsaWithdraw(..) => {
                write!(f, "LSA withdrawn")
            }
        }
    }
}
