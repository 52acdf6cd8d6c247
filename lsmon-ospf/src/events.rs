//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::cmp::Ordering;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;

use bytes::{Bytes, BytesMut};
use chrono::Utc;
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::archive::LsaRecord;
use crate::debug::{Debug, LsaDiscardReason};
use crate::error::Error;
use crate::instance::Instance;
use crate::lsdb::{self, WithdrawPolicy, lsa_compare};
use crate::packet::error::DecodeError;
use crate::packet::lsa::Lsa;

// LSA notification kind, as delivered by the session collaborator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum MsgType {
    Update,
    Withdraw,
}

// Inbound LSA notification.
//
// The session layer delivers the LSA header and body as separate byte
// ranges, plus the full message as received for archival and debugging.
#[derive(Clone, Debug, new)]
#[derive(Deserialize, Serialize)]
pub struct LsaMsg {
    pub msg_type: MsgType,
    pub ifaddr: Ipv4Addr,
    pub area_id: Ipv4Addr,
    pub hdr: Bytes,
    pub body: Bytes,
    pub raw: Bytes,
}

// ===== LSA message from the session collaborator =====

pub(crate) fn process_lsa_msg(
    instance: &mut Instance,
    msg: LsaMsg,
    now: Instant,
) -> Result<Option<LsaRecord>, Error> {
    Debug::LsaMsgRx(&msg).log();

    // This decoder handles a single routing area.
    if msg.area_id != instance.cfg.area_id {
        return Err(Error::AreaIdMismatch(msg.area_id, instance.cfg.area_id));
    }

    // Reassemble and decode the advertisement.
    let mut buf = BytesMut::with_capacity(msg.hdr.len() + msg.body.len());
    buf.extend_from_slice(&msg.hdr);
    buf.extend_from_slice(&msg.body);
    let mut buf = buf.freeze();
    let lsa = Lsa::decode(&mut buf)?;
    if instance.cfg.validate_checksum && !lsa.is_checksum_valid() {
        return Err(DecodeError::InvalidChecksum.into());
    }
    let key = lsa.hdr.key();

    // Withdraw notifications only ever affect an existing entry. Without
    // one, the advertisement is examined like a regular update.
    if msg.msg_type == MsgType::Withdraw && instance.lsdb.get(&key).is_some()
    {
        Debug::LsaWithdraw(&key).log();
        if instance.cfg.withdraw_policy == WithdrawPolicy::Remove {
            instance.lsdb.remove(&key);
        }
        return Ok(None);
    }

    // (4) A MaxAge LSA with no database copy is discarded without seeding
    // the database (RFC 2328, Section 13).
    let lse = instance.lsdb.get(&key);
    if lsa.hdr.is_maxage() && lse.is_none() {
        Debug::LsaDiscard(LsaDiscardReason::MaxAgeAbsent, &lsa.hdr).log();
        return Ok(None);
    }

    // (5) Install when there is no database copy or the database copy is
    // less recent.
    if let Some(lse) = lse {
        match lsa_compare(&lse.data.hdr, &lsa.hdr) {
            Ordering::Less => {
                // (5)(a) Drop copies arriving faster than MinLSArrival.
                if !lsdb::lsa_min_arrival_check(
                    lse,
                    instance.cfg.min_arrival,
                    now,
                ) {
                    Debug::LsaDiscard(LsaDiscardReason::MinArrival, &lsa.hdr)
                        .log();
                    return Ok(None);
                }
            }
            // Duplicate or stale retransmission.
            _ => {
                Debug::LsaDiscard(LsaDiscardReason::NotMoreRecent, &lsa.hdr)
                    .log();
                return Ok(None);
            }
        }
    }

    // Install the advertisement, replacing any previous copy of this
    // identity, and produce the record for the archival collaborator.
    Debug::LsaInstall(&lsa.hdr).log();
    let record = LsaRecord::new(&lsa, Utc::now());
    instance.lsdb.install(Arc::new(lsa), now);

    Ok(Some(record))
}
