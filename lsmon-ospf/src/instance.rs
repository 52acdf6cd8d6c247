//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::archive::LsaRecord;
use crate::error::Error;
use crate::events::{self, LsaMsg};
use crate::lsdb::{LSA_MIN_ARRIVAL, Lsdb, WithdrawPolicy};

// Instance configuration.
#[derive(Clone, Debug)]
#[derive(Deserialize, Serialize)]
pub struct InstanceCfg {
    // The single routing area accepted from the session collaborator.
    pub area_id: Ipv4Addr,
    // What to do with a stored entry when a withdraw notification arrives.
    pub withdraw_policy: WithdrawPolicy,
    // Minimum interval between acceptances of the same identity.
    pub min_arrival: Duration,
    // Whether to verify the Fletcher checksum of incoming LSAs.
    pub validate_checksum: bool,
}

// Monitor instance: configuration plus the link-state database.
//
// Incoming notifications may originate from multiple sessions; requiring
// `&mut self` serializes the read-compare-write acceptance sequence, so a
// shared instance is wrapped in a mutex by whoever composes the session
// collaborator with this core.
#[derive(Debug, Default)]
pub struct Instance {
    pub cfg: InstanceCfg,
    pub lsdb: Lsdb,
}

// ===== impl InstanceCfg =====

impl Default for InstanceCfg {
    fn default() -> InstanceCfg {
        InstanceCfg {
            area_id: Ipv4Addr::UNSPECIFIED,
            withdraw_policy: WithdrawPolicy::default(),
            min_arrival: Duration::from_secs(LSA_MIN_ARRIVAL),
            validate_checksum: false,
        }
    }
}

// ===== impl Instance =====

impl Instance {
    pub fn new(cfg: InstanceCfg) -> Instance {
        Instance {
            cfg,
            lsdb: Lsdb::new(),
        }
    }

    // Processes one inbound LSA notification.
    //
    // `now` is the monotonic timestamp of the event, supplied by the host
    // environment so that the MinLSArrival guard is testable.
    //
    // Returns the archival record when the advertisement is accepted into
    // the database; drops (duplicates, stale retransmissions, rate-limited
    // copies) are silently absorbed and yield `None`.
    pub fn process_msg(
        &mut self,
        msg: LsaMsg,
        now: Instant,
    ) -> Result<Option<LsaRecord>, Error> {
        events::process_lsa_msg(self, msg, now).inspect_err(|error| {
            error.log();
        })
    }
}
