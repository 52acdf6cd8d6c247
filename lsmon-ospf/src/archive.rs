//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::packet::lsa::{Lsa, LsaAsExternalFlags, LsaBody, LsaRouterFlags};

// Record produced for the archival collaborator when an advertisement is
// accepted into the database.
//
// One record is emitted per accepted event, serialized as a single JSON
// line. The collaborator partitions its store by the hour of `timestamp`
// (milliseconds since the Unix epoch). Addresses are rendered in dotted
// notation.
#[derive(Clone, Debug, Serialize)]
pub struct LsaRecord {
    pub timestamp: i64,
    pub ls_type: u8,
    pub ls_id: String,
    pub ls_advertising_router: String,
    #[serde(flatten)]
    pub body: LsaRecordBody,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum LsaRecordBody {
    Router {
        router_lsa_options_b: bool,
        router_lsa_options_e: bool,
        router_lsa_options_v: bool,
        link_count: u16,
        links: Vec<LinkRecord>,
    },
    Network {
        network_mask: String,
        routers: Vec<AttachedRtrRecord>,
    },
    AsExternal {
        network_mask: String,
        is_type_2: bool,
        metric: u32,
        forwarding_address: String,
        external_route_tag: u32,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct LinkRecord {
    pub id: String,
    pub data: String,
    #[serde(rename = "type")]
    pub link_type: u8,
    pub tos_count: u8,
    pub metric: u16,
}

#[derive(Clone, Debug, Serialize)]
pub struct AttachedRtrRecord {
    pub id: String,
}

// ===== impl LsaRecord =====

impl LsaRecord {
    pub fn new(lsa: &Lsa, time: DateTime<Utc>) -> LsaRecord {
        let body = match &lsa.body {
            LsaBody::Router(router) => LsaRecordBody::Router {
                router_lsa_options_b: router
                    .flags
                    .contains(LsaRouterFlags::B),
                router_lsa_options_e: router
                    .flags
                    .contains(LsaRouterFlags::E),
                router_lsa_options_v: router
                    .flags
                    .contains(LsaRouterFlags::V),
                link_count: router.links.len() as u16,
                links: router
                    .links
                    .iter()
                    .map(|link| LinkRecord {
                        id: link.link_id.to_string(),
                        data: link.link_data.to_string(),
                        link_type: link.link_type as u8,
                        tos_count: 0,
                        metric: link.metric,
                    })
                    .collect(),
            },
            LsaBody::Network(network) => LsaRecordBody::Network {
                network_mask: network.mask.to_string(),
                routers: network
                    .attached_rtrs
                    .iter()
                    .map(|rtr| AttachedRtrRecord {
                        id: rtr.to_string(),
                    })
                    .collect(),
            },
            LsaBody::AsExternal(external) => LsaRecordBody::AsExternal {
                network_mask: external.mask.to_string(),
                is_type_2: external
                    .flags
                    .contains(LsaAsExternalFlags::E),
                metric: external.metric,
                forwarding_address: external
                    .fwd_addr
                    .unwrap_or(Ipv4Addr::UNSPECIFIED)
                    .to_string(),
                external_route_tag: external.tag,
            },
        };

        LsaRecord {
            timestamp: time.timestamp_millis(),
            ls_type: lsa.hdr.lsa_type.0,
            ls_id: lsa.hdr.lsa_id.to_string(),
            ls_advertising_router: lsa.hdr.adv_rtr.to_string(),
            body,
        }
    }

    // Renders the record as one line of the archival stream.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
