//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;
use std::str::FromStr;

use bytes::Bytes;
use lsmon_ospf::lsdb::LSA_INIT_SEQ_NO;
use lsmon_ospf::packet::Options;
use lsmon_ospf::packet::error::DecodeError;
use lsmon_ospf::packet::lsa::*;

//
// Helper functions.
//

fn addr(s: &str) -> Ipv4Addr {
    Ipv4Addr::from_str(s).unwrap()
}

fn decode_lsa(bytes: &[u8]) -> Result<Lsa, DecodeError> {
    let mut buf = Bytes::copy_from_slice(bytes);
    Lsa::decode(&mut buf)
}

fn test_decode_roundtrip(lsa: &Lsa) {
    let mut buf = lsa.raw.clone();
    let lsa_decoded = Lsa::decode(&mut buf).unwrap();
    assert_eq!(*lsa, lsa_decoded);
}

//
// Test decoding from fixed wire bytes.
//

#[test]
fn test_decode_lsa_router() {
    let bytes = [
        // LSA header: age 1, options (E), type 1, ID 1.1.1.1,
        // advertising router 1.1.1.1, seq 0x80000001, cksum (unchecked),
        // length 48.
        0x00, 0x01, 0x02, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
        0x01, 0x80, 0x00, 0x00, 0x01, 0xf6, 0x78, 0x00, 0x30,
        // Flags (B), 2 links.
        0x01, 0x00, 0x00, 0x02,
        // Link 1: transit network.
        0x0a, 0x00, 0x01, 0x01, 0x0a, 0x00, 0x01, 0x02, 0x02, 0x00, 0x00,
        0x0a,
        // Link 2: stub network.
        0x0a, 0x00, 0x02, 0x00, 0xff, 0xff, 0xff, 0x00, 0x03, 0x00, 0x00,
        0x14,
    ];

    let lsa = decode_lsa(&bytes).unwrap();
    assert_eq!(lsa.hdr.age, 1);
    assert_eq!(lsa.hdr.options, Options::E);
    assert_eq!(lsa.hdr.lsa_type, LsaType(1));
    assert_eq!(lsa.hdr.lsa_id, addr("1.1.1.1"));
    assert_eq!(lsa.hdr.adv_rtr, addr("1.1.1.1"));
    assert_eq!(lsa.hdr.seq_no, 0x80000001);
    assert_eq!(lsa.hdr.length, 48);

    let router = lsa.body.as_router().unwrap();
    assert_eq!(router.flags, LsaRouterFlags::B);
    assert_eq!(
        router.links,
        vec![
            LsaRouterLink::new(
                LsaRouterLinkType::TransitNetwork,
                addr("10.0.1.1"),
                addr("10.0.1.2"),
                10,
            ),
            LsaRouterLink::new(
                LsaRouterLinkType::StubNetwork,
                addr("10.0.2.0"),
                addr("255.255.255.0"),
                20,
            ),
        ]
    );
}

#[test]
fn test_decode_lsa_network() {
    let bytes = [
        // LSA header: age 100, options (E), type 2, ID 192.0.2.0,
        // advertising router 10.0.0.1, seq 1, cksum (unchecked), length 32.
        0x00, 0x64, 0x02, 0x02, 0xc0, 0x00, 0x02, 0x00, 0x0a, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00, 0x01, 0x12, 0x34, 0x00, 0x20,
        // Mask 255.255.255.0, attached routers 10.0.0.2 and 10.0.0.1.
        0xff, 0xff, 0xff, 0x00, 0x0a, 0x00, 0x00, 0x02, 0x0a, 0x00, 0x00,
        0x01,
    ];

    let lsa = decode_lsa(&bytes).unwrap();
    assert_eq!(lsa.hdr.lsa_type, LsaType(2));
    assert_eq!(lsa.hdr.lsa_id, addr("192.0.2.0"));

    let network = lsa.body.as_network().unwrap();
    assert_eq!(network.mask, addr("255.255.255.0"));
    // Wire order is preserved.
    assert_eq!(
        network.attached_rtrs,
        vec![addr("10.0.0.2"), addr("10.0.0.1")]
    );
}

#[test]
fn test_decode_lsa_as_external() {
    let bytes = [
        // LSA header: age 10, options (E), type 5, ID 198.51.100.0,
        // advertising router 10.0.0.3, seq 0x80000002, cksum (unchecked),
        // length 36.
        0x00, 0x0a, 0x02, 0x05, 0xc6, 0x33, 0x64, 0x00, 0x0a, 0x00, 0x00,
        0x03, 0x80, 0x00, 0x00, 0x02, 0xab, 0xcd, 0x00, 0x24,
        // Mask 255.255.255.0, type-2 metric 20, forwarding address
        // 10.0.0.9, tag 100.
        0xff, 0xff, 0xff, 0x00, 0x80, 0x00, 0x00, 0x14, 0x0a, 0x00, 0x00,
        0x09, 0x00, 0x00, 0x00, 0x64,
    ];

    let lsa = decode_lsa(&bytes).unwrap();
    let external = lsa.body.as_as_external().unwrap();
    assert_eq!(external.mask, addr("255.255.255.0"));
    assert_eq!(external.flags, LsaAsExternalFlags::E);
    assert_eq!(external.metric, 20);
    assert_eq!(external.fwd_addr, Some(addr("10.0.0.9")));
    assert_eq!(external.tag, 100);
}

#[test]
fn test_decode_lsa_as_external_no_fwd_addr() {
    let bytes = [
        0x00, 0x0a, 0x02, 0x05, 0xc6, 0x33, 0x64, 0x00, 0x0a, 0x00, 0x00,
        0x03, 0x80, 0x00, 0x00, 0x02, 0xab, 0xcd, 0x00, 0x24,
        // Type-1 metric, unspecified forwarding address.
        0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    let lsa = decode_lsa(&bytes).unwrap();
    let external = lsa.body.as_as_external().unwrap();
    assert_eq!(external.flags, LsaAsExternalFlags::empty());
    assert_eq!(external.fwd_addr, None);
    assert_eq!(external.tag, 0);
}

//
// Test encode->decode round trips.
//

#[test]
fn test_roundtrip_lsa_router() {
    let lsa = Lsa::new(
        1,
        Options::E,
        addr("1.1.1.1"),
        addr("1.1.1.1"),
        LSA_INIT_SEQ_NO,
        LsaBody::Router(LsaRouter {
            flags: LsaRouterFlags::B | LsaRouterFlags::E,
            links: vec![
                LsaRouterLink::new(
                    LsaRouterLinkType::PointToPoint,
                    addr("2.2.2.2"),
                    addr("10.0.0.1"),
                    100,
                ),
                LsaRouterLink::new(
                    LsaRouterLinkType::StubNetwork,
                    addr("10.0.0.0"),
                    addr("255.255.255.252"),
                    100,
                ),
            ],
        }),
    );
    assert_eq!(lsa.hdr.length, 48);
    test_decode_roundtrip(&lsa);

    // The link list survives decode->re-encode unchanged.
    let mut buf = lsa.raw.clone();
    let lsa_decoded = Lsa::decode(&mut buf).unwrap();
    let links = &lsa_decoded.body.as_router().unwrap().links;
    assert_eq!(*links, lsa.body.as_router().unwrap().links);
}

#[test]
fn test_roundtrip_lsa_network() {
    let lsa = Lsa::new(
        36,
        Options::E,
        addr("10.0.1.1"),
        addr("1.1.1.1"),
        LSA_INIT_SEQ_NO,
        LsaBody::Network(LsaNetwork {
            mask: addr("255.255.255.0"),
            attached_rtrs: vec![addr("1.1.1.1"), addr("2.2.2.2")],
        }),
    );
    test_decode_roundtrip(&lsa);
}

#[test]
fn test_roundtrip_lsa_as_external() {
    let lsa = Lsa::new(
        0,
        Options::E,
        addr("172.16.1.0"),
        addr("3.3.3.3"),
        LSA_INIT_SEQ_NO,
        LsaBody::AsExternal(LsaAsExternal {
            mask: addr("255.255.255.0"),
            flags: LsaAsExternalFlags::E,
            metric: 20,
            fwd_addr: None,
            tag: 0,
        }),
    );
    test_decode_roundtrip(&lsa);
}

#[test]
fn test_encode_checksum_is_valid() {
    let lsa = Lsa::new(
        0,
        Options::E,
        addr("10.0.1.1"),
        addr("1.1.1.1"),
        LSA_INIT_SEQ_NO,
        LsaBody::Network(LsaNetwork {
            mask: addr("255.255.255.0"),
            attached_rtrs: vec![addr("1.1.1.1")],
        }),
    );
    assert!(lsa.is_checksum_valid());

    // Corrupting the body must break the checksum.
    let mut bytes = lsa.raw.to_vec();
    bytes[20] ^= 0xff;
    let corrupted = decode_lsa(&bytes).unwrap();
    assert!(!corrupted.is_checksum_valid());
}

//
// Test malformed input.
//

#[test]
fn test_decode_short_header() {
    let bytes = [0x00, 0x01, 0x02, 0x01, 0x01, 0x01, 0x01, 0x01];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::InvalidLength(8))
    ));
}

#[test]
fn test_decode_invalid_header_length() {
    // Declared length smaller than the header itself.
    let bytes = [
        0x00, 0x01, 0x02, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
        0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x10,
    ];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::InvalidLsaLength)
    ));
}

#[test]
fn test_decode_router_link_count_mismatch() {
    // Two links declared, a single 12-byte record supplied.
    let bytes = [
        0x00, 0x01, 0x02, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
        0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x24,
        0x00, 0x00, 0x00, 0x02,
        0x0a, 0x00, 0x01, 0x01, 0x0a, 0x00, 0x01, 0x02, 0x02, 0x00, 0x00,
        0x0a,
    ];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::InvalidLsaLength)
    ));
}

#[test]
fn test_decode_router_nonzero_tos_count() {
    let bytes = [
        0x00, 0x01, 0x02, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
        0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x24,
        0x00, 0x00, 0x00, 0x01,
        // Link with a TOS count of 1.
        0x0a, 0x00, 0x01, 0x01, 0x0a, 0x00, 0x01, 0x02, 0x02, 0x01, 0x00,
        0x0a,
    ];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::UnsupportedTosCount(1))
    ));
}

#[test]
fn test_decode_router_unknown_link_type() {
    let bytes = [
        0x00, 0x01, 0x02, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
        0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x24,
        0x00, 0x00, 0x00, 0x01,
        0x0a, 0x00, 0x01, 0x01, 0x0a, 0x00, 0x01, 0x02, 0x09, 0x00, 0x00,
        0x0a,
    ];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::UnknownRouterLinkType(9))
    ));
}

#[test]
fn test_decode_network_unaligned_body() {
    // Body is not a whole number of attached router IDs.
    let bytes = [
        0x00, 0x64, 0x02, 0x02, 0xc0, 0x00, 0x02, 0x00, 0x0a, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00, 0x01, 0x12, 0x34, 0x00, 0x1b,
        0xff, 0xff, 0xff, 0x00, 0x0a, 0x00, 0x00,
    ];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::InvalidLsaLength)
    ));
}

#[test]
fn test_decode_as_external_short_body() {
    let bytes = [
        0x00, 0x0a, 0x02, 0x05, 0xc6, 0x33, 0x64, 0x00, 0x0a, 0x00, 0x00,
        0x03, 0x80, 0x00, 0x00, 0x02, 0xab, 0xcd, 0x00, 0x1c,
        0xff, 0xff, 0xff, 0x00, 0x80, 0x00, 0x00, 0x14,
    ];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::InvalidLsaLength)
    ));
}

#[test]
fn test_decode_unknown_lsa_type() {
    // Type 7 (NSSA) is not part of the supported set.
    let bytes = [
        0x00, 0x01, 0x02, 0x07, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
        0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x14,
    ];
    assert!(matches!(
        decode_lsa(&bytes),
        Err(DecodeError::UnknownLsaType(7))
    ));
}

#[test]
fn test_lsa_key_from_header() {
    let lsa = Lsa::new(
        0,
        Options::E,
        addr("10.0.1.1"),
        addr("1.1.1.1"),
        LSA_INIT_SEQ_NO,
        LsaBody::Network(LsaNetwork {
            mask: addr("255.255.255.0"),
            attached_rtrs: vec![addr("1.1.1.1")],
        }),
    );
    assert_eq!(
        lsa.hdr.key(),
        LsaKey::new(LsaType(2), addr("1.1.1.1"), addr("10.0.1.1"))
    );
}
