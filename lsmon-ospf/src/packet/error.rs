//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

// Type aliases.
pub type DecodeResult<T> = Result<T, DecodeError>;

// LSA decode errors.
//
// All of these are fatal to the advertisement being decoded, never to the
// process: the event is discarded and counted by the caller.
#[derive(Debug, Deserialize, Serialize)]
pub enum DecodeError {
    InvalidLength(u16),
    InvalidLsaLength,
    InvalidChecksum,
    UnknownLsaType(u8),
    UnknownRouterLinkType(u8),
    UnsupportedTosCount(u8),
}

// ===== impl DecodeError =====

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::InvalidLength(length) => {
                write!(f, "invalid header length: {}", length)
            }
            DecodeError::InvalidLsaLength => {
                write!(f, "invalid LSA length")
            }
            DecodeError::InvalidChecksum => {
                write!(f, "invalid LSA checksum")
            }
            DecodeError::UnknownLsaType(lsa_type) => {
                write!(f, "unsupported LSA type: {}", lsa_type)
            }
            DecodeError::UnknownRouterLinkType(link_type) => {
                write!(f, "unknown link type: {}", link_type)
            }
            DecodeError::UnsupportedTosCount(num_tos) => {
                write!(f, "unsupported non-zero TOS count: {}", num_tos)
            }
        }
    }
}

impl std::error::Error for DecodeError {}
