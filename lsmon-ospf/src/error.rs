//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;

use tracing::warn;

use crate::packet::error::DecodeError;

// Protocol errors.
#[derive(Debug)]
pub enum Error {
    // Packet input
    PacketDecodeError(DecodeError),
    // Caller contract
    AreaIdMismatch(Ipv4Addr, Ipv4Addr),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::PacketDecodeError(error) => {
                warn!(%error, "{}", self);
            }
            Error::AreaIdMismatch(area_id, expected) => {
                warn!(%area_id, %expected, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::PacketDecodeError(..) => {
                write!(f, "failed to decode LSA")
            }
            Error::AreaIdMismatch(..) => {
                write!(f, "area ID mismatch")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PacketDecodeError(error) => Some(error),
            _ => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(error: DecodeError) -> Error {
        Error::PacketDecodeError(error)
    }
}
