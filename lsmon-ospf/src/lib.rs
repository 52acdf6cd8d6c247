//
// Copyright (c) The Lsmon Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod archive;
pub mod debug;
pub mod error;
pub mod events;
pub mod instance;
pub mod lsdb;
pub mod packet;
