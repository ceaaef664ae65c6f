// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! A Tor control-port client (spec.md §6/§9): publishing and tearing down hidden services for
//! the P2P listener, line-parsed with an explicit small state machine rather than ad-hoc string
//! matching. Out-of-core: `mwc_comms`/`mwc_p2p` never depend on this crate.

pub mod client;
pub mod error;
pub mod parser;

pub use client::{ServiceId, TorControl, TorControlClient};
pub use error::TorError;
