// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// A peer record as learned from a completed handshake, in the spirit of the teacher's
// `peer_manager::Peer` (address, features, last-seen bookkeeping) but without the on-disk
// `PeerManager` database — peer state here is process-local, held by the connection manager's
// id-keyed table (spec.md §9 design note).

use bitflags::bitflags;
use chrono::{DateTime, Utc};

use crate::wire::PeerAddr;

bitflags! {
    /// Capability/feature bits advertised in a `Hand`/`Shake`, mirroring the teacher's
    /// `peer_manager::PeerFeatures` bitflag convention.
    pub struct PeerCapabilities: u32 {
        const NONE = 0b0000_0000;
        const FULL_NODE = 0b0000_0001;
    }
}

/// What a completed handshake establishes about the peer on the other end of the socket.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerInfo {
    pub addr: PeerAddr,
    pub capabilities: PeerCapabilities,
    pub user_agent: String,
    pub protocol_version: u32,
    pub total_difficulty: u64,
    pub connected_at: DateTime<Utc>,
}

impl PeerInfo {
    pub fn new(addr: PeerAddr, capabilities: u32, user_agent: String, protocol_version: u32, total_difficulty: u64) -> Self {
        Self {
            addr,
            capabilities: PeerCapabilities::from_bits_truncate(capabilities),
            user_agent,
            protocol_version,
            total_difficulty,
            connected_at: Utc::now(),
        }
    }
}
