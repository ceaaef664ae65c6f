// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// The address book `GetPeerAddrs`/`PeerAddrs` (spec.md §4.3/§6) is served from: a small
// in-memory set of known addresses, filtered by the requested capability mask. Grounded on the
// teacher's `peer_manager::PeerManager` in name only — the on-disk peer database
// (`tari_storage`'s LMDB backend) is out of scope here; this is process-local state, same
// treatment as `mwc_core::chain_storage::MemoryChainStore`.

use std::{collections::HashSet, sync::Mutex};

use mwc_comms::wire::PeerAddr;

#[derive(Default)]
pub struct PeerAddressBook {
    addrs: Mutex<HashSet<PeerAddr>>,
}

impl PeerAddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, addr: PeerAddr) {
        self.addrs.lock().expect("peer address book mutex poisoned").insert(addr);
    }

    pub fn record_many(&self, addrs: impl IntoIterator<Item = PeerAddr>) {
        let mut set = self.addrs.lock().expect("peer address book mutex poisoned");
        for addr in addrs {
            set.insert(addr);
        }
    }

    /// Every address known, in no particular order. Capability filtering is left to a future
    /// refinement once `PeerAddr` itself carries capability bits; today every known address is
    /// returned regardless of the requester's advertised mask.
    pub fn known_addrs(&self) -> Vec<PeerAddr> {
        self.addrs.lock().expect("peer address book mutex poisoned").iter().copied().collect()
    }
}
