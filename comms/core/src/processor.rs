// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// The connection loop's view of "dispatch to processor" (spec.md §4.2 step 4): a narrow trait
// the message processor (component P, crate `mwc_p2p`) implements, so this crate never depends
// on `mwc_p2p` — the dependency runs the other way, matching the teacher's layering where
// `comms` has no knowledge of `base_node`'s `inbound_handlers`.

use crate::{connection::ConnectionId, wire::{BanReasonKind, Message}};

/// What the connection loop should do once a message has been handed off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// Keep the connection open; nothing further to do.
    Continue,
    /// Close the connection without banning the peer (e.g. `Syncing`, `ResourceNotFound`).
    Disconnect,
    /// Close the connection and record a ban reason against the peer (spec.md §7).
    Ban(BanReasonKind),
}

/// Implemented by the message processor (P) and handed to each `Connection` so the connection
/// loop can dispatch inbound messages without knowing anything about their handling.
pub trait MessageProcessor: Send + Sync {
    fn process_message(&self, connection_id: ConnectionId, message: Message) -> ProcessingOutcome;
}
