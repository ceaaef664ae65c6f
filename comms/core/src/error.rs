// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Error taxonomy per spec.md §7: `HandshakeError` and `SocketFailure` are distinct from the
// validator's `BadData`/`ChainMissingData` (those live in `mwc_core::validation::ValidationError`)
// because the propagation rules differ — a handshake failure closes the connection without a
// ban, a bad-data failure from the peer attributes a ban reason.

use thiserror::Error;

/// `HandshakeError` per spec.md §6: genesis mismatch, version mismatch, or a duplicate nonce
/// (self-connection).
#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("genesis hash mismatch: ours {ours}, theirs {theirs}")]
    GenesisMismatch { ours: String, theirs: String },
    #[error("no common protocol version: ours {ours}, theirs {theirs}")]
    NoCommonVersion { ours: u32, theirs: u32 },
    #[error("peer nonce {0} matches our own: refusing self-connection")]
    SelfConnection(u64),
    #[error("io error during handshake: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed handshake message: {0}")]
    Malformed(String),
}

/// `ConnectionError` covers everything the connection loop can fail with per spec.md §4.2/§7:
/// I/O failure escalates to terminate; rate-limiting and bans are distinct outcomes the message
/// processor (P) decides on, not the connection itself.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("handshake failed: {0}")]
    Handshake(#[from] HandshakeError),
    #[error("socket failure: {0}")]
    SocketFailure(#[from] std::io::Error),
    #[error("wire codec error: {0}")]
    Codec(String),
    #[error("send queue at capacity, message dropped")]
    SendQueueFull,
}
