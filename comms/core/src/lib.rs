// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! The peer-to-peer connection engine (component N of spec.md §4.2): wire framing, the
//! Hand/Shake handshake, and a thread-per-connection loop with a send queue, rate limiter and
//! ban list. `base_layer/p2p` (component P) implements [`processor::MessageProcessor`] against
//! this crate to decide what each inbound message means.

pub mod connection;
pub mod error;
pub mod handshake;
pub mod manager;
pub mod peer;
pub mod processor;
pub mod rate_limit;
pub mod wire;

pub use connection::{ChainTipProvider, ConnectionConfig, ConnectionEvent, ConnectionHandle, ConnectionId};
pub use error::{ConnectionError, HandshakeError};
pub use handshake::{random_nonce, HandshakeConfig};
pub use manager::ConnectionManager;
pub use peer::{PeerCapabilities, PeerInfo};
pub use processor::{MessageProcessor, ProcessingOutcome};
