// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! The message processor (component P of spec.md §4.3): dispatches decoded inbound wire
//! messages from `mwc_comms` against the chain store (S), MMR view (T) and validator (V) that
//! `mwc_core` defines, plus a peer address book and a chain data source for serving read
//! requests from peers.

pub mod chain_data_source;
pub mod peer_manager;
pub mod processor;

pub use chain_data_source::{ChainDataSource, MemoryChainDataSource};
pub use peer_manager::PeerAddressBook;
pub use processor::{ConnectionProcessor, Processor, Status};
