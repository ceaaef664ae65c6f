// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// `BaseNode` wires the abstract collaborators spec.md names (S, T, the validator, the
// processor) into one running node: it owns the chain store, MMR view, connection manager and
// route inventory, and accepts inbound connections on a dedicated thread. Grounded on the
// teacher's `applications/tari_miner/src/run_miner.rs` main-fn shape (config → component
// construction → run loop), generalized from the miner's GRPC polling loop to this node's
// blocking-accept P2P loop.

use std::{
    net::TcpListener,
    sync::{Arc, RwLock},
    thread::{self, JoinHandle},
};

use log::{info, warn};
use mwc_comms::{
    connection::ChainTipProvider, handshake::HandshakeConfig, manager::ConnectionManager, random_nonce,
    wire::PeerAddr, ConnectionConfig, ConnectionEvent,
};
use mwc_core::{
    chain_storage::ChainStore, mmr_view::MmrView, transactions::RangeProofVerifier, types::Hash, BlockValidator,
    ConsensusConstants,
};
use mwc_p2p::{
    processor::{ConnectionProcessor, Processor},
    ChainDataSource, PeerAddressBook,
};

const LOG_TARGET: &str = "c::base_node::node";

/// The `(total_difficulty, height)` pair outgoing `Ping`s advertise. Updated as blocks land in
/// the chain data source; held separately from `ChainStore` since `S`'s interface stays scoped
/// to exactly what the validator needs (spec.md §2), not a general "current tip" query.
pub struct SharedChainTip {
    state: RwLock<(u64, u64)>,
}

impl SharedChainTip {
    pub fn new(total_difficulty: u64, height: u64) -> Self {
        Self {
            state: RwLock::new((total_difficulty, height)),
        }
    }

    pub fn set(&self, total_difficulty: u64, height: u64) {
        *self.state.write().expect("chain tip lock poisoned") = (total_difficulty, height);
    }
}

impl ChainTipProvider for SharedChainTip {
    fn chain_tip(&self) -> (u64, u64) {
        *self.state.read().expect("chain tip lock poisoned")
    }
}

/// Everything a running node needs, generic over the same collaborators the validator and
/// message processor are (spec.md §2's S/T/V, plus the range-proof verifier and the
/// message-processor-only `ChainDataSource`).
pub struct BaseNode<S, T, R, C>
where
    S: ChainStore + Send + Sync + 'static,
    T: MmrView + Send + Sync + 'static,
    R: RangeProofVerifier + Send + Sync + 'static,
    C: ChainDataSource + Send + Sync + 'static,
{
    pub chain_store: Arc<S>,
    pub mmr_view: Arc<T>,
    pub chain_data: Arc<C>,
    pub peer_addrs: Arc<PeerAddressBook>,
    pub chain_tip: Arc<SharedChainTip>,
    pub manager: Arc<ConnectionManager>,
    genesis_hash: Hash,
}

// Manual `Clone` rather than `#[derive(Clone)]`: every field is already an `Arc`, so cloning a
// `BaseNode` should only ever require cloning those handles, not `S`/`T`/`R`/`C` themselves
// (which `derive` would otherwise demand via an `S: Clone` bound no `ChainStore` impl needs).
impl<S, T, R, C> Clone for BaseNode<S, T, R, C>
where
    S: ChainStore + Send + Sync + 'static,
    T: MmrView + Send + Sync + 'static,
    R: RangeProofVerifier + Send + Sync + 'static,
    C: ChainDataSource + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            chain_store: self.chain_store.clone(),
            mmr_view: self.mmr_view.clone(),
            chain_data: self.chain_data.clone(),
            peer_addrs: self.peer_addrs.clone(),
            chain_tip: self.chain_tip.clone(),
            manager: self.manager.clone(),
            genesis_hash: self.genesis_hash,
        }
    }
}

impl<S, T, R, C> BaseNode<S, T, R, C>
where
    S: ChainStore + Send + Sync + 'static,
    T: MmrView + Send + Sync + 'static,
    R: RangeProofVerifier + Send + Sync + 'static,
    C: ChainDataSource + Send + Sync + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        genesis_hash: Hash,
        user_agent: String,
        protocol_version: u32,
        connection_config: ConnectionConfig,
        chain_store: Arc<S>,
        mmr_view: Arc<T>,
        range_proof_verifier: Arc<R>,
        chain_data: Arc<C>,
    ) -> Self {
        let peer_addrs = Arc::new(PeerAddressBook::new());
        let chain_tip = Arc::new(SharedChainTip::new(0, 0));
        let validator = Arc::new(BlockValidator::new(ConsensusConstants::mainnet()));

        let processor = Processor::new(
            chain_store.clone(),
            mmr_view.clone(),
            validator,
            range_proof_verifier,
            chain_data.clone(),
            peer_addrs.clone(),
        );

        let (events_tx, events_rx) = std::sync::mpsc::sync_channel(64);

        let handshake_config = HandshakeConfig {
            version: protocol_version,
            capabilities: 0,
            genesis_hash,
            user_agent,
        };

        // The manager owns this connection's `ConnectionProcessor` (as its `Arc<dyn
        // MessageProcessor>`), and `ConnectionProcessor` holds a `Weak` back-reference to the
        // manager for its rate-limit check, so the manager has to be built around its own
        // not-yet-existing `Arc` via `Arc::new_cyclic`.
        let manager = Arc::new_cyclic(|weak_manager: &std::sync::Weak<ConnectionManager>| {
            let connection_processor = ConnectionProcessor::new(processor, weak_manager.clone());
            ConnectionManager::new(
                handshake_config,
                connection_config,
                Arc::new(connection_processor),
                chain_tip.clone() as Arc<dyn ChainTipProvider>,
                events_tx,
            )
        });

        // Deregisters the connection / persists the ban spec.md §4.2 requires on exit; the
        // manager is the only thing that can act on its own `ConnectionId`s, so it has to be
        // cloned into this thread rather than handled where the event is raised.
        let events_manager = manager.clone();
        thread::Builder::new()
            .name("connection-events".into())
            .spawn(move || {
                for event in events_rx {
                    match event {
                        ConnectionEvent::Disconnected { id, reason } => {
                            info!(target: LOG_TARGET, "connection {}: disconnected ({})", id.as_u64(), reason);
                            events_manager.disconnect(id);
                        },
                        ConnectionEvent::Banned { id, reason } => {
                            info!(target: LOG_TARGET, "connection {}: banned ({:?})", id.as_u64(), reason);
                            events_manager.ban_peer(id, reason);
                        },
                    }
                }
            })
            .expect("failed to spawn connection-events thread");

        Self {
            chain_store,
            mmr_view,
            chain_data,
            peer_addrs,
            chain_tip,
            manager,
            genesis_hash,
        }
    }

    /// Accepts inbound connections on `listen_addr` until the process exits; each accepted
    /// socket performs the handshake and, on success, is handed to the connection manager.
    /// Mirrors spec.md §4.2's "Connection manager accepts inbound sockets, performs handshake".
    pub fn listen(&self, listener: TcpListener) -> JoinHandle<()> {
        let node = self.clone();
        thread::Builder::new()
            .name("p2p-listener".into())
            .spawn(move || {
                for incoming in listener.incoming() {
                    let stream = match incoming {
                        Ok(stream) => stream,
                        Err(e) => {
                            warn!(target: LOG_TARGET, "accept failed: {}", e);
                            continue;
                        },
                    };
                    let peer_ip = match stream.peer_addr() {
                        Ok(addr) => addr.ip(),
                        Err(e) => {
                            warn!(target: LOG_TARGET, "could not read peer address: {}", e);
                            continue;
                        },
                    };
                    let (total_difficulty, _height) = node.chain_tip.chain_tip();
                    let our_nonce = random_nonce();
                    match node
                        .manager
                        .create_inbound(stream, peer_ip, total_difficulty, move |nonce| nonce == our_nonce)
                    {
                        Ok(id) => info!(target: LOG_TARGET, "connection {}: accepted from {}", id.as_u64(), peer_ip),
                        Err(e) => warn!(target: LOG_TARGET, "handshake with {} failed: {}", peer_ip, e),
                    }
                }
            })
            .expect("failed to spawn p2p-listener thread")
    }

    pub fn known_peer_addrs(&self) -> Vec<PeerAddr> {
        self.peer_addrs.known_addrs()
    }

    pub fn genesis_hash(&self) -> Hash {
        self.genesis_hash
    }
}
