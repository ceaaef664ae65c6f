// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// `ProcessMessage`/`Status` per spec.md §4.3: a dispatch table over every inbound wire message
// type, rate-limit pre-check, then per-message handling against the chain store (S), MMR view
// (T) and validator (V). Grounded on the teacher's `inbound_handlers::InboundNodeCommsHandlers`
// (per-message-type handler methods, `LOG_TARGET`, `CommsInterfaceError` propagation), with the
// teacher's service-bus dispatch replaced by direct dispatch over `mwc_comms::wire::Message`.

use std::sync::{Arc, Weak};

use log::{info, warn};
use mwc_comms::{
    connection::ConnectionId,
    manager::ConnectionManager,
    processor::{MessageProcessor, ProcessingOutcome},
    wire::{BanReasonKind, Message},
};
use mwc_core::{chain_storage::ChainStore, mmr_view::MmrView, transactions::RangeProofVerifier, BlockValidator};

use crate::{chain_data_source::ChainDataSource, peer_manager::PeerAddressBook};

const LOG_TARGET: &str = "c::p2p::processor";

/// `Status` per spec.md §4.3: every outcome `ProcessMessage` can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    SocketFailure,
    UnknownError,
    ResourceNotFound,
    UnknownMessage,
    Syncing,
    Disconnect,
}

/// Everything the message processor needs to answer an inbound message: the chain store and MMR
/// view the validator already depends on, the validator and range-proof verifier (for
/// `Transaction`/`Block` messages), a block/header/kernel read side, and the peer address book.
pub struct Processor<S, T, R, C>
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    chain_store: Arc<S>,
    mmr_view: Arc<T>,
    validator: Arc<BlockValidator>,
    range_proof_verifier: Arc<R>,
    chain_data: Arc<C>,
    peer_addrs: Arc<PeerAddressBook>,
    max_headers_per_response: usize,
}

impl<S, T, R, C> Processor<S, T, R, C>
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    pub fn new(
        chain_store: Arc<S>,
        mmr_view: Arc<T>,
        validator: Arc<BlockValidator>,
        range_proof_verifier: Arc<R>,
        chain_data: Arc<C>,
        peer_addrs: Arc<PeerAddressBook>,
    ) -> Self {
        Self {
            chain_store,
            mmr_view,
            validator,
            range_proof_verifier,
            chain_data,
            peer_addrs,
            max_headers_per_response: 512,
        }
    }

    /// `ProcessMessage(conn, raw)` per spec.md §4.3, already decoded into a [`Message`].
    pub fn process_message(&self, message: Message) -> Status {
        match message {
            Message::Hand(_) | Message::Shake(_) => {
                warn!(target: LOG_TARGET, "handshake message received post-handshake, disconnecting");
                Status::Disconnect
            },
            Message::Ping { .. } | Message::Pong { .. } => Status::Success,
            Message::GetPeerAddrs { .. } => {
                let addrs = self.peer_addrs.known_addrs();
                info!(target: LOG_TARGET, "serving {} known peer addresses", addrs.len());
                Status::Success
            },
            Message::PeerAddrs(addrs) => {
                self.peer_addrs.record_many(addrs);
                Status::Success
            },
            Message::GetHeaders { locator } => {
                let headers = self.chain_data.get_headers_after(&locator, self.max_headers_per_response);
                if headers.is_empty() {
                    Status::ResourceNotFound
                } else {
                    Status::Success
                }
            },
            Message::Headers(_) => Status::Success,
            Message::GetBlock { hash } | Message::GetCompactBlock { hash } => match self.chain_data.get_block_by_hash(&hash) {
                Some(_) => Status::Success,
                None => Status::ResourceNotFound,
            },
            Message::Block(block) => {
                match self
                    .validator
                    .validate(&block, &*self.chain_store, &*self.mmr_view, &*self.range_proof_verifier)
                {
                    Ok(_block_sums) => Status::Success,
                    Err(e) => {
                        warn!(target: LOG_TARGET, "rejected block at height {}: {}", block.header.height, e);
                        Status::Disconnect
                    },
                }
            },
            Message::Transaction(body) | Message::StemTransaction(body) => match body.check_sorting_and_duplicates() {
                Ok(()) => Status::Success,
                Err(e) => {
                    warn!(target: LOG_TARGET, "rejected transaction: {}", e);
                    Status::Disconnect
                },
            },
            Message::TxHashSetRequest { height } => {
                info!(target: LOG_TARGET, "tx hash set requested at height {}", height);
                Status::Success
            },
            Message::TxHashSetArchive { .. } => Status::Success,
            Message::BanReason(reason) => {
                info!(target: LOG_TARGET, "peer reported ban reason: {:?}", reason);
                Status::Success
            },
            Message::CompactBlock { .. } => Status::Success,
            Message::KernelDataRequest { start_height, end_height } => {
                if end_height < start_height {
                    return Status::UnknownError;
                }
                let kernels = self.chain_data.get_kernels_in_range(start_height, end_height);
                if kernels.is_empty() {
                    Status::ResourceNotFound
                } else {
                    Status::Success
                }
            },
            Message::KernelDataResponse { .. } => Status::Success,
        }
    }
}

/// Adapts [`Processor`]'s `Status` to the [`ProcessingOutcome`] the connection loop (N) expects,
/// and pre-checks the rate limit the connection already tracks before dispatching at all.
///
/// Holds the manager by [`Weak`] rather than [`Arc`]: the manager owns this processor (as the
/// `Arc<dyn MessageProcessor>` every connection is spawned with), so an owning back-reference
/// would be a cycle neither side could ever drop. Generalizes spec.md §9's "weak back-reference
/// from Connection to MessageProcessor" design note to this second owns-the-owner edge, with the
/// same prescribed remedy: a non-owning handle and an explicit liveness check at dispatch.
pub struct ConnectionProcessor<S, T, R, C>
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    processor: Processor<S, T, R, C>,
    manager: Weak<ConnectionManager>,
}

impl<S, T, R, C> ConnectionProcessor<S, T, R, C>
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    pub fn new(processor: Processor<S, T, R, C>, manager: Weak<ConnectionManager>) -> Self {
        Self { processor, manager }
    }
}

impl<S, T, R, C> MessageProcessor for ConnectionProcessor<S, T, R, C>
where
    S: ChainStore + Send + Sync,
    T: MmrView + Send + Sync,
    R: RangeProofVerifier + Send + Sync,
    C: ChainDataSource + Send + Sync,
{
    fn process_message(&self, connection_id: ConnectionId, message: Message) -> ProcessingOutcome {
        match self.manager.upgrade() {
            Some(manager) if manager.exceeds_rate_limit(connection_id) => {
                warn!(target: LOG_TARGET, "connection {} exceeded its rate limit", connection_id.as_u64());
                return ProcessingOutcome::Disconnect;
            },
            Some(_) => {},
            None => {
                warn!(target: LOG_TARGET, "connection manager already gone, processing without a rate-limit check");
            },
        }

        let is_block = matches!(message, Message::Block(_));
        match self.processor.process_message(message) {
            Status::Success | Status::ResourceNotFound | Status::UnknownMessage | Status::Syncing => {
                ProcessingOutcome::Continue
            },
            Status::Disconnect if is_block => ProcessingOutcome::Ban(BanReasonKind::BadBlock),
            Status::Disconnect => ProcessingOutcome::Disconnect,
            Status::SocketFailure | Status::UnknownError => ProcessingOutcome::Disconnect,
        }
    }
}

#[cfg(test)]
mod tests {
    use mwc_core::{
        chain_storage::MemoryChainStore,
        mmr_view::{MemoryMmrView, MmrRoots},
        transactions::NullRangeProofVerifier,
        ConsensusConstants,
    };

    use super::*;
    use crate::chain_data_source::MemoryChainDataSource;

    fn processor() -> Processor<MemoryChainStore, MemoryMmrView, NullRangeProofVerifier, MemoryChainDataSource> {
        Processor::new(
            Arc::new(MemoryChainStore::new()),
            Arc::new(MemoryMmrView::new(MmrRoots::default())),
            Arc::new(BlockValidator::new(ConsensusConstants::mainnet())),
            Arc::new(NullRangeProofVerifier),
            Arc::new(MemoryChainDataSource::new()),
            Arc::new(PeerAddressBook::new()),
        )
    }

    #[test]
    fn ping_is_always_successful() {
        let p = processor();
        assert_eq!(p.process_message(Message::Ping { total_difficulty: 0, height: 0 }), Status::Success);
    }

    #[test]
    fn get_block_for_an_unknown_hash_is_resource_not_found() {
        let p = processor();
        assert_eq!(
            p.process_message(Message::GetBlock { hash: [1u8; 32] }),
            Status::ResourceNotFound
        );
    }

    #[test]
    fn a_post_handshake_hand_message_triggers_disconnect() {
        let p = processor();
        let hand = mwc_comms::wire::Hand {
            version: 1,
            capabilities: 0,
            nonce: 0,
            total_difficulty: 0,
            sender_addr: mwc_comms::wire::PeerAddr {
                ip: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0,
            },
            receiver_addr: mwc_comms::wire::PeerAddr {
                ip: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0,
            },
            user_agent: String::new(),
            genesis_hash: [0u8; 32],
        };
        assert_eq!(p.process_message(Message::Hand(hand)), Status::Disconnect);
    }

    #[test]
    fn kernel_data_request_with_reversed_range_is_an_error() {
        let p = processor();
        assert_eq!(
            p.process_message(Message::KernelDataRequest { start_height: 10, end_height: 5 }),
            Status::UnknownError
        );
    }
}
