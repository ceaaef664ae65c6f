// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// An abstract collaborator for the block/header/kernel lookups a message processor serves to
// peers (`GetBlock`, `GetHeaders`, `GetCompactBlock`, `KernelDataRequest`) — distinct from
// `mwc_core::chain_storage::ChainStore`, whose interface is scoped to what the validator (V)
// needs (output positions, block sums, the immediately-preceding header). Kept as its own trait
// in the same spirit `ChainStore`/`MmrView`/`RangeProofVerifier` were: an external collaborator
// spec.md names (the "chain" a node talks to) but doesn't fully specify the read-side shape of.

use std::collections::HashMap;

use mwc_core::{
    blocks::{BlockHeader, FullBlock},
    transactions::TransactionKernel,
    types::Hash,
};

pub trait ChainDataSource: Send + Sync {
    fn get_header_by_hash(&self, hash: &Hash) -> Option<BlockHeader>;
    fn get_block_by_hash(&self, hash: &Hash) -> Option<FullBlock>;
    /// Walks forward from the first hash in `locator` that this node recognises, per spec.md
    /// §4.3's `GetHeaders`/`Headers` pair, up to `max`.
    fn get_headers_after(&self, locator: &[Hash], max: usize) -> Vec<BlockHeader>;
    fn get_kernels_in_range(&self, start_height: u64, end_height: u64) -> Vec<TransactionKernel>;
}

/// An in-memory `ChainDataSource`, keyed by block hash and height, for tests and a
/// single-process node.
#[derive(Default)]
pub struct MemoryChainDataSource {
    by_hash: HashMap<Hash, FullBlock>,
    by_height: HashMap<u64, Hash>,
}

impl MemoryChainDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, block: FullBlock) {
        let hash = block.hash();
        self.by_height.insert(block.header.height, hash);
        self.by_hash.insert(hash, block);
    }
}

impl ChainDataSource for MemoryChainDataSource {
    fn get_header_by_hash(&self, hash: &Hash) -> Option<BlockHeader> {
        self.by_hash.get(hash).map(|b| b.header.clone())
    }

    fn get_block_by_hash(&self, hash: &Hash) -> Option<FullBlock> {
        self.by_hash.get(hash).cloned()
    }

    fn get_headers_after(&self, locator: &[Hash], max: usize) -> Vec<BlockHeader> {
        let start_height = locator
            .iter()
            .filter_map(|h| self.by_hash.get(h))
            .map(|b| b.header.height)
            .max()
            .map(|h| h + 1)
            .unwrap_or(0);

        let mut headers = Vec::new();
        let mut height = start_height;
        while headers.len() < max {
            match self.by_height.get(&height).and_then(|hash| self.by_hash.get(hash)) {
                Some(block) => headers.push(block.header.clone()),
                None => break,
            }
            height += 1;
        }
        headers
    }

    fn get_kernels_in_range(&self, start_height: u64, end_height: u64) -> Vec<TransactionKernel> {
        (start_height..=end_height)
            .filter_map(|height| self.by_height.get(&height).and_then(|hash| self.by_hash.get(hash)))
            .flat_map(|block| block.body.kernels.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use mwc_core::{blocks::BlockHeader, transactions::AggregateBody};

    use super::*;

    fn block(height: u64, previous_hash: Hash) -> FullBlock {
        let header = BlockHeader {
            height,
            previous_hash,
            timestamp: 0,
            output_mmr_root: [0u8; 32],
            rangeproof_mmr_root: [0u8; 32],
            kernel_mmr_root: [0u8; 32],
            total_kernel_offset: Default::default(),
            total_difficulty: height,
            pow_data: Vec::new(),
        };
        FullBlock::new(header, AggregateBody::default())
    }

    #[test]
    fn walks_forward_from_the_best_known_locator_entry() {
        let mut source = MemoryChainDataSource::new();
        let genesis = block(0, [0u8; 32]);
        let genesis_hash = genesis.hash();
        source.insert(genesis);
        let b1 = block(1, genesis_hash);
        let b1_hash = b1.hash();
        source.insert(b1);
        source.insert(block(2, b1_hash));

        let headers = source.get_headers_after(&[genesis_hash], 10);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].height, 1);
        assert_eq!(headers[1].height, 2);
    }

    #[test]
    fn unknown_locator_starts_from_genesis() {
        let mut source = MemoryChainDataSource::new();
        source.insert(block(0, [0u8; 32]));
        let headers = source.get_headers_after(&[[9u8; 32]], 10);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].height, 0);
    }

    #[test]
    fn respects_the_max_cap() {
        let mut source = MemoryChainDataSource::new();
        let mut previous = [0u8; 32];
        for height in 0..5 {
            let b = block(height, previous);
            previous = b.hash();
            source.insert(b);
        }
        let headers = source.get_headers_after(&[], 3);
        assert_eq!(headers.len(), 3);
    }
}
