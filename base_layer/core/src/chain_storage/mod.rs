// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Per spec.md §2/§7, the chain store `S` is an external collaborator: "only its interface is
// normative". `lmdb_db/` is left in the tree as grounding for a real persisted backend but is
// not wired in here; `memory_store` is the in-memory test double the validator is exercised
// against.

pub mod error;
pub mod memory_store;

pub use error::ChainStorageError;
pub use memory_store::MemoryChainStore;

use crate::{
    blocks::{BlockHeader, BlockSums},
    types::Hash,
};

/// `OutputLocation` per spec.md §3: where a commitment was first added to the output MMR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLocation {
    pub block_height: u64,
    pub mmr_index: u64,
}

/// The read surface `ValidateBlock` needs from persisted chain state. Per spec.md §7, write
/// operations are owned by the out-of-core pipeline and are not part of this interface.
pub trait ChainStore {
    fn get_output_position(&self, commitment: &crate::types::Commitment) -> Result<Option<OutputLocation>, ChainStorageError>;
    fn get_block_sums(&self, hash: &Hash) -> Result<Option<BlockSums>, ChainStorageError>;
    fn get_block_header(&self, hash: &Hash) -> Result<Option<BlockHeader>, ChainStorageError>;
}
