// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// An in-memory stand-in for the real persisted chain store, used in the validator's own tests
// and by anything downstream that needs a `ChainStore` without standing up storage.

use std::{
    collections::HashMap,
    sync::RwLock,
};

use tari_utilities::ByteArray;

use super::{ChainStorageError, ChainStore, OutputLocation};
use crate::{
    blocks::{BlockHeader, BlockSums},
    types::{Commitment, Hash},
};

#[derive(Default)]
pub struct MemoryChainStore {
    headers: RwLock<HashMap<Hash, BlockHeader>>,
    sums: RwLock<HashMap<Hash, BlockSums>>,
    output_positions: RwLock<HashMap<Vec<u8>, OutputLocation>>,
}

impl MemoryChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_header(&self, hash: Hash, header: BlockHeader) {
        self.headers.write().unwrap().insert(hash, header);
    }

    pub fn insert_block_sums(&self, hash: Hash, sums: BlockSums) {
        self.sums.write().unwrap().insert(hash, sums);
    }

    pub fn insert_output_position(&self, commitment: &Commitment, location: OutputLocation) {
        self.output_positions
            .write()
            .unwrap()
            .insert(commitment.as_bytes().to_vec(), location);
    }
}

impl ChainStore for MemoryChainStore {
    fn get_output_position(&self, commitment: &Commitment) -> Result<Option<OutputLocation>, ChainStorageError> {
        Ok(self.output_positions.read().unwrap().get(commitment.as_bytes()).copied())
    }

    fn get_block_sums(&self, hash: &Hash) -> Result<Option<BlockSums>, ChainStorageError> {
        Ok(self.sums.read().unwrap().get(hash).cloned())
    }

    fn get_block_header(&self, hash: &Hash) -> Result<Option<BlockHeader>, ChainStorageError> {
        Ok(self.headers.read().unwrap().get(hash).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitmentFactory, HomomorphicCommitmentFactory, PrivateKey, SecretKeyTrait};

    #[test]
    fn round_trips_an_output_position() {
        let store = MemoryChainStore::new();
        let factory = CommitmentFactory::default();
        let commitment = factory.commit_value(&PrivateKey::random(&mut rand::rngs::OsRng), 5);
        store.insert_output_position(&commitment, OutputLocation {
            block_height: 10,
            mmr_index: 3,
        });
        let found = store.get_output_position(&commitment).unwrap().unwrap();
        assert_eq!(found.block_height, 10);
        assert_eq!(found.mmr_index, 3);
    }

    #[test]
    fn missing_header_returns_none() {
        let store = MemoryChainStore::new();
        assert!(store.get_block_header(&[0u8; 32]).unwrap().is_none());
    }
}
