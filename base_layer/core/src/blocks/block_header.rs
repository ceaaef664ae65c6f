// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Field set per spec.md §3 "BlockHeader". Proof-of-work fields are represented as an opaque
// `pow_data` byte vector plus `total_difficulty`, since proof-of-work validation itself is out
// of scope for this component (spec.md's `check_pow` is a no-op in every pack repo that carries
// one — see `StriderDM-tari/base_layer/core/src/blocks/block.rs::check_pow`).

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::{
    consensus::{ConsensusDecoding, ConsensusEncoding},
    types::{Hash, PrivateKey},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    pub previous_hash: Hash,
    pub timestamp: i64,
    pub output_mmr_root: Hash,
    pub rangeproof_mmr_root: Hash,
    pub kernel_mmr_root: Hash,
    pub total_kernel_offset: PrivateKey,
    pub total_difficulty: u64,
    pub pow_data: Vec<u8>,
}

impl BlockHeader {
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    pub fn hash(&self) -> Hash {
        crate::types::domain_hash(
            "block_header",
            &[
                &self.height.to_be_bytes(),
                &self.previous_hash,
                &self.timestamp.to_be_bytes(),
                &self.output_mmr_root,
                &self.rangeproof_mmr_root,
                &self.kernel_mmr_root,
            ],
        )
    }
}

/// Defensive upper bound on decoded `pow_data`'s byte length, so a corrupt length prefix can't
/// force an unbounded allocation.
const MAX_POW_DATA_LEN: u64 = 4 * 1024;

impl ConsensusEncoding for BlockHeader {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        self.height.consensus_encode(writer)?;
        self.previous_hash.consensus_encode(writer)?;
        self.timestamp.consensus_encode(writer)?;
        self.output_mmr_root.consensus_encode(writer)?;
        self.rangeproof_mmr_root.consensus_encode(writer)?;
        self.kernel_mmr_root.consensus_encode(writer)?;
        self.total_kernel_offset.consensus_encode(writer)?;
        self.total_difficulty.consensus_encode(writer)?;
        (self.pow_data.len() as u64).consensus_encode(writer)?;
        writer.write_all(&self.pow_data)
    }
}

impl ConsensusDecoding for BlockHeader {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let height = u64::consensus_decode(reader)?;
        let previous_hash = Hash::consensus_decode(reader)?;
        let timestamp = i64::consensus_decode(reader)?;
        let output_mmr_root = Hash::consensus_decode(reader)?;
        let rangeproof_mmr_root = Hash::consensus_decode(reader)?;
        let kernel_mmr_root = Hash::consensus_decode(reader)?;
        let total_kernel_offset = PrivateKey::consensus_decode(reader)?;
        let total_difficulty = u64::consensus_decode(reader)?;
        let len = u64::consensus_decode(reader)?;
        if len > MAX_POW_DATA_LEN {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "pow_data too long"));
        }
        let mut pow_data = vec![0u8; len as usize];
        reader.read_exact(&mut pow_data)?;
        Ok(BlockHeader {
            height,
            previous_hash,
            timestamp,
            output_mmr_root,
            rangeproof_mmr_root,
            kernel_mmr_root,
            total_kernel_offset,
            total_difficulty,
            pow_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(height: u64) -> BlockHeader {
        BlockHeader {
            height,
            previous_hash: [0u8; 32],
            timestamp: 0,
            output_mmr_root: [0u8; 32],
            rangeproof_mmr_root: [0u8; 32],
            kernel_mmr_root: [0u8; 32],
            total_kernel_offset: PrivateKey::default(),
            total_difficulty: 1,
            pow_data: Vec::new(),
        }
    }

    #[test]
    fn genesis_detection() {
        assert!(header(0).is_genesis());
        assert!(!header(1).is_genesis());
    }

    #[test]
    fn hash_is_stable_and_sensitive_to_height() {
        assert_eq!(header(5).hash(), header(5).hash());
        assert_ne!(header(5).hash(), header(6).hash());
    }
}
