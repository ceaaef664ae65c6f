// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use tari_utilities::ByteArray;

use super::transaction_input::OutputFeatures;
use crate::{
    consensus::{ConsensusDecoding, ConsensusEncoding},
    types::Commitment,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub commitment: Commitment,
    pub features: OutputFeatures,
    #[serde(with = "serde_bytes_vec")]
    pub range_proof: Vec<u8>,
}

impl TransactionOutput {
    pub fn new(commitment: Commitment, features: OutputFeatures, range_proof: Vec<u8>) -> Self {
        Self {
            commitment,
            features,
            range_proof,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.features.contains(OutputFeatures::COINBASE)
    }
}

impl PartialOrd for TransactionOutput {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransactionOutput {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.commitment.as_bytes().cmp(other.commitment.as_bytes())
    }
}

/// Defensive upper bound on a decoded range-proof's byte length, so a corrupt length prefix
/// can't force an unbounded allocation.
const MAX_RANGE_PROOF_LEN: u64 = 16 * 1024;

impl ConsensusEncoding for TransactionOutput {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        self.commitment.consensus_encode(writer)?;
        self.features.consensus_encode(writer)?;
        (self.range_proof.len() as u64).consensus_encode(writer)?;
        writer.write_all(&self.range_proof)
    }
}

impl ConsensusDecoding for TransactionOutput {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let commitment = Commitment::consensus_decode(reader)?;
        let features = OutputFeatures::consensus_decode(reader)?;
        let len = u64::consensus_decode(reader)?;
        if len > MAX_RANGE_PROOF_LEN {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "range proof too long"));
        }
        let mut range_proof = vec![0u8; len as usize];
        reader.read_exact(&mut range_proof)?;
        Ok(TransactionOutput::new(commitment, features, range_proof))
    }
}

mod serde_bytes_vec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(d)
    }
}
