// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Portions of this module follow the structure of `tari_core`'s
// `transaction_components::TransactionInput` (`base_layer/core/src/transactions/transaction_components/transaction_input.rs`),
// itself derived in part from the Grin project's transaction input, issued under the Apache
// License, Version 2.0.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tari_utilities::ByteArray;

use crate::{
    consensus::{ConsensusDecoding, ConsensusEncoding},
    types::Commitment,
};

bitflags! {
    /// Per spec.md §3: `{Plain, Coinbase}`.
    #[derive(Serialize, Deserialize, Default)]
    pub struct OutputFeatures: u8 {
        const PLAIN = 0b0000_0000;
        const COINBASE = 0b0000_0001;
    }
}

/// A reference to an output being spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub commitment: Commitment,
    pub features: OutputFeatures,
}

impl TransactionInput {
    pub fn new(commitment: Commitment, features: OutputFeatures) -> Self {
        Self { commitment, features }
    }

    pub fn is_coinbase(&self) -> bool {
        self.features.contains(OutputFeatures::COINBASE)
    }
}

impl PartialOrd for TransactionInput {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransactionInput {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.commitment.as_bytes().cmp(other.commitment.as_bytes())
    }
}

impl ConsensusEncoding for OutputFeatures {
    fn consensus_encode<W: std::io::Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        writer.write_all(&[self.bits()])
    }
}

impl ConsensusDecoding for OutputFeatures {
    fn consensus_decode<R: std::io::Read>(reader: &mut R) -> Result<Self, std::io::Error> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        OutputFeatures::from_bits(buf[0])
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "unknown output feature bits"))
    }
}

impl ConsensusEncoding for TransactionInput {
    fn consensus_encode<W: std::io::Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        self.commitment.consensus_encode(writer)?;
        self.features.consensus_encode(writer)
    }
}

impl ConsensusDecoding for TransactionInput {
    fn consensus_decode<R: std::io::Read>(reader: &mut R) -> Result<Self, std::io::Error> {
        let commitment = Commitment::consensus_decode(reader)?;
        let features = OutputFeatures::consensus_decode(reader)?;
        Ok(TransactionInput::new(commitment, features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitmentFactory, HomomorphicCommitmentFactory, PrivateKey, SecretKeyTrait};

    #[test]
    fn coinbase_flag_round_trips() {
        let factory = CommitmentFactory::default();
        let commitment = factory.commit_value(&PrivateKey::random(&mut rand::rngs::OsRng), 10);
        let input = TransactionInput::new(commitment, OutputFeatures::COINBASE);
        assert!(input.is_coinbase());
    }
}
