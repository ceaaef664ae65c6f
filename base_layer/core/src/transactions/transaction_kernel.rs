// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Grounded directly on `other_examples/…transaction_kernel.rs`'s `TransactionKernel`
// (`verify_signature`, `build_kernel_challenge`, `ConsensusEncoding`/`ConsensusDecoding`),
// itself carrying a Grin-project provenance note in the original.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tari_utilities::ByteArray;

use super::{error::TransactionError, micro_coin::MicroCoin};
use crate::{
    consensus::ConsensusEncoding,
    types::{domain_hash, Commitment, Signature},
};

bitflags! {
    /// Per spec.md §3: `{Plain, Coinbase, HeightLocked, NoRecentDuplicate}`.
    #[derive(Serialize, Deserialize, Default)]
    pub struct KernelFeatures: u8 {
        const PLAIN = 0b0000_0000;
        const COINBASE_KERNEL = 0b0000_0001;
        const HEIGHT_LOCKED = 0b0000_0010;
        const NO_RECENT_DUPLICATE = 0b0000_0100;
    }
}

/// The signed part of a transaction: proves the sender knew the blinding factor of `excess`
/// and carries the transaction's fee and lock-height in the clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionKernel {
    pub features: KernelFeatures,
    pub fee: MicroCoin,
    pub lock_height: u64,
    pub excess: Commitment,
    pub excess_signature: Signature,
}

impl TransactionKernel {
    pub fn new(
        features: KernelFeatures,
        fee: MicroCoin,
        lock_height: u64,
        excess: Commitment,
        excess_signature: Signature,
    ) -> Self {
        Self {
            features,
            fee,
            lock_height,
            excess,
            excess_signature,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.features.contains(KernelFeatures::COINBASE_KERNEL)
    }

    /// Verifies `excess_signature` against `excess` treated as a public key, per spec.md
    /// GLOSSARY "Excess".
    pub fn verify_signature(&self) -> Result<(), TransactionError> {
        let excess_pk = self.excess.as_public_key();
        let nonce = self.excess_signature.get_public_nonce();
        let challenge = Self::build_kernel_challenge(nonce, excess_pk, self.fee, self.lock_height, &self.features);
        if self.excess_signature.verify_challenge(excess_pk, &challenge) {
            Ok(())
        } else {
            Err(TransactionError::InvalidSignatureError(
                "kernel excess signature did not verify".into(),
            ))
        }
    }

    /// The domain-separated challenge the excess signature is taken over.
    pub fn build_kernel_challenge(
        public_nonce: &crate::types::PublicKey,
        excess: &crate::types::PublicKey,
        fee: MicroCoin,
        lock_height: u64,
        features: &KernelFeatures,
    ) -> crate::types::Hash {
        domain_hash(
            "kernel_signature",
            &[
                public_nonce.as_bytes(),
                excess.as_bytes(),
                &fee.as_u64().to_be_bytes(),
                &lock_height.to_be_bytes(),
                &[features.bits()],
            ],
        )
    }
}

impl PartialOrd for TransactionKernel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransactionKernel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.excess.as_bytes().cmp(other.excess.as_bytes())
    }
}

impl ConsensusEncoding for KernelFeatures {
    fn consensus_encode<W: std::io::Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        writer.write_all(&[self.bits()])
    }
}

impl crate::consensus::ConsensusDecoding for KernelFeatures {
    fn consensus_decode<R: std::io::Read>(reader: &mut R) -> Result<Self, std::io::Error> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        KernelFeatures::from_bits(buf[0])
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "unknown kernel feature bits"))
    }
}

impl ConsensusEncoding for TransactionKernel {
    fn consensus_encode<W: std::io::Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        self.features.consensus_encode(writer)?;
        self.fee.consensus_encode(writer)?;
        self.lock_height.consensus_encode(writer)?;
        self.excess.consensus_encode(writer)?;
        self.excess_signature.consensus_encode(writer)
    }
}

impl crate::consensus::ConsensusDecoding for TransactionKernel {
    fn consensus_decode<R: std::io::Read>(reader: &mut R) -> Result<Self, std::io::Error> {
        use crate::consensus::ConsensusDecoding;
        let features = KernelFeatures::consensus_decode(reader)?;
        let fee = MicroCoin::consensus_decode(reader)?;
        let lock_height = u64::consensus_decode(reader)?;
        let excess = Commitment::consensus_decode(reader)?;
        let excess_signature = Signature::consensus_decode(reader)?;
        Ok(TransactionKernel::new(features, fee, lock_height, excess, excess_signature))
    }
}
