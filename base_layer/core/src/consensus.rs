// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! Consensus-critical byte encoding and the tunable constants the validator enforces.
//!
//! `ConsensusEncoding`/`ConsensusDecoding` are grounded directly on the trait pair used in
//! `other_examples/…transaction_kernel.rs` (an `io::Read`/`io::Write`-based codec, reused
//! verbatim here as the wire codec abstraction for both the chain data model and, in
//! `mwc_comms`, the P2P wire messages).

use std::io::{self, Read, Write};

pub trait ConsensusEncoding {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error>;
}

pub trait ConsensusDecoding: Sized {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error>;
}

impl ConsensusEncoding for u64 {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(&self.to_be_bytes())
    }
}

impl ConsensusDecoding for u64 {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }
}

impl ConsensusEncoding for i64 {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(&self.to_be_bytes())
    }
}

impl ConsensusDecoding for i64 {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }
}

impl ConsensusEncoding for crate::types::Hash {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(self)
    }
}

impl ConsensusDecoding for crate::types::Hash {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buf = [0u8; 32];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Consensus parameters the validator is given at construction time. Kept as plain data rather
/// than a singleton so tests can build a validator against deliberately small values (e.g. a
/// low `coinbase_maturity`) without touching global state.
#[derive(Clone, Debug)]
pub struct ConsensusConstants {
    /// Fixed block subsidy, before fees, in the smallest coin unit.
    pub consensus_reward: u64,
    /// Minimum number of blocks between a coinbase output's creation and its spendability.
    pub coinbase_maturity: u64,
    /// Maximum total (inputs + outputs + kernels) weight a block body may carry.
    pub max_block_weight: u64,
}

impl ConsensusConstants {
    pub fn mainnet() -> Self {
        Self {
            consensus_reward: 50_000_000,
            coinbase_maturity: 1_440,
            max_block_weight: 1_000_000,
        }
    }

    /// `MaxCoinbaseHeight(current_height)`, spec.md §3: the latest height at which a coinbase
    /// output created at `current_height - coinbase_maturity` or earlier is spendable.
    pub fn max_coinbase_height(&self, current_height: u64) -> u64 {
        current_height.saturating_sub(self.coinbase_maturity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_u64() {
        let mut buf = Vec::new();
        12345u64.consensus_encode(&mut buf).unwrap();
        let decoded = u64::consensus_decode(&mut &buf[..]).unwrap();
        assert_eq!(decoded, 12345);
    }

    #[test]
    fn max_coinbase_height_saturates_at_zero() {
        let c = ConsensusConstants::mainnet();
        assert_eq!(c.max_coinbase_height(2_000), 2_000 - 1_440);
        assert_eq!(c.max_coinbase_height(0), 0);
    }
}
