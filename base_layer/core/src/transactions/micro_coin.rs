// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt::{Display, Formatter},
    io::{self, Read, Write},
    iter::Sum,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

use crate::consensus::{ConsensusDecoding, ConsensusEncoding};

/// The smallest denomination of the coin, in the style of `tari_core::transactions::tari_amount::MicroTari`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct MicroCoin(pub u64);

impl MicroCoin {
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Checked addition; `None` on overflow, so callers can surface `BadData` instead of
    /// silently wrapping, per spec.md §4.1 edge case "Integer overflow on the fee sum".
    pub fn checked_add(self, rhs: MicroCoin) -> Option<MicroCoin> {
        self.0.checked_add(rhs.0).map(MicroCoin)
    }
}

impl From<u64> for MicroCoin {
    fn from(v: u64) -> Self {
        MicroCoin(v)
    }
}

impl From<MicroCoin> for u64 {
    fn from(v: MicroCoin) -> Self {
        v.0
    }
}

impl Add for MicroCoin {
    type Output = MicroCoin;

    fn add(self, rhs: Self) -> Self::Output {
        MicroCoin(self.0 + rhs.0)
    }
}

impl Sub for MicroCoin {
    type Output = MicroCoin;

    fn sub(self, rhs: Self) -> Self::Output {
        MicroCoin(self.0 - rhs.0)
    }
}

impl Sum for MicroCoin {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MicroCoin(0), |a, b| MicroCoin(a.0 + b.0))
    }
}

impl Display for MicroCoin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} µcoin", self.0)
    }
}

impl ConsensusEncoding for MicroCoin {
    fn consensus_encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        self.0.consensus_encode(writer)
    }
}

impl ConsensusDecoding for MicroCoin {
    fn consensus_decode<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        Ok(MicroCoin(u64::consensus_decode(reader)?))
    }
}

/// Sums `fees`, failing on overflow rather than wrapping (testable property, spec.md §8).
pub fn checked_fee_sum<I: IntoIterator<Item = MicroCoin>>(fees: I) -> Option<MicroCoin> {
    fees.into_iter().try_fold(MicroCoin(0), |acc, fee| acc.checked_add(fee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_fee_sum_detects_overflow() {
        let fees = vec![MicroCoin(u64::MAX), MicroCoin(1)];
        assert_eq!(checked_fee_sum(fees), None);
    }

    #[test]
    fn checked_fee_sum_adds_normally() {
        let fees = vec![MicroCoin(10), MicroCoin(20), MicroCoin(30)];
        assert_eq!(checked_fee_sum(fees), Some(MicroCoin(60)));
    }
}
