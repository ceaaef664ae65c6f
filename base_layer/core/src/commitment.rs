// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! Commitment arithmetic (component C of SPEC_FULL.md §2): pure, stateless Pedersen commitment
//! addition. Grounded on the commitment-sum algebra in
//! `other_examples/…chain_balance.rs`'s `ChainBalanceValidator` (`&a + &b`, `iter.sum()`).

use crate::types::{commit_transparent, Commitment, CommitmentFactory};

/// `AddCommitments(positives, negatives)`: returns the commitment whose value is
/// `Σ positives − Σ negatives`, per spec.md §3.
pub fn add_commitments(positives: &[Commitment], negatives: &[Commitment]) -> Commitment {
    let pos_sum: Commitment = positives.iter().cloned().sum();
    let neg_sum: Commitment = negatives.iter().cloned().sum();
    &pos_sum - &neg_sum
}

/// `CommitTransparent(v)`: a commitment to the scalar `v` with zero blinding.
pub fn commit_transparent_value(factory: &CommitmentFactory, v: u64) -> Commitment {
    commit_transparent(factory, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrivateKey, SecretKeyTrait};

    fn factory() -> CommitmentFactory {
        CommitmentFactory::default()
    }

    fn random_commitment(factory: &CommitmentFactory, value: u64) -> Commitment {
        let blinding = PrivateKey::random(&mut rand::rngs::OsRng);
        factory.commit_value(&blinding, value)
    }

    #[test]
    fn addition_is_commutative() {
        let f = factory();
        let a = random_commitment(&f, 5);
        let b = random_commitment(&f, 7);
        assert_eq!(add_commitments(&[a.clone(), b.clone()], &[]), add_commitments(&[b, a], &[]));
    }

    #[test]
    fn addition_has_an_inverse() {
        let f = factory();
        let a = random_commitment(&f, 11);
        let identity = add_commitments(&[a.clone()], &[a]);
        assert_eq!(identity, commit_transparent_value(&f, 0));
    }

    #[test]
    fn transparent_commitment_is_deterministic() {
        let f = factory();
        assert_eq!(commit_transparent_value(&f, 42), commit_transparent_value(&f, 42));
        assert_ne!(commit_transparent_value(&f, 42), commit_transparent_value(&f, 43));
    }
}
