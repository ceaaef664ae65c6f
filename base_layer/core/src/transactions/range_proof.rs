// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Grounded on the `RangeProofService::verify(proof, commitment) -> bool` shape visible in
// `other_examples/…transaction.rs`'s `TransactionOutput::verify_range_proof` and the
// `tari_crypto::range_proof::RangeProofService` trait imported throughout the pack (e.g.
// `tari-project-tari/base_layer/core/tests/multi_party_utxo.rs`). The pinned `tari_crypto`
// tag's concrete bulletproofs+ factory type isn't present anywhere in the retrieved pack, so -
// exactly as with `ChainStore`/`MmrView` - this is kept as a collaborator interface rather than
// a concrete dependency on an unverified type path.

use crate::types::Commitment;

/// Verifies that a range proof attests to a non-negative, bounded value for `commitment`.
pub trait RangeProofVerifier {
    fn verify(&self, proof: &[u8], commitment: &Commitment) -> bool;
}

/// A structural test double: accepts any non-empty proof. Real bulletproofs+ verification is
/// owned by whatever `tari_crypto` range-proof service the deployment wires in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRangeProofVerifier;

impl RangeProofVerifier for NullRangeProofVerifier {
    fn verify(&self, proof: &[u8], _commitment: &Commitment) -> bool {
        !proof.is_empty()
    }
}
