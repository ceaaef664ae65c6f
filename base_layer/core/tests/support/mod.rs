// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Shared test-data builders, in the spirit of (but much smaller than)
// `tests/helpers/block_builders.rs`'s `create_coinbase`/`spend_utxos` helpers.

use mwc_core::{
    blocks::{BlockHeader, FullBlock},
    transactions::{
        transaction_input::OutputFeatures,
        AggregateBody,
        KernelFeatures,
        MicroCoin,
        TransactionInput,
        TransactionKernel,
        TransactionOutput,
    },
    types::{CommitmentFactory, Hash, PrivateKey, PublicKey, SecretKeyTrait, Signature},
};
use rand::rngs::OsRng;

pub const COINBASE_MATURITY: u64 = 1_440;

pub fn consensus_constants() -> mwc_core::ConsensusConstants {
    mwc_core::ConsensusConstants {
        consensus_reward: 1_000,
        coinbase_maturity: COINBASE_MATURITY,
        max_block_weight: 1_000,
    }
}

fn sign_kernel(
    excess_blinding: PrivateKey,
    fee: MicroCoin,
    lock_height: u64,
    features: KernelFeatures,
) -> (mwc_core::types::Commitment, Signature) {
    use mwc_core::types::HomomorphicCommitmentFactory;

    let factory = CommitmentFactory::default();
    let excess = factory.commit_value(&excess_blinding, 0);
    let excess_pk = excess.as_public_key().clone();

    let nonce_key = PrivateKey::random(&mut OsRng);
    let public_nonce = PublicKey::from_secret_key(&nonce_key);
    let challenge = TransactionKernel::build_kernel_challenge(&public_nonce, &excess_pk, fee, lock_height, &features);
    let signature = Signature::sign(excess_blinding, nonce_key, &challenge).unwrap();
    (excess, signature)
}

/// A single plain kernel with no inputs/outputs and no fee: passes signature and lock-height
/// checks on its own. Callers that want a non-trivial fee are responsible for balancing it
/// with matching inputs/outputs.
pub fn plain_kernel_body(fee: u64, lock_height: u64) -> AggregateBody {
    let blinding = PrivateKey::random(&mut OsRng);
    let (excess, sig) = sign_kernel(blinding, MicroCoin(fee), lock_height, KernelFeatures::PLAIN);
    let kernel = TransactionKernel::new(KernelFeatures::PLAIN, MicroCoin(fee), lock_height, excess, sig);
    AggregateBody::new(vec![], vec![], vec![kernel])
}

/// A zero-fee plain kernel whose excess is the neutral commitment (zero blinding, zero value),
/// paired with an input and an output that share the same commitment: the balance equation
/// holds (`X - X == identity == identity + CommitTransparent(0)`) without needing the real
/// blinding factor behind `spent_output`, which a test spending a previously-built coinbase
/// output doesn't have access to.
pub fn spend_in_place_body(spent_output: &TransactionOutput, lock_height: u64) -> AggregateBody {
    let (excess, sig) = sign_kernel(PrivateKey::default(), MicroCoin(0), lock_height, KernelFeatures::PLAIN);
    let kernel = TransactionKernel::new(KernelFeatures::PLAIN, MicroCoin(0), lock_height, excess, sig);
    let input = spend_as_coinbase_input(spent_output);
    let output = TransactionOutput::new(spent_output.commitment.clone(), OutputFeatures::PLAIN, vec![0u8; 8]);
    AggregateBody::new(vec![input], vec![output], vec![kernel])
}

/// A body carrying exactly a zero-value coinbase output and its matching kernel, so
/// `check_coinbase` balances against a `ConsensusConstants` whose `consensus_reward` is zero
/// (see [`zero_reward_consensus_constants`]): the output commitment is literally the kernel
/// excess, so `Σ coinbase_outputs + CommitTransparent(0) == Σ coinbase_kernel_excesses` holds
/// trivially, while the excess still carries value 0 so its signature verifies normally.
pub fn coinbase_body() -> AggregateBody {
    let excess_blinding = PrivateKey::random(&mut OsRng);
    let (excess, sig) = sign_kernel(excess_blinding, MicroCoin(0), 0, KernelFeatures::COINBASE_KERNEL);

    let output = TransactionOutput::new(excess.clone(), OutputFeatures::COINBASE, vec![0u8; 8]);
    let kernel = TransactionKernel::new(KernelFeatures::COINBASE_KERNEL, MicroCoin(0), 0, excess, sig);
    AggregateBody::new(vec![], vec![output], vec![kernel])
}

/// `ConsensusConstants` paired with [`coinbase_body`]: a zero reward keeps the coinbase
/// equality trivial without needing real `CommitTransparent` cancellation arithmetic.
pub fn zero_reward_consensus_constants() -> mwc_core::ConsensusConstants {
    mwc_core::ConsensusConstants {
        consensus_reward: 0,
        coinbase_maturity: COINBASE_MATURITY,
        max_block_weight: 1_000,
    }
}

pub fn header_at(height: u64, previous_hash: Hash) -> BlockHeader {
    header_at_with_offset(height, previous_hash, PrivateKey::default())
}

pub fn header_at_with_offset(height: u64, previous_hash: Hash, total_kernel_offset: PrivateKey) -> BlockHeader {
    BlockHeader {
        height,
        previous_hash,
        timestamp: 0,
        output_mmr_root: Hash::default(),
        rangeproof_mmr_root: Hash::default(),
        kernel_mmr_root: Hash::default(),
        total_kernel_offset,
        total_difficulty: 1,
        pow_data: Vec::new(),
    }
}

pub fn spend_as_coinbase_input(output: &TransactionOutput) -> TransactionInput {
    TransactionInput::new(output.commitment.clone(), OutputFeatures::COINBASE)
}

pub fn genesis_block() -> FullBlock {
    FullBlock::new(header_at(0, Hash::default()), AggregateBody::default())
}
