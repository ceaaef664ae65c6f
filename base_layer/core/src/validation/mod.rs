// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// `BlockValidator` implements the two-stage contract of spec.md §4.1. Logging follows the
// `c::bn::...` dotted-path `LOG_TARGET` convention visible in
// `other_examples/…chain_balance.rs`.

pub mod error;

use std::{
    collections::HashSet,
    sync::RwLock,
};

pub use error::ValidationError;
use log::{debug, trace};

use crate::{
    blocks::{BlockError, BlockSums, FullBlock},
    chain_storage::{ChainStore, OutputLocation},
    consensus::ConsensusConstants,
    mmr_view::MmrView,
    transactions::{micro_coin::checked_fee_sum, MicroCoin, RangeProofVerifier},
    types::{commit_transparent, Commitment, CommitmentFactory, Hash, HomomorphicCommitmentFactory, PrivateKey},
};

const LOG_TARGET: &str = "c::bn::validation::block_validator";

/// `ValidateBlock(block) → BlockSums | fails with (BadData | ChainMissingData)`.
///
/// Holds the process-local "already validated" latch (spec.md §9's design note: an out-of-band
/// set keyed by block hash, not a field on the block type itself) plus the consensus constants
/// and commitment factory the checks are run against.
pub struct BlockValidator {
    consensus: ConsensusConstants,
    commitment_factory: CommitmentFactory,
    validated: RwLock<HashSet<Hash>>,
}

impl BlockValidator {
    pub fn new(consensus: ConsensusConstants) -> Self {
        Self {
            consensus,
            commitment_factory: CommitmentFactory::default(),
            validated: RwLock::new(HashSet::new()),
        }
    }

    pub fn validate<S: ChainStore, T: MmrView, R: RangeProofVerifier>(
        &self,
        block: &FullBlock,
        store: &S,
        mmr: &T,
        range_proof_verifier: &R,
    ) -> Result<BlockSums, ValidationError> {
        let hash = block.hash();
        if self.validated.read().unwrap().contains(&hash) {
            trace!(target: LOG_TARGET, "block {} already self-validated, skipping stage 1", hex::encode(hash));
        } else {
            self.self_consistency(block, range_proof_verifier)?;
            self.validated.write().unwrap().insert(hash);
        }
        self.state_consistency(block, store, mmr)
    }

    /// Stages 2-4: stateless given the block alone.
    fn self_consistency<R: RangeProofVerifier>(&self, block: &FullBlock, range_proof_verifier: &R) -> Result<(), ValidationError> {
        block.body.check_sorting_and_duplicates()?;

        let weight = block.body.weight();
        if weight > self.consensus.max_block_weight {
            return Err(ValidationError::custom_error(format!(
                "body weight {} exceeds the consensus limit {}",
                weight, self.consensus.max_block_weight
            )));
        }

        block.body.verify_range_proofs(range_proof_verifier)?;
        block.body.verify_kernel_signatures()?;
        block.body.validate_non_coinbase_balance(&self.commitment_factory)?;

        for kernel in &block.body.kernels {
            if kernel.lock_height > block.header.height {
                return Err(BlockError::KernelLockHeightExceeded {
                    lock_height: kernel.lock_height,
                    block_height: block.header.height,
                }
                .into());
            }
        }

        self.check_coinbase(block)?;

        debug!(
            target: LOG_TARGET,
            "block {} passed self-consistency at height {}",
            hex::encode(block.hash()),
            block.header.height
        );
        Ok(())
    }

    /// Step 4: `Σ coinbase_outputs + CommitTransparent(reward) == Σ coinbase_kernel_excesses`.
    fn check_coinbase(&self, block: &FullBlock) -> Result<(), ValidationError> {
        let total_fees = checked_fee_sum(block.body.kernels.iter().map(|k| k.fee))
            .ok_or_else(|| ValidationError::custom_error("fee sum overflowed"))?;
        let reward = MicroCoin(self.consensus.consensus_reward)
            .checked_add(total_fees)
            .ok_or_else(|| ValidationError::custom_error("reward + fee sum overflowed"))?;

        let coinbase_outputs: Commitment = block.body.outputs_coinbase().map(|o| o.commitment.clone()).sum();
        let coinbase_excesses: Commitment = block.body.kernels_coinbase().map(|k| k.excess.clone()).sum();
        let expected = &coinbase_outputs + &commit_transparent(&self.commitment_factory, reward.as_u64());

        if expected != coinbase_excesses {
            return Err(BlockError::InvalidCoinbase {
                height: block.header.height,
            }
            .into());
        }
        Ok(())
    }

    /// Steps 5-7: require `store` and `mmr`.
    fn state_consistency<S: ChainStore, T: MmrView>(
        &self,
        block: &FullBlock,
        store: &S,
        mmr: &T,
    ) -> Result<BlockSums, ValidationError> {
        if !block.header.is_genesis() {
            self.check_coinbase_maturity(block, store)?;
        }
        self.check_mmr_roots(block, mmr)?;
        self.compute_block_sums(block, store)
    }

    fn check_coinbase_maturity<S: ChainStore>(&self, block: &FullBlock, store: &S) -> Result<(), ValidationError> {
        for input in block.body.inputs.iter().filter(|i| i.is_coinbase()) {
            let location = store
                .get_output_position(&input.commitment)?
                .ok_or_else(|| ValidationError::custom_error("coinbase input has no recorded output position"))?;
            if location.block_height > self.consensus.max_coinbase_height(block.header.height) {
                return Err(ValidationError::custom_error(format!(
                    "coinbase input from height {} is not yet mature at height {}",
                    location.block_height, block.header.height
                )));
            }
        }
        Ok(())
    }

    fn check_mmr_roots<T: MmrView>(&self, block: &FullBlock, mmr: &T) -> Result<(), ValidationError> {
        let roots = mmr.current_roots();
        if roots.output_mmr_root != block.header.output_mmr_root ||
            roots.rangeproof_mmr_root != block.header.rangeproof_mmr_root ||
            roots.kernel_mmr_root != block.header.kernel_mmr_root
        {
            return Err(ValidationError::custom_error("MMR roots do not match the block header"));
        }
        Ok(())
    }

    fn compute_block_sums<S: ChainStore>(&self, block: &FullBlock, store: &S) -> Result<BlockSums, ValidationError> {
        let (parent_sums, parent_offset) = if block.header.is_genesis() {
            (
                BlockSums::new(
                    commit_transparent(&self.commitment_factory, 0),
                    commit_transparent(&self.commitment_factory, 0),
                ),
                PrivateKey::default(),
            )
        } else {
            let sums = store
                .get_block_sums(&block.header.previous_hash)?
                .ok_or_else(|| ValidationError::ChainMissingData("parent BlockSums not found".into()))?;
            let parent_header = store
                .get_block_header(&block.header.previous_hash)?
                .ok_or_else(|| ValidationError::ChainMissingData("parent BlockHeader not found".into()))?;
            (sums, parent_header.total_kernel_offset)
        };

        let new_outputs: Commitment = block.body.outputs.iter().map(|o| o.commitment.clone()).sum();
        let spent_inputs: Commitment = block.body.inputs.iter().map(|i| i.commitment.clone()).sum();
        let reward = commit_transparent(&self.commitment_factory, self.consensus.consensus_reward);
        let output_sum = &(&parent_sums.output_sum + &new_outputs) - &(&spent_inputs + &reward);

        // `total_kernel_offset` is cumulative (spec.md §3), so only the delta since the parent
        // header enters this block's sum; committed as a zero-value commitment so it folds into
        // `kernel_sum` the same way a kernel excess does (spec.md §4.1 step 7).
        let new_excesses: Commitment = block.body.kernels.iter().map(|k| k.excess.clone()).sum();
        let offset_commitment = self.commitment_factory.commit_value(&block.header.total_kernel_offset, 0);
        let parent_offset_commitment = self.commitment_factory.commit_value(&parent_offset, 0);
        let offset_delta = &offset_commitment - &parent_offset_commitment;
        let kernel_sum = &(&parent_sums.kernel_sum + &new_excesses) + &offset_delta;

        Ok(BlockSums::new(output_sum, kernel_sum))
    }
}

pub fn output_location(block_height: u64, mmr_index: u64) -> OutputLocation {
    OutputLocation { block_height, mmr_index }
}
