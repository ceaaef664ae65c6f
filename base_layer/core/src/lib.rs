// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

pub mod blocks;
pub mod chain_storage;
pub mod commitment;
pub mod consensus;
pub mod mmr_view;
pub mod transactions;
pub mod types;
pub mod validation;

pub use blocks::{BlockError, BlockSums, FullBlock};
pub use consensus::ConsensusConstants;
pub use validation::{BlockValidator, ValidationError};
