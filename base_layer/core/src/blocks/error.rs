// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use thiserror::Error;

use crate::transactions::TransactionError;

#[derive(Debug, Error)]
pub enum BlockError {
    #[error("transaction body error: {0}")]
    TransactionError(#[from] TransactionError),
    #[error("kernel lock_height {lock_height} exceeds block height {block_height}")]
    KernelLockHeightExceeded { lock_height: u64, block_height: u64 },
    #[error("coinbase sum mismatch at height {height}")]
    InvalidCoinbase { height: u64 },
}
