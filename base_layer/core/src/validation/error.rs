// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Two-variant taxonomy per spec.md §4.1's contract `ValidateBlock(block) → BlockSums | fails
// with (BadData | ChainMissingData)`, in the style of `other_examples/…chain_balance.rs`'s
// `ChainBalanceValidationError` (a `custom_error` constructor over a free-text message).

use thiserror::Error;

use crate::{blocks::BlockError, chain_storage::ChainStorageError, transactions::TransactionError};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("block failed validation: {0}")]
    BadData(String),
    #[error("required chain state was missing: {0}")]
    ChainMissingData(String),
}

impl ValidationError {
    pub fn custom_error<T: Into<String>>(msg: T) -> Self {
        ValidationError::BadData(msg.into())
    }
}

impl From<TransactionError> for ValidationError {
    fn from(err: TransactionError) -> Self {
        ValidationError::BadData(err.to_string())
    }
}

impl From<BlockError> for ValidationError {
    fn from(err: BlockError) -> Self {
        ValidationError::BadData(err.to_string())
    }
}

impl From<ChainStorageError> for ValidationError {
    fn from(err: ChainStorageError) -> Self {
        ValidationError::ChainMissingData(err.to_string())
    }
}
