// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Invalid signature: {0}")]
    InvalidSignatureError(String),
    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),
    #[error("Body is not sorted or contains duplicates: {0}")]
    UnsortedOrDuplicate(String),
    #[error("Body weight {actual} exceeds the consensus limit {limit}")]
    WeightExceeded { actual: u64, limit: u64 },
}
