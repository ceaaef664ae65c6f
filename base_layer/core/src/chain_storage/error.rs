// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainStorageError {
    #[error("chain store access failed: {0}")]
    AccessError(String),
}
