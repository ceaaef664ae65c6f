// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};

use crate::types::Commitment;

/// `{output_sum, kernel_sum}` per spec.md §3, as tracked incrementally one block at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSums {
    pub output_sum: Commitment,
    pub kernel_sum: Commitment,
}

impl BlockSums {
    pub fn new(output_sum: Commitment, kernel_sum: Commitment) -> Self {
        Self { output_sum, kernel_sum }
    }
}
