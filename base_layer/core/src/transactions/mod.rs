// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

pub mod error;
pub mod micro_coin;
pub mod range_proof;
pub mod transaction_body;
pub mod transaction_input;
pub mod transaction_kernel;
pub mod transaction_output;

pub use error::TransactionError;
pub use micro_coin::MicroCoin;
pub use range_proof::{NullRangeProofVerifier, RangeProofVerifier};
pub use transaction_body::AggregateBody;
pub use transaction_input::{OutputFeatures, TransactionInput};
pub use transaction_kernel::{KernelFeatures, TransactionKernel};
pub use transaction_output::TransactionOutput;
