// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Grounded on the teacher's `applications/tari_miner/src/errors.rs`: one `thiserror` enum per
// binary, covering every failure the binary's own wiring can produce (as opposed to the
// library crates' narrower, per-module error types it wraps).

use mwc_comms::ConnectionError;
use mwc_common::ConfigurationError;
use mwc_tor::TorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("logging initialization failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("P2P connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("tor control error: {0}")]
    Tor(#[from] TorError),
}
