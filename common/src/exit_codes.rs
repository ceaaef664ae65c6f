// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use thiserror::Error;

/// Process exit codes, mirroring `tari_common::exit_codes::ExitCode` so application binaries
/// have a stable, documented mapping from failure kind to shell exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    ConfigError = 10,
    IoError = 11,
    NetworkError = 12,
    UnknownError = 101,
}

#[derive(Debug, Error)]
#[error("{code:?}: {details}")]
pub struct ExitError {
    pub code: ExitCode,
    pub details: String,
}

impl ExitError {
    pub fn new(code: ExitCode, details: impl Into<String>) -> Self {
        Self {
            code,
            details: details.into(),
        }
    }
}
