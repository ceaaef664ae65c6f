// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration loading, logging bootstrap and shared error/exit-code types used by every
//! crate in the workspace, in the style of `tari_common`.

pub mod configuration;
pub mod exit_codes;
mod logging;

pub use configuration::{GlobalConfig, Network};
pub use logging::initialize_logging;
use thiserror::Error;

/// Raised while loading or validating configuration values.
#[derive(Debug, Clone, Error)]
#[error("Invalid value for '{field}'{value_display}: {message}")]
pub struct ConfigurationError {
    pub field: String,
    pub value: Option<String>,
    pub message: String,
    value_display: String,
}

impl ConfigurationError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, value: Option<String>, message: M) -> Self {
        let field = field.into();
        let message = message.into();
        let value_display = value
            .as_ref()
            .map(|v| format!(" ({})", v))
            .unwrap_or_default();
        Self {
            field,
            value,
            message,
            value_display,
        }
    }
}
