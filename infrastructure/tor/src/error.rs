// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// `TorError` per spec.md §7: control-channel failure; hidden-service publishing is retried with
// backoff by the caller. Grounded on the `thiserror` enum convention used throughout the
// workspace (e.g. `mwc_comms::error::ConnectionError`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TorError {
    #[error("failed to connect to the tor control port: {0}")]
    Connect(#[source] std::io::Error),

    #[error("control-port I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("control port closed the connection before a terminating reply line")]
    UnexpectedEof,

    #[error("control port rejected the command: {0}")]
    CommandFailed(String),

    #[error("control port reply did not contain a ServiceID line")]
    MissingServiceId,

    #[error("malformed control-port reply: {0}")]
    MalformedReply(String),
}
