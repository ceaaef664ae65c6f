// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

use std::path::Path;

use log4rs::config::Deserializers;

/// Initializes `log4rs` from a YAML config file, falling back to a sane stderr-only default
/// config when none is supplied — the same fallback behaviour `tari_common`'s application
/// bootstrap uses so a node is never silently unlogged.
pub fn initialize_logging(config_path: Option<&Path>) -> Result<(), String> {
    match config_path {
        Some(path) if path.exists() => {
            log4rs::init_file(path, Deserializers::default()).map_err(|e| e.to_string())?;
        },
        _ => {
            let stderr = log4rs::append::console::ConsoleAppender::builder().build();
            let config = log4rs::config::Config::builder()
                .appender(log4rs::config::Appender::builder().build("stderr", Box::new(stderr)))
                .build(
                    log4rs::config::Root::builder()
                        .appender("stderr")
                        .build(log::LevelFilter::Info),
                )
                .map_err(|e| e.to_string())?;
            log4rs::init_config(config).map_err(|e| e.to_string())?;
        },
    }
    Ok(())
}
