// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause

pub mod network;

use std::{net::SocketAddr, path::PathBuf, time::Duration};

pub use network::Network;
use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// Global, layered configuration for a node: defaults, overridden by an optional TOML file,
/// overridden by environment variables prefixed `MWC_`.
///
/// Loaded with the `config` crate the way `tari_common`'s `GlobalConfig` is, rather than by
/// hand-parsing a file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub network: Network,
    pub data_dir: PathBuf,
    pub p2p_listen_address: SocketAddr,
    pub peer_seeds: Vec<SocketAddr>,
    pub rest_listen_address: SocketAddr,
    pub rest_thread_pool_size: usize,
    pub tor_control_address: Option<SocketAddr>,
    #[serde(with = "duration_secs")]
    pub ping_interval: Duration,
    #[serde(with = "duration_secs")]
    pub peer_read_timeout: Duration,
    pub send_queue_capacity: usize,
    pub rate_limit_bytes_per_window: u64,
    #[serde(with = "duration_secs")]
    pub rate_limit_window: Duration,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            data_dir: PathBuf::from("./data"),
            p2p_listen_address: "0.0.0.0:9999".parse().unwrap(),
            peer_seeds: Vec::new(),
            rest_listen_address: "127.0.0.1:9998".parse().unwrap(),
            rest_thread_pool_size: 5,
            tor_control_address: None,
            ping_interval: Duration::from_secs(60),
            peer_read_timeout: Duration::from_secs(1),
            send_queue_capacity: 100,
            rate_limit_bytes_per_window: 5 * 1024 * 1024,
            rate_limit_window: Duration::from_secs(10),
        }
    }
}

impl GlobalConfig {
    /// Builds configuration by layering: compiled-in defaults, an optional TOML file, then
    /// `MWC_`-prefixed environment variables. Mirrors `tari_common::load_configuration`'s
    /// layering order without pulling in its CLI-bootstrap machinery.
    pub fn load(config_file: Option<&std::path::Path>) -> Result<Self, ConfigurationError> {
        let mut builder = config::Config::builder().add_source(config::Config::try_from(&GlobalConfig::default())
            .map_err(|e| ConfigurationError::new("<defaults>", None, e.to_string()))?);

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix("MWC").separator("__"));

        let config = builder
            .build()
            .map_err(|e| ConfigurationError::new("<config>", config_file.map(|p| p.display().to_string()), e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigurationError::new("<config>", None, e.to_string()))
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_secs().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_internally_consistent() {
        let cfg = GlobalConfig::default();
        assert_eq!(cfg.rest_thread_pool_size, 5);
        assert!(cfg.send_queue_capacity > 0);
    }

    #[test]
    fn load_with_no_file_returns_defaults() {
        let cfg = GlobalConfig::load(None).expect("defaults must load");
        assert_eq!(cfg.network, Network::TestNet);
    }
}
