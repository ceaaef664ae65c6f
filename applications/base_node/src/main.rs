// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// The full-node binary. Grounded on the teacher's `applications/tari_miner/src/run_miner.rs`
// bootstrap shape (load config, initialize logging, build components, run), but without
// tokio: this binary's own I/O is either one-shot setup or delegated to the blocking
// `mwc_comms`/`mwc_p2p` connection loop and the thread-pooled REST server.

mod error;
mod node;
mod rest;

use std::{net::TcpListener, path::PathBuf, process, sync::Arc};

use log::{error, info, warn};
use mwc_comms::ConnectionConfig;
use mwc_common::{exit_codes::ExitCode, GlobalConfig};
use mwc_core::{chain_storage::MemoryChainStore, mmr_view::{MemoryMmrView, MmrRoots}, transactions::NullRangeProofVerifier};
use mwc_p2p::chain_data_source::MemoryChainDataSource;
use mwc_tor::{TorControl, TorControlClient};
use structopt::StructOpt;

use crate::{error::NodeError, node::BaseNode, rest::routes::RouteContext};

const LOG_TARGET: &str = "c::base_node::main";
const PROTOCOL_VERSION: u32 = 1;
const USER_AGENT: &str = "mwc-base-node/0.1.0";

#[derive(Debug, StructOpt)]
#[structopt(name = "mwc_base_node")]
struct Cli {
    /// Path to a TOML configuration file; falls back to compiled-in defaults and `MWC_`
    /// environment variables when omitted.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to a log4rs YAML logging config; falls back to a stderr-only default.
    #[structopt(long, parse(from_os_str))]
    log_config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::from_args();

    if let Err(e) = mwc_common::initialize_logging(cli.log_config.as_deref()) {
        eprintln!("failed to initialize logging: {}", e);
        process::exit(ExitCode::IoError as i32);
    }

    match run(cli) {
        Ok(()) => process::exit(ExitCode::Success as i32),
        Err(e) => {
            error!(target: LOG_TARGET, "fatal: {}", e);
            process::exit(ExitCode::UnknownError as i32);
        },
    }
}

fn run(cli: Cli) -> Result<(), NodeError> {
    let config = GlobalConfig::load(cli.config.as_deref())?;
    info!(target: LOG_TARGET, "starting on network {}", config.network);

    // Genesis is a placeholder: a real deployment pins this per network. A missing/zero genesis
    // hash only matters once a peer with a differing one dials in, at which point the handshake
    // correctly refuses the connection (spec.md §6).
    let genesis_hash = [0u8; 32];

    let chain_store = Arc::new(MemoryChainStore::new());
    let mmr_view = Arc::new(MemoryMmrView::new(MmrRoots::default()));
    let range_proof_verifier = Arc::new(NullRangeProofVerifier);
    let chain_data = Arc::new(MemoryChainDataSource::new());

    let connection_config = ConnectionConfig {
        read_timeout: config.peer_read_timeout,
        ping_interval: config.ping_interval,
        send_queue_capacity: config.send_queue_capacity,
        rate_limit_max_messages: config.rate_limit_bytes_per_window as usize,
        rate_limit_window: config.rate_limit_window,
    };

    let node = Arc::new(BaseNode::new(
        genesis_hash,
        USER_AGENT.to_string(),
        PROTOCOL_VERSION,
        connection_config,
        chain_store.clone(),
        mmr_view.clone(),
        range_proof_verifier,
        chain_data.clone(),
    ));

    if let Some(tor_addr) = config.tor_control_address {
        match TorControlClient::connect(tor_addr) {
            Ok(client) => {
                let mut tor = TorControl::new(client);
                if let Err(e) = tor.heartbeat() {
                    warn!(target: LOG_TARGET, "tor control heartbeat failed: {}", e);
                }
            },
            Err(e) => warn!(target: LOG_TARGET, "could not reach tor control port at {}: {}", tor_addr, e),
        }
    }

    let listener = TcpListener::bind(config.p2p_listen_address)?;
    info!(target: LOG_TARGET, "P2P listener bound to {}", config.p2p_listen_address);
    let p2p_handle = node.listen(listener);

    let route_ctx = Arc::new(RouteContext::new(
        chain_store,
        mmr_view,
        chain_data,
        node.peer_addrs.clone(),
        node.chain_tip.clone(),
        node.manager.clone(),
        config.network.to_string(),
    ));
    let rest_handle = rest::serve(config.rest_listen_address, config.rest_thread_pool_size, route_ctx)?;

    p2p_handle.join().expect("p2p listener thread panicked");
    rest_handle.join().expect("rest server thread panicked");
    Ok(())
}
