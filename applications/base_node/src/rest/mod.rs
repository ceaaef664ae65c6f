// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// The read-only REST collaborator of spec.md §6: "a thin HTTP dispatch" external to the core,
// running "a thread pool of modest size (≈5)" per spec.md §5's scheduling model. Grounded on
// the teacher's `applications/tari_miner/src/run_miner.rs` for the "spawn a dedicated thread,
// loop until shutdown" shape, generalized from a GRPC polling loop to an HTTP accept loop.
// `tiny_http`/`threadpool` are picked over the teacher's tokio/tonic stack because this surface
// is deliberately separate from, and thinner than, the blocking P2P engine (DESIGN.md).

pub mod routes;

use std::{sync::Arc, thread, thread::JoinHandle};

use log::{error, info, warn};
use threadpool::ThreadPool;
use tiny_http::Server;

use self::routes::RouteContext;
use mwc_core::{chain_storage::ChainStore, mmr_view::MmrView, transactions::RangeProofVerifier};
use mwc_p2p::ChainDataSource;

const LOG_TARGET: &str = "c::base_node::rest";

/// Serves `RouteContext`'s routes on `listen_addr` with `pool_size` worker threads until the
/// server is dropped (tiny_http has no explicit shutdown signal; the caller simply stops
/// polling by exiting the process).
pub fn serve<S, T, R, C>(
    listen_addr: std::net::SocketAddr,
    pool_size: usize,
    ctx: Arc<RouteContext<S, T, R, C>>,
) -> std::io::Result<JoinHandle<()>>
where
    S: ChainStore + Send + Sync + 'static,
    T: MmrView + Send + Sync + 'static,
    R: RangeProofVerifier + Send + Sync + 'static,
    C: ChainDataSource + Send + Sync + 'static,
{
    let server = Server::http(listen_addr).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    info!(target: LOG_TARGET, "REST surface listening on {}", listen_addr);

    let handle = thread::Builder::new().name("rest-accept".into()).spawn(move || {
        let server = Arc::new(server);
        let pool = ThreadPool::new(pool_size.max(1));
        for request in server.incoming_requests() {
            let ctx = ctx.clone();
            pool.execute(move || {
                let (status, body) = routes::dispatch(&ctx, request.url(), request.method());
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                            .expect("static header is always valid"),
                    );
                if let Err(e) = request.respond(response) {
                    warn!(target: LOG_TARGET, "failed to write response: {}", e);
                }
            });
        }
        error!(target: LOG_TARGET, "REST accept loop exited");
    })?;

    Ok(handle)
}
