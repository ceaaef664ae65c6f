// Copyright 2026, The Merkle Coin Development Community
// SPDX-License-Identifier: BSD-3-Clause
//
// Route inventory per spec.md §6: "Responses are JSON; exact schemas are not normative for the
// core." This implements every named route this workspace has state for: `/v1/status`,
// `/v1/headers/{id}`, `/v1/blocks/{id}`, `/v1/chain`, `/v1/peers/all`, `/v1/peers/connected`,
// `/v1/peers/{ip}`, `/v1/txhashset/roots`. The remaining named routes —
// `/v1/chain/outputs/byids`, `/v1/chain/outputs/byheight`,
// `/v1/txhashset/{lastoutputs|lastkernels|lastrangeproofs|outputs}`,
// `/v1/explorer/blockinfo/{hash|height}` — need a by-commitment output index / retained
// range-proof data this workspace's `ChainDataSource`/`MmrView` don't carry (they track blocks
// and MMR roots, not a queryable UTXO set); these are deliberate, spec.md §9-style omissions,
// not folded into the 404 wildcard silently.

use std::{net::IpAddr, sync::Arc};

use mwc_comms::manager::ConnectionManager;
use mwc_core::{chain_storage::ChainStore, mmr_view::MmrView, transactions::RangeProofVerifier, types::Hash};
use mwc_p2p::{ChainDataSource, PeerAddressBook};
use serde_json::json;
use tiny_http::Method;

use crate::node::SharedChainTip;

pub struct RouteContext<S, T, R, C>
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    pub chain_store: Arc<S>,
    pub mmr_view: Arc<T>,
    pub chain_data: Arc<C>,
    pub peer_addrs: Arc<PeerAddressBook>,
    pub chain_tip: Arc<SharedChainTip>,
    pub manager: Arc<ConnectionManager>,
    pub network: String,
    _range_proof_verifier: std::marker::PhantomData<R>,
}

impl<S, T, R, C> RouteContext<S, T, R, C>
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_store: Arc<S>,
        mmr_view: Arc<T>,
        chain_data: Arc<C>,
        peer_addrs: Arc<PeerAddressBook>,
        chain_tip: Arc<SharedChainTip>,
        manager: Arc<ConnectionManager>,
        network: String,
    ) -> Self {
        Self {
            chain_store,
            mmr_view,
            chain_data,
            peer_addrs,
            chain_tip,
            manager,
            network,
            _range_proof_verifier: std::marker::PhantomData,
        }
    }
}

/// Dispatches one request to a route handler, returning `(status_code, json_body)`. Only `GET`
/// is accepted; every route is read-only per spec.md §6.
pub fn dispatch<S, T, R, C>(ctx: &RouteContext<S, T, R, C>, url: &str, method: &Method) -> (u16, String)
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    if !matches!(method, Method::Get) {
        return (405, json!({"error": "method not allowed"}).to_string());
    }

    let mut segments = url.trim_start_matches('/').split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("v1"), Some("status"), None) => (200, status(ctx)),
        (Some("v1"), Some("headers"), Some(id)) => header_by_id(ctx, id),
        (Some("v1"), Some("blocks"), Some(id)) => block_by_id(ctx, id),
        (Some("v1"), Some("peers"), Some("all")) => (200, peers_all(ctx)),
        (Some("v1"), Some("peers"), Some("connected")) => (200, peers_connected(ctx)),
        (Some("v1"), Some("peers"), Some(ip)) => peer_by_ip(ctx, ip),
        (Some("v1"), Some("chain"), None) => (200, status(ctx)),
        (Some("v1"), Some("txhashset"), Some("roots")) => (200, txhashset_roots(ctx)),
        _ => (404, json!({"error": "no such route", "path": url}).to_string()),
    }
}

fn status<S, T, R, C>(ctx: &RouteContext<S, T, R, C>) -> String
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    let (total_difficulty, height) = ctx.chain_tip.chain_tip();
    json!({
        "network": ctx.network,
        "height": height,
        "total_difficulty": total_difficulty,
        "connected_peers": ctx.manager.connection_count(),
    })
    .to_string()
}

fn header_by_id<S, T, R, C>(ctx: &RouteContext<S, T, R, C>, id: &str) -> (u16, String)
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    match parse_hash(id) {
        Some(hash) => match ctx.chain_data.get_header_by_hash(&hash) {
            Some(header) => (
                200,
                json!({
                    "height": header.height,
                    "previous_hash": hex::encode(header.previous_hash),
                    "timestamp": header.timestamp,
                    "output_mmr_root": hex::encode(header.output_mmr_root),
                    "kernel_mmr_root": hex::encode(header.kernel_mmr_root),
                    "total_difficulty": header.total_difficulty,
                })
                .to_string(),
            ),
            None => not_found(),
        },
        None => bad_request("id must be a 64-character hex block hash"),
    }
}

fn block_by_id<S, T, R, C>(ctx: &RouteContext<S, T, R, C>, id: &str) -> (u16, String)
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    match parse_hash(id) {
        Some(hash) => match ctx.chain_data.get_block_by_hash(&hash) {
            Some(block) => (
                200,
                json!({
                    "height": block.header.height,
                    "num_inputs": block.body.inputs.len(),
                    "num_outputs": block.body.outputs.len(),
                    "num_kernels": block.body.kernels.len(),
                })
                .to_string(),
            ),
            None => not_found(),
        },
        None => bad_request("id must be a 64-character hex block hash"),
    }
}

fn peers_all<S, T, R, C>(ctx: &RouteContext<S, T, R, C>) -> String
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    let addrs: Vec<String> = ctx.peer_addrs.known_addrs().iter().map(|a| format!("{}:{}", a.ip, a.port)).collect();
    json!({"peers": addrs}).to_string()
}

fn peers_connected<S, T, R, C>(ctx: &RouteContext<S, T, R, C>) -> String
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    json!({"connected": ctx.manager.connection_count()}).to_string()
}

fn peer_by_ip<S, T, R, C>(ctx: &RouteContext<S, T, R, C>, ip: &str) -> (u16, String)
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    let ip: IpAddr = match ip.parse() {
        Ok(ip) => ip,
        Err(_) => return bad_request("ip must be a valid IPv4 or IPv6 address"),
    };
    let addrs: Vec<String> = ctx
        .peer_addrs
        .known_addrs()
        .iter()
        .filter(|a| a.ip == ip)
        .map(|a| format!("{}:{}", a.ip, a.port))
        .collect();
    if addrs.is_empty() && !ctx.manager.is_banned(ip) {
        return not_found();
    }
    (
        200,
        json!({
            "ip": ip.to_string(),
            "addrs": addrs,
            "banned": ctx.manager.is_banned(ip),
        })
        .to_string(),
    )
}

fn txhashset_roots<S, T, R, C>(ctx: &RouteContext<S, T, R, C>) -> String
where
    S: ChainStore,
    T: MmrView,
    R: RangeProofVerifier,
    C: ChainDataSource,
{
    let roots = ctx.mmr_view.current_roots();
    json!({
        "output_mmr_root": hex::encode(roots.output_mmr_root),
        "rangeproof_mmr_root": hex::encode(roots.rangeproof_mmr_root),
        "kernel_mmr_root": hex::encode(roots.kernel_mmr_root),
    })
    .to_string()
}

fn parse_hash(id: &str) -> Option<Hash> {
    let bytes = hex::decode(id).ok()?;
    bytes.try_into().ok()
}

fn not_found() -> (u16, String) {
    (404, json!({"error": "not found"}).to_string())
}

fn bad_request(message: &str) -> (u16, String) {
    (400, json!({"error": message}).to_string())
}
