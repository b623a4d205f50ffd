//! HTTP forwarding endpoint.
//!
//! `GET /resolve` runs a domain/type pair through the same resolution
//! pipeline as the UDP front-end and renders the response message as JSON.
//! The optional `host` parameter bypasses the engine and sends a single
//! query to that server, which is the only external path into the upstream
//! transport. `GET /stats` exposes the resolver counters.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;

use crate::resolver::{is_valid_hostname, Resolver};
use crate::stats::{Stats, StatsSnapshot};
use crate::transport::{UdpExchange, DEFAULT_TIMEOUT};
use crate::wire::{Message, Rcode, RecordType};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub transport: Arc<dyn UdpExchange>,
    pub stats: Arc<Stats>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/resolve", get(resolve_query))
        .route("/stats", get(get_stats))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub domain: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub host: Option<String>,
}

async fn resolve_query(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<Message>, (StatusCode, String)> {
    if !is_valid_hostname(&params.domain) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("invalid domain: {}", params.domain),
        ));
    }
    let qtype: RecordType = params
        .record_type
        .parse()
        .map_err(|error: String| (StatusCode::BAD_REQUEST, error))?;

    let request = Message::query(rand::random(), &params.domain, qtype);
    debug!(domain = %params.domain, qtype = ?qtype, host = ?params.host, "http resolve");

    if let Some(host) = &params.host {
        let ip: Ipv4Addr = host
            .parse()
            .map_err(|_| (StatusCode::BAD_REQUEST, format!("invalid host: {host}")))?;
        let packet = request
            .encode()
            .map_err(|error| (StatusCode::BAD_REQUEST, error.to_string()))?;
        let response = state
            .transport
            .query(&packet, SocketAddr::from((ip, 53)), DEFAULT_TIMEOUT)
            .await
            .map_err(|error| (StatusCode::BAD_GATEWAY, error.to_string()))?;
        return Ok(Json(response));
    }

    let response = match state.resolver.resolve(&request).await {
        Some(response) => response,
        None => {
            let mut failed = request.clone();
            failed.header.qr = true;
            failed.header.ra = true;
            failed.header.rcode = Rcode::NameError;
            failed
        }
    };
    Ok(Json(response))
}

async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
