//! Per-client rate limiting middleware.

use crate::responses::AppError;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use catalog_resilience::ClientRateLimiter;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::debug;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Rejects requests once a client exceeds its per-second budget.
///
/// Clients are keyed by the first `X-Forwarded-For` address, falling back to
/// the peer address.
pub async fn rate_limit_middleware(
    State(limiter): State<ClientRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = client_ip(request.headers(), peer);

    if let Err(e) = limiter.check(&client) {
        debug!(client = %client, "Rate limit exceeded");
        return AppError(e).into_response();
    }

    next.run(request).await
}

/// Resolves the client address used as the rate limit key.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> IpAddr {
    headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or(peer)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
