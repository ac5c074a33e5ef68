//! Client identification utilities
//!
//! Derives the identifier used as the rate-limit key for a request.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use std::convert::Infallible;
use std::fmt;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// Identifier used when no client address can be discovered.
///
/// Every such request shares one rate-limit bucket.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Client identifier (an IP address string, or `"unknown"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_CLIENT.to_string())
    }

    pub fn from_ip(ip: Option<IpAddr>) -> Self {
        match ip {
            Some(ip) => Self(ip.to_string()),
            None => Self::unknown(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_CLIENT
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Peer addresses allowed to report the original client in forwarding headers
///
/// Empty by default: forwarding headers are then ignored and the socket peer
/// is the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedProxies(Arc<Vec<IpAddr>>);

impl TrustedProxies {
    pub fn new(proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        Self(Arc::new(
            proxies.into_iter().map(|ip| ip.to_canonical()).collect(),
        ))
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.0.contains(&ip.to_canonical())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Comma-separated IP list, blank entries ignored
impl FromStr for TrustedProxies {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let proxies = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse::<IpAddr>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(proxies))
    }
}

/// Extract client IP address
///
/// Forwarding headers are read only when the direct peer is a trusted
/// proxy: `X-Forwarded-For` (first entry), then `X-Real-IP`. Any other
/// peer is taken as the client, whatever headers it sends.
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trusted: &TrustedProxies,
) -> Option<IpAddr> {
    let peer = direct_ip?;
    if !trusted.contains(peer) {
        return Some(peer);
    }

    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = real_ip.trim().parse::<IpAddr>() {
            return Some(ip);
        }
    }

    Some(peer)
}

/// Resolve the [`ClientId`] for a request from its headers and extensions.
///
/// Trusted proxies come from a [`TrustedProxies`] request extension; without
/// one no proxy is trusted.
pub fn client_id_from_parts(parts: &Parts) -> ClientId {
    let direct_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let no_proxies = TrustedProxies::none();
    let trusted = parts
        .extensions
        .get::<TrustedProxies>()
        .unwrap_or(&no_proxies);

    ClientId::from_ip(extract_client_ip(&parts.headers, direct_ip, trusted))
}

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(client_id_from_parts(parts))
    }
}
