use std::net::IpAddr;

use axum::http::HeaderMap;

/// Request metadata recorded alongside a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMetadata {
    pub ip_address: Option<String>,
    pub user_agent: String,
}

/// Extract submission metadata from request headers.
pub fn extract(headers: &HeaderMap, peer_addr: Option<IpAddr>) -> ClientMetadata {
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    ClientMetadata {
        ip_address: client_ip(headers, peer_addr),
        user_agent,
    }
}

/// The leftmost `X-Forwarded-For` entry when present, else the peer address.
pub fn client_ip(headers: &HeaderMap, peer_addr: Option<IpAddr>) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match forwarded {
        Some(ip) => Some(ip.to_string()),
        None => peer_addr.map(|ip| ip.to_string()),
    }
}
