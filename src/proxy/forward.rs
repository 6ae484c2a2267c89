//! Request forwarding to an upstream.
//!
//! # Responsibilities
//! - Rewrite request headers for the upstream (hop-by-hop, Host, X-Forwarded-*)
//! - Send the request and stream the upstream response back
//! - Map transport failures to `ProxyError`
//!
//! # Design Decisions
//! - Request bodies are buffered (bounded by `max_body_size`), responses streamed
//! - Upstream status codes are returned unchanged, including 5xx
//! - No retries: a failed forward is reported to the client

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderMap, HeaderName, HeaderValue, Request},
    response::Response,
};

use crate::http::response::ProxyError;
use crate::http::X_REQUEST_ID;
use crate::proxy::Upstream;

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Headers that apply to a single connection and are never forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

/// Build the header map sent upstream.
pub fn upstream_headers(
    original: &HeaderMap,
    upstream: &Upstream,
    client_addr: Option<SocketAddr>,
) -> HeaderMap {
    let mut headers = original.clone();
    strip_hop_by_hop(&mut headers);
    // Recomputed by the client from the buffered body.
    headers.remove(header::CONTENT_LENGTH);

    let rule = upstream.rule();
    let original_host = original.get(header::HOST).cloned();

    if rule.change_origin {
        if let Ok(host) = HeaderValue::from_str(upstream.authority()) {
            headers.insert(header::HOST, host);
        }
    }

    if rule.xfwd {
        if let Some(addr) = client_addr {
            let ip = addr.ip().to_string();
            let value = match headers.get(&X_FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
                Some(existing) => format!("{}, {}", existing, ip),
                None => ip,
            };
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(X_FORWARDED_FOR, value);
            }
        }
        headers
            .entry(X_FORWARDED_PROTO)
            .or_insert(HeaderValue::from_static("http"));
        if let Some(host) = original_host {
            headers.entry(X_FORWARDED_HOST).or_insert(host);
        }
    }

    headers
}

/// Forward `request` to `upstream` and return its response.
pub async fn forward(
    upstream: &Upstream,
    request: Request<Body>,
    max_body_size: usize,
) -> Result<Response, ProxyError> {
    let client_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = upstream.url_for(path_and_query);
    let request_id = parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %parts.uri.path(),
        upstream = %url,
        "Proxying request"
    );

    let body = axum::body::to_bytes(body, max_body_size)
        .await
        .map_err(ProxyError::RequestBody)?;

    let headers = upstream_headers(&parts.headers, upstream, client_addr);
    let mut builder = upstream
        .client()
        .request(parts.method.clone(), &url)
        .headers(headers);
    if !body.is_empty() {
        builder = builder.body(body);
    }

    let response = builder.send().await.map_err(|e| {
        tracing::warn!(request_id = %request_id, upstream = %url, error = %e, "Upstream request failed");
        ProxyError::from(e)
    })?;

    tracing::debug!(
        request_id = %request_id,
        status = %response.status(),
        "Upstream responded"
    );

    let status = response.status();
    let mut headers = response.headers().clone();
    strip_hop_by_hop(&mut headers);

    let mut proxied = Response::new(Body::from_stream(response.bytes_stream()));
    *proxied.status_mut() = status;
    *proxied.headers_mut() = headers;
    Ok(proxied)
}
