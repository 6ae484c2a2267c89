//! Error responses for proxied requests.
//!
//! # Responsibilities
//! - Map forwarding failures to HTTP status codes
//!
//! # Design Decisions
//! - Upstream timeouts (connect or total) result in 504 Gateway Timeout
//! - Other transport failures result in 502 Bad Gateway
//! - Unreadable or oversized request bodies result in 413

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure while forwarding a request upstream.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to read request body: {0}")]
    RequestBody(axum::Error),
    #[error("upstream timed out: {0}")]
    Timeout(reqwest::Error),
    #[error("upstream request failed: {0}")]
    Upstream(reqwest::Error),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout(err)
        } else {
            ProxyError::Upstream(err)
        }
    }
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::RequestBody(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ProxyError::RequestBody(_) => "Request body too large",
            ProxyError::Timeout(_) => "Upstream timed out",
            ProxyError::Upstream(_) => "Upstream request failed",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_error_status() {
        let err = ProxyError::RequestBody(axum::Error::new("length limit exceeded"));
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
