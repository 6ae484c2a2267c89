//! Upstream origin abstraction.
//!
//! # Responsibilities
//! - Hold one resolved proxy rule and its HTTP client
//! - Build upstream URLs from the target and the request path
//! - Provide the authority used when rewriting `Host`

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::{ResolvedRule, TimeoutConfig};

/// Error building an upstream from a resolved rule.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid proxy target `{target}`: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },
    #[error("proxy target `{0}` has no host")]
    MissingHost(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A single upstream origin and the client used to reach it.
#[derive(Debug, Clone)]
pub struct Upstream {
    rule: ResolvedRule,
    /// Target without query, fragment or trailing slash.
    base: String,
    /// `host[:port]` of the target, port omitted when it is the scheme default.
    authority: String,
    client: reqwest::Client,
}

impl Upstream {
    /// Create an upstream for `rule`.
    pub fn new(rule: ResolvedRule, timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        let mut url = Url::parse(&rule.target).map_err(|source| UpstreamError::InvalidTarget {
            target: rule.target.clone(),
            source,
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| UpstreamError::MissingHost(rule.target.clone()))?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        url.set_query(None);
        url.set_fragment(None);
        let base = url.as_str().trim_end_matches('/').to_string();

        // `secure = false` skips certificate checks against the upstream.
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!rule.secure)
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;

        Ok(Self {
            rule,
            base,
            authority,
            client,
        })
    }

    pub fn rule(&self) -> &ResolvedRule {
        &self.rule
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Upstream URL for a request's path and query. The matched prefix is kept.
    pub fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base, path_and_query)
    }
}
