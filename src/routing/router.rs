//! Proxy table lookup.
//!
//! # Responsibilities
//! - Store the resolved proxy rules with their upstreams
//! - Look up the first rule whose prefix matches a request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Declaration order, first match wins
//! - `None` means the path is served locally

use crate::proxy::Upstream;
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled proxy rule.
#[derive(Debug)]
pub struct ProxyRoute {
    pub matcher: PathPrefixMatcher,
    pub upstream: Upstream,
}

/// Ordered set of proxy routes.
#[derive(Debug)]
pub struct ProxyTable {
    routes: Vec<ProxyRoute>,
}

impl ProxyTable {
    /// Build a table from already constructed upstreams, keeping their order.
    pub fn new(upstreams: Vec<Upstream>) -> Self {
        let routes = upstreams
            .into_iter()
            .map(|upstream| ProxyRoute {
                matcher: PathPrefixMatcher::new(upstream.rule().prefix.clone()),
                upstream,
            })
            .collect();
        Self { routes }
    }

    /// Find the route that should forward `path`, if any.
    pub fn match_path(&self, path: &str) -> Option<&ProxyRoute> {
        self.routes.iter().find(|route| route.matcher.matches_path(path))
    }
}
