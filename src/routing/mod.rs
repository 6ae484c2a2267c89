//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (proxy table lookup)
//!     → matcher.rs (prefix check)
//!     → Return: matched ProxyRoute, or None to serve locally
//!
//! Table compilation (at startup):
//!     ResolvedRule[] → Upstream[] → ProxyTable (immutable)
//! ```

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{ProxyRoute, ProxyTable};
