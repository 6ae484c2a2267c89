//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyRoute matched by routing
//!     → forward.rs (rewrite headers, buffer body)
//!     → upstream.rs (per-rule reqwest client, URL join)
//!     → upstream origin
//!     → forward.rs (strip hop-by-hop, stream body back)
//! ```
//!
//! # Design Decisions
//! - One client per rule, so `secure` only relaxes TLS for that rule
//! - Redirects are returned to the browser, never followed here
//! - Environment proxies (HTTP_PROXY etc.) are ignored

pub mod forward;
pub mod upstream;

pub use forward::forward;
pub use upstream::{Upstream, UpstreamError};
