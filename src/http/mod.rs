//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → hooks (pass-through request hook)
//!     → routing (proxy table lookup)
//!         → proxy (forward upstream) → response.rs (error mapping)
//!         → static files (local)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::ProxyError;
pub use server::{DevServer, ServerError};
