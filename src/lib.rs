//! Front-end development server library.
//!
//! Serves built front-end assets, runs every request through the server
//! request hook and forwards `/api` to the backend named by `VITE_API_PROXY`.

pub mod config;
pub mod hooks;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::{resolve_api_proxy, DevServerConfig, ResolvedConfig};
pub use http::DevServer;
pub use lifecycle::Shutdown;
