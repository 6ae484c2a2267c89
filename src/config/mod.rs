//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DevServerConfig
//!     → resolve(environment) (proxy targets from env vars)
//!     → validation.rs (target checks)
//!     → ResolvedConfig (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never mutated
//! - All fields have defaults to allow minimal configs
//! - Environment access goes through the `Environment` trait

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{Environment, ProcessEnv};
pub use loader::{load_config, ConfigError};
pub use schema::{
    resolve_api_proxy, DevServerConfig, LogFormat, ObservabilityConfig, ProxyRule,
    ResolvedConfig, ResolvedRule, ServerConfig, TimeoutConfig, API_PREFIX, API_PROXY_ENV,
    DEFAULT_API_TARGET,
};
pub use validation::{validate_config, validate_resolved, ValidationError};
