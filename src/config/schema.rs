//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev server.
//! File-level types derive `Deserialize` for loading from TOML.

use serde::Deserialize;

use crate::config::env::Environment;

/// Environment variable that overrides the `/api` upstream origin.
pub const API_PROXY_ENV: &str = "VITE_API_PROXY";

/// Upstream origin used when [`API_PROXY_ENV`] is not set.
pub const DEFAULT_API_TARGET: &str = "http://127.0.0.1:8080";

/// Path prefix forwarded to the API backend.
pub const API_PREFIX: &str = "/api";

/// Root configuration for the dev server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Listener and static file settings.
    pub server: ServerConfig,

    /// Proxy rules, checked in declaration order.
    pub proxy: Vec<ProxyRule>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            proxy: vec![ProxyRule::api()],
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DevServerConfig {
    /// Resolve environment-dependent values. Evaluated once at startup.
    pub fn resolve(&self, env: &impl Environment) -> ResolvedConfig {
        ResolvedConfig {
            server: self.server.clone(),
            rules: self.proxy.iter().map(|rule| rule.resolve(env)).collect(),
            timeouts: self.timeouts.clone(),
            observability: self.observability.clone(),
        }
    }
}

/// Listener and static file configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,

    /// Directory of built front-end assets served for unproxied paths.
    pub static_dir: String,

    /// File inside `static_dir` served when no asset matches.
    pub spa_fallback: Option<String>,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
            static_dir: "build".to_string(),
            spa_fallback: Some("index.html".to_string()),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// A path prefix forwarded to an upstream origin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyRule {
    /// Literal path prefix to match.
    pub prefix: String,

    /// Upstream origin used when `target_env` is unset.
    pub target: String,

    /// Environment variable that replaces `target` when present.
    #[serde(default)]
    pub target_env: Option<String>,

    /// Rewrite the Host header to the target's authority.
    #[serde(default)]
    pub change_origin: bool,

    /// Verify the upstream's TLS certificate.
    #[serde(default = "default_secure")]
    pub secure: bool,

    /// Append X-Forwarded-* headers.
    #[serde(default)]
    pub xfwd: bool,
}

fn default_secure() -> bool {
    true
}

impl ProxyRule {
    /// The built-in `/api` rule.
    pub fn api() -> Self {
        Self {
            prefix: API_PREFIX.to_string(),
            target: DEFAULT_API_TARGET.to_string(),
            target_env: Some(API_PROXY_ENV.to_string()),
            change_origin: true,
            secure: false,
            xfwd: false,
        }
    }

    /// Pick the target from the environment, falling back to `target`.
    ///
    /// Only an absent variable falls back. An empty value is kept as is.
    pub fn resolve(&self, env: &impl Environment) -> ResolvedRule {
        let target = self
            .target_env
            .as_deref()
            .and_then(|key| env.var(key))
            .unwrap_or_else(|| self.target.clone());

        ResolvedRule {
            prefix: self.prefix.clone(),
            target,
            change_origin: self.change_origin,
            secure: self.secure,
            xfwd: self.xfwd,
        }
    }
}

/// Resolve the built-in `/api` rule against `env`.
pub fn resolve_api_proxy(env: &impl Environment) -> ResolvedRule {
    ProxyRule::api().resolve(env)
}

/// A proxy rule with its final target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRule {
    pub prefix: String,
    pub target: String,
    pub change_origin: bool,
    pub secure: bool,
    pub xfwd: bool,
}

/// Configuration after environment resolution. Immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server: ServerConfig,
    pub rules: Vec<ResolvedRule>,
    pub timeouts: TimeoutConfig,
    pub observability: ObservabilityConfig,
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_api_target_from_env() {
        let env = env_with(&[(API_PROXY_ENV, "https://example.test:9090")]);
        let rule = resolve_api_proxy(&env);
        assert_eq!(rule.target, "https://example.test:9090");
    }

    #[test]
    fn test_api_target_default_when_unset() {
        let rule = resolve_api_proxy(&HashMap::<String, String>::new());
        assert_eq!(rule.target, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_empty_env_value_is_not_replaced() {
        let env = env_with(&[(API_PROXY_ENV, "")]);
        assert_eq!(resolve_api_proxy(&env).target, "");
    }

    #[test]
    fn test_api_flags_do_not_depend_on_env() {
        let envs = [
            HashMap::new(),
            env_with(&[(API_PROXY_ENV, "https://example.test:9090")]),
            env_with(&[(API_PROXY_ENV, "")]),
        ];
        for env in &envs {
            let rule = resolve_api_proxy(env);
            assert_eq!(rule.prefix, "/api");
            assert!(rule.change_origin);
            assert!(!rule.secure);
            assert!(!rule.xfwd);
        }
    }

    #[test]
    fn test_rule_without_target_env_ignores_env() {
        let rule = ProxyRule {
            prefix: "/auth".into(),
            target: "http://127.0.0.1:3000".into(),
            target_env: None,
            change_origin: false,
            secure: true,
            xfwd: false,
        };
        let env = env_with(&[(API_PROXY_ENV, "http://elsewhere:1")]);
        assert_eq!(rule.resolve(&env).target, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_default_config_has_api_rule() {
        let config = DevServerConfig::default();
        assert_eq!(config.proxy, vec![ProxyRule::api()]);

        let resolved = config.resolve(&HashMap::<String, String>::new());
        assert_eq!(resolved.rules.len(), 1);
        assert_eq!(resolved.rules[0].target, DEFAULT_API_TARGET);
    }
}
