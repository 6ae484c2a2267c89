//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Detect duplicate proxy prefixes
//! - Check resolved upstream targets are usable origins
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Target URLs are checked after environment resolution, since the
//!   environment may replace them

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{DevServerConfig, ResolvedConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("server.max_body_size must be greater than zero")]
    ZeroBodyLimit,
    #[error("proxy prefix `{0}` must start with `/`")]
    PrefixNotAbsolute(String),
    #[error("proxy prefix `{0}` is declared more than once")]
    DuplicatePrefix(String),
    #[error("proxy target `{target}` for `{prefix}` is not an http(s) origin")]
    InvalidTarget { prefix: String, target: String },
}

/// Validate a configuration as loaded from disk.
pub fn validate_config(config: &DevServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.server.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    let mut seen = HashSet::new();
    for rule in &config.proxy {
        if !rule.prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotAbsolute(rule.prefix.clone()));
        }
        if !seen.insert(rule.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix(rule.prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate upstream targets after environment resolution.
pub fn validate_resolved(config: &ResolvedConfig) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<_> = config
        .rules
        .iter()
        .filter(|rule| !is_http_origin(&rule.target))
        .map(|rule| ValidationError::InvalidTarget {
            prefix: rule.prefix.clone(),
            target: rule.target.clone(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render a list of errors as one comma-separated line.
pub fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_http_origin(target: &str) -> bool {
    match Url::parse(target) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ProxyRule, API_PROXY_ENV};
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DevServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = DevServerConfig::default();
        config.server.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.proxy.push(ProxyRule::api());
        config.proxy.push(ProxyRule {
            prefix: "graphql".into(),
            ..ProxyRule::api()
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::ZeroTimeout("request_secs"),
                ValidationError::DuplicatePrefix("/api".into()),
                ValidationError::PrefixNotAbsolute("graphql".into()),
            ]
        );
    }

    #[test]
    fn test_empty_env_target_rejected_after_resolution() {
        let env: HashMap<String, String> = [(API_PROXY_ENV.to_string(), String::new())].into();
        let resolved = DevServerConfig::default().resolve(&env);

        let errors = validate_resolved(&resolved).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidTarget {
                prefix: "/api".into(),
                target: String::new(),
            }]
        );
    }

    #[test]
    fn test_accepts_http_and_https_targets() {
        assert!(is_http_origin("http://127.0.0.1:8080"));
        assert!(is_http_origin("https://example.test:9090"));
        assert!(!is_http_origin("ftp://example.test"));
        assert!(!is_http_origin("127.0.0.1:8080"));
    }
}
