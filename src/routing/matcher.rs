//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request path against a literal prefix
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Plain string prefix, no segment boundary: `/api` matches `/apiary`,
//!   the same way the development tool treats string proxy keys
//! - The query string never takes part in matching

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns true if `path` starts with the prefix.
    pub fn matches_path(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches_path("/api/users"));
        assert!(!matcher.matches_path("/dashboard"));
    }

    #[test]
    fn test_plain_prefix_semantics() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches_path("/api"));
        assert!(matcher.matches_path("/apiary"));
        assert!(!matcher.matches_path("/API/users"));
        assert!(!matcher.matches_path("/v1/api"));
    }

    #[test]
    fn test_query_is_ignored() {
        use axum::http::Uri;

        let matcher = PathPrefixMatcher::new("/api");
        let uri: Uri = "/search?next=/api/users".parse().unwrap();
        assert!(!matcher.matches_path(uri.path()));
    }
}
