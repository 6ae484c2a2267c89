//! Environment variable access.
//!
//! Configuration resolution reads the environment through [`Environment`]
//! so it stays a pure function of its inputs.

use std::collections::HashMap;

/// Read-only view of environment variables.
pub trait Environment: Send + Sync {
    /// Returns the value of `key`, or `None` if it is not set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // A non-unicode value still counts as set; it is converted lossily.
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
