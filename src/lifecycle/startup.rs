//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the optional config file
//! - Apply command-line overrides
//! - Resolve proxy targets from the environment, once
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Precedence: built-in defaults < config file < CLI flags; the
//!   environment then resolves proxy targets

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{
    load_config, validate_config, ConfigError, DevServerConfig, Environment, ResolvedConfig,
    ValidationError,
};
use crate::config::validation::join_errors;

/// Settings supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub static_dir: Option<String>,
}

/// Error preparing the configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("invalid command-line settings: {}", join_errors(.0))]
    Overrides(Vec<ValidationError>),
}

/// Build the resolved configuration for this process.
pub fn prepare_config(
    options: &StartupOptions,
    env: &impl Environment,
) -> Result<ResolvedConfig, StartupError> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path).map_err(|source| StartupError::Config {
            path: path.clone(),
            source,
        })?,
        None => DevServerConfig::default(),
    };

    if let Some(bind) = &options.bind_address {
        config.server.bind_address = bind.clone();
    }
    if let Some(dir) = &options.static_dir {
        config.server.static_dir = dir.clone();
    }
    validate_config(&config).map_err(StartupError::Overrides)?;

    Ok(config.resolve(env))
}
