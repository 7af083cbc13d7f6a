//! Config loading: resolve, read, parse, validate.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::AnalysisConfig;
use crate::resolve::{resolve_config_path, ConfigSource};
use crate::snapshot::{compute_hash, ConfigSnapshot};
use crate::validate::{validate_config, ValidationError};

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for sr_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(e) => sr_common::Error::InvalidConfig(e.to_string()),
            ConfigError::ParseError { .. } => sr_common::Error::InvalidConfig(err.to_string()),
            other => sr_common::Error::Config(other.to_string()),
        }
    }
}

/// Loaded configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AnalysisConfig,
    /// Path the config was read from (None if using defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
    /// SHA-256 of the config file content (None if using defaults).
    pub hash: Option<String>,
}

impl ResolvedConfig {
    /// Built-in defaults.
    pub fn defaults() -> Self {
        Self {
            config: AnalysisConfig::default(),
            path: None,
            source: ConfigSource::BuiltinDefault,
            hash: None,
        }
    }

    /// Create a config snapshot for the report.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::new(
            &self.config,
            self.path.as_ref().map(|p| p.display().to_string()),
            self.source,
            self.hash.clone(),
        )
    }
}

/// Resolve and load the analysis config.
pub fn load_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let (path, source) = resolve_config_path(cli_path);
    match path {
        Some(path) => {
            let (config, hash) = load_from_path(&path)?;
            info!(path = %path.display(), source = %source, "Loaded analysis config");
            Ok(ResolvedConfig {
                config,
                path: Some(path),
                source,
                hash: Some(hash),
            })
        }
        None => {
            debug!("No analysis config found, using built-in defaults");
            Ok(ResolvedConfig::defaults())
        }
    }
}

/// Read, parse, and validate a config file. Returns the config and the content hash.
pub fn load_from_path(path: &Path) -> Result<(AnalysisConfig, String), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: AnalysisConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
    validate_config(&config)?;

    Ok((config, compute_hash(content.as_bytes())))
}

/// Parse and validate config JSON held in memory.
pub fn parse_config(json: &str) -> Result<AnalysisConfig, ConfigError> {
    let config: AnalysisConfig =
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            source: e,
        })?;
    validate_config(&config)?;
    Ok(config)
}
