//! TOML configuration loading.
//!
//! A config file carries any subset of [`EngineConfig`]'s fields; omitted
//! sections fall back to the built-in defaults, so a file tweaking a single
//! threshold stays one line long.

use regimelab_core::EngineConfig;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Invalid {
        path: String,
        source: regimelab_core::config::ConfigError,
    },
}

/// Load and validate an [`EngineConfig`] from a TOML file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: EngineConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.display().to_string(),
        source,
    })?;
    Ok(config)
}
