//! Configuration file management.
//!
//! Reads the optional `.hubops.toml` at the repository root. Only tool
//! binaries are configurable; cluster and hub selection come from flags and
//! the environment.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::tools::Tools;
use crate::error::{ConfigError, Result};

/// Contents of `.hubops.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Overrides for external tool binaries.
    #[serde(default)]
    pub tools: Tools,
}

impl Config {
    /// Path to the configuration file under `root`.
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Load `.hubops.toml`, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;

        debug!(tools = ?config.tools, "config loaded");
        Ok(config)
    }
}
