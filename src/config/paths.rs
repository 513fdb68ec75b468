//! Path resolution for the ai configuration file.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Config;
use crate::constants::{APP_NAME, CONFIG_FILENAME, CONFIG_PATH_ENV};

impl Config {
    /// Returns the platform-specific configuration directory for ai.
    ///
    /// Returns `~/.config/ai/` on Linux (`XDG_CONFIG_HOME/ai`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to the ai configuration file.
    ///
    /// `AI_CONFIG_PATH` wins when set; otherwise `~/.config/ai/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => {
                tracing::debug!("Using config path from {CONFIG_PATH_ENV}");
                Ok(PathBuf::from(path))
            }
            _ => Ok(Self::config_dir()?.join(CONFIG_FILENAME)),
        }
    }
}
