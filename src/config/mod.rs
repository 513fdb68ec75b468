//! Configuration types and loading for ai.
//!
//! ai reads its settings and prompt commands from TOML at the platform's XDG
//! config path (e.g. `~/.config/ai/config.toml` on Linux), or from
//! `AI_CONFIG_PATH` when set.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::{Config, PromptDefinition};

use anyhow::Result;

impl Config {
    /// Loads the config from [`Config::config_path`].
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }
}
