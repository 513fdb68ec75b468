//! Struct definitions and serde defaults for ai configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for ai, deserialized from `config.toml`.
///
/// Fields use serde defaults so ai can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Model identifier (e.g. `"gpt-4.1-mini"` or `"openai/gpt-4.1-mini"`).
    #[serde(default)]
    pub model: Option<String>,
    /// Default provider name (e.g., "openai", "anthropic").
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Log threshold: debug, info, warn, error or fatal.
    #[serde(default)]
    pub log_level: Option<String>,
    /// Seconds to wait for the next streamed fragment before giving up.
    #[serde(default)]
    pub stream_idle_timeout_secs: Option<u64>,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Prompt commands: `[commands.<group>.<command>]`.
    #[serde(default)]
    pub commands: BTreeMap<String, BTreeMap<String, PromptDefinition>>,
}

/// A single configured prompt command.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PromptDefinition {
    /// Instruction sent with the system role. Empty entries load but fail when run.
    #[serde(default)]
    pub system_prompt: String,
}

/// Provider-specific configuration map.
///
/// Each field corresponds to a supported LLM provider. Only providers
/// the user has configured will be `Some`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    /// Configuration for the OpenAI API (or any OpenAI-compatible endpoint).
    pub openai: Option<ProviderEntry>,
    /// Configuration for the Anthropic API provider.
    pub anthropic: Option<ProviderEntry>,
    /// Configuration for the local Ollama provider.
    pub ollama: Option<ProviderEntry>,
    /// Configuration for the OpenRouter API provider.
    pub openrouter: Option<ProviderEntry>,
}

/// Connection details for a single LLM provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API.
    pub base_url: Option<String>,
    /// Model identifier to use with this provider, overriding the global default.
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Looks up a provider entry by lowercase name.
    pub fn entry(&self, provider: &str) -> Option<&ProviderEntry> {
        match provider {
            "openai" => self.openai.as_ref(),
            "anthropic" => self.anthropic.as_ref(),
            "ollama" => self.ollama.as_ref(),
            "openrouter" => self.openrouter.as_ref(),
            _ => None,
        }
    }

    pub(super) fn entries_mut(&mut self) -> [&mut Option<ProviderEntry>; 4] {
        [
            &mut self.openai,
            &mut self.anthropic,
            &mut self.ollama,
            &mut self.openrouter,
        ]
    }
}
