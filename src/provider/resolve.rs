//! Model resolution logic for ai.
//!
//! Resolves which provider and model to use based on CLI flags, config file,
//! and hardcoded defaults. Supports `provider/model` shorthand syntax.

use anyhow::Result;

use super::kind::{default_model_for, ProviderKind};
use crate::config::Config;
use crate::constants::DEFAULT_PROVIDER;

/// Resolved provider + model pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub provider: ProviderKind,
    pub model: String,
}

/// Resolve which provider and model to use.
/// Priority: CLI flags > `<PROVIDER>_MODEL` > config.toml > defaults.
///
/// Accepts these formats:
///   --model anthropic/claude-sonnet-4-6  (provider/model shorthand, only when --provider is omitted)
///   --provider openrouter --model "org/model-name"  (slash preserved as model name)
///   --provider anthropic  (uses the configured or provider's default model)
///   (nothing)  (uses config.toml, then hardcoded default)
pub fn resolve_model(
    cli_provider: Option<&str>,
    cli_model: Option<&str>,
    config: &Config,
) -> Result<ModelSelection> {
    if cli_provider.is_none() {
        if let Some((provider, model)) = cli_model.and_then(split_shorthand) {
            return Ok(ModelSelection {
                provider,
                model: model.to_string(),
            });
        }
    }

    // A shorthand global model picks the provider when nothing else does
    let config_shorthand = config.model.as_deref().and_then(split_shorthand);

    let provider = match cli_provider.or(config.provider_name()) {
        Some(name) => name.parse::<ProviderKind>()?,
        None => match config_shorthand {
            Some((provider, _)) => provider,
            None => DEFAULT_PROVIDER.parse::<ProviderKind>()?,
        },
    };

    let model = match cli_model {
        Some(model) => model.to_string(),
        None => match config.model_for(provider.name()) {
            Some(model) => match split_shorthand(&model) {
                Some((prefix, name)) if prefix == provider => name.to_string(),
                _ => model.clone(),
            },
            None => default_model_for(provider).to_string(),
        },
    };

    Ok(ModelSelection { provider, model })
}

/// Splits `provider/model` when the prefix names a known provider.
fn split_shorthand(model: &str) -> Option<(ProviderKind, &str)> {
    let (prefix, name) = model.split_once('/')?;
    let provider = prefix.parse().ok()?;
    Some((provider, name))
}
