//! Environment variable substitution and provider setting resolution.

use super::types::{Config, ProviderEntry};

/// Shown instead of secrets by `config show`.
const REDACTED: &str = "********";

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        if let Some(ref mut model) = self.model {
            *model = Self::resolve_str(model);
        }
        if let Some(ref mut dp) = self.default_provider {
            *dp = Self::resolve_str(dp);
        }
        for entry in self.provider.entries_mut() {
            Self::resolve_provider_entry(entry);
        }
    }

    /// Resolves `{env:VAR}` patterns in a single provider entry.
    fn resolve_provider_entry(entry: &mut Option<ProviderEntry>) {
        if let Some(ref mut e) = entry {
            for value in [&mut e.api_key, &mut e.base_url, &mut e.model]
                .into_iter()
                .flatten()
            {
                *value = Self::resolve_str(value);
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    ///
    /// Substituted values are not scanned again.
    fn resolve_str(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find("{env:") {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            let var_name = &rest[start + 5..start + end];
            result.push_str(&rest[..start]);
            result.push_str(&std::env::var(var_name).unwrap_or_default());
            rest = &rest[start + end + 1..];
        }
        result.push_str(rest);
        result
    }

    /// Resolve API key for a provider: env var first, then config value.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        Self::env_setting(provider, "API_KEY").or_else(|| {
            self.provider
                .entry(provider)
                .and_then(|e| e.api_key.clone())
                .filter(|k| !k.is_empty())
        })
    }

    /// Resolve base URL for a provider: env var first, then config value.
    pub fn resolve_base_url(&self, provider: &str) -> Option<String> {
        Self::env_setting(provider, "BASE_URL").or_else(|| {
            self.provider
                .entry(provider)
                .and_then(|e| e.base_url.clone())
                .filter(|u| !u.is_empty())
        })
    }

    /// Reads `<PROVIDER>_<SUFFIX>` (e.g. `OPENAI_API_KEY`), ignoring empty values.
    fn env_setting(provider: &str, suffix: &str) -> Option<String> {
        let name = format!("{}_{}", provider.to_uppercase(), suffix);
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    /// Get the configured default provider name, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.default_provider.as_deref().filter(|p| !p.is_empty())
    }

    /// Get the model for `provider`: `<PROVIDER>_MODEL` first, then its own
    /// entry, then the global model.
    pub fn model_for(&self, provider: &str) -> Option<String> {
        Self::env_setting(provider, "MODEL").or_else(|| {
            self.provider
                .entry(provider)
                .and_then(|e| e.model.as_deref())
                .or(self.model.as_deref())
                .filter(|m| !m.is_empty())
                .map(String::from)
        })
    }

    /// Copy of this config with API keys replaced, for display.
    pub fn redacted(&self) -> Config {
        let mut config = self.clone();
        for entry in config.provider.entries_mut().into_iter().flatten() {
            if entry.api_key.is_some() {
                entry.api_key = Some(REDACTED.to_string());
            }
        }
        config
    }
}
