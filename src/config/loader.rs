//! File loading and load-time validation for ai configuration.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

use super::types::Config;

impl Config {
    /// Loads the config at `path`.
    ///
    /// A missing file yields the defaults (no prompt commands) so built-in
    /// commands keep working. A directory, unreadable or malformed file is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file not found at path: {}", path.display());
            return Ok(Self::default());
        }
        if path.is_dir() {
            bail!("Config path is a directory, not a file: {}", path.display());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;

        config.resolve_substitutions();
        config.warn_on_gaps();
        Ok(config)
    }

    /// Logs configuration that loads fine but cannot run every command.
    fn warn_on_gaps(&self) {
        if self.commands.is_empty() {
            warn!("No commands found in configuration");
        }
        for (group, commands) in &self.commands {
            if commands.is_empty() {
                warn!("Main command '{group}' has no subcommands");
            }
            for (name, definition) in commands {
                if definition.system_prompt.is_empty() {
                    warn!("system_prompt is empty for command '{group}/{name}'");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_commands_tree() {
        let file = write_config(
            r#"
model = "gpt-4.1-mini"
log_level = "debug"

[provider.openai]
base_url = "http://localhost:8080/v1"

[commands.git.commit]
system_prompt = "Write a commit message"

[commands.git.review]
system_prompt = "Review this diff"

[commands.shell.explain]
system_prompt = ""
"#,
        );

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.model.as_deref(), Some("gpt-4.1-mini"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.commands.len(), 2);
        let git: Vec<&str> = config.commands["git"].keys().map(String::as_str).collect();
        assert_eq!(git, vec!["commit", "review"]);
        assert_eq!(config.commands["shell"]["explain"].system_prompt, "");
        assert_eq!(
            config.provider.openai.unwrap().base_url.as_deref(),
            Some("http://localhost:8080/v1")
        );
    }

    #[test]
    fn test_missing_system_prompt_defaults_to_empty() {
        let file = write_config("[commands.g.s]\n");

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.commands["g"]["s"].system_prompt, "");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(config.commands.is_empty());
        assert!(config.model.is_none());
    }

    #[test]
    fn test_directory_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(Config::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = write_config("[commands.git\nsystem_prompt = ");

        let err = Config::load_from(file.path()).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to parse config"));
    }
}
