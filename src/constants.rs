//! Centralized constants for ai.
//!
//! Default strings, environment variable names and output markers live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "ai";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "AI_CONFIG_PATH";

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

/// Line printed after every streaming attempt, success or failure.
pub const RESPONSE_SEPARATOR: &str = "------";

/// Log threshold used until configuration says otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// --- Provider defaults ---

/// Default provider when none is configured.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Default LLM model identifier for OpenAI.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default LLM model identifier for Anthropic.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-6";

/// Default LLM model identifier for OpenRouter.
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4.1-mini";

/// Default base URL for local Ollama server.
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default LLM model identifier for Ollama.
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3";
