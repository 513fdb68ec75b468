//! Process-wide logging setup.
//!
//! [`init`] installs the global `tracing` subscriber once, writing to stderr
//! at `info` until configuration is loaded. The returned [`LogHandle`] swaps
//! the level afterwards; `RUST_LOG`, when set, always wins.

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use crate::constants::DEFAULT_LOG_LEVEL;

/// Logs at error level, then exits the process with status 1.
macro_rules! fatal {
    ($($arg:tt)*) => {{
        tracing::error!($($arg)*);
        std::process::exit(1)
    }};
}
pub(crate) use fatal;

/// Changes the active log level after [`init`].
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    env_override: bool,
}

/// Installs the global subscriber. Call once, before any log call.
pub fn init() -> LogHandle {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let env_override = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
    if let Err(e) = result {
        eprintln!("Log system initialization failed: {e}");
    }

    LogHandle {
        filter: handle,
        env_override,
    }
}

impl LogHandle {
    /// Applies a configured level name. Ignored when `RUST_LOG` is set.
    pub fn set_level(&self, level: &str) -> Result<()> {
        if self.env_override {
            return Ok(());
        }
        let level = parse_level(level)?;
        self.filter
            .reload(EnvFilter::new(level.to_string()))
            .map_err(|e| anyhow!("Failed to change log level: {e}"))
    }
}

/// Parses a level name: debug, info, warn (or warning), error, fatal.
///
/// `fatal` maps to `error`, the most severe level `tracing` records.
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    match name.trim().to_uppercase().as_str() {
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" | "WARNING" => Ok(LevelFilter::WARN),
        "ERROR" | "FATAL" => Ok(LevelFilter::ERROR),
        _ => Err(anyhow!("unknown log level: {name}")),
    }
}
