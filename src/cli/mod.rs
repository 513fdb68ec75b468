//! Command-line interface definition and dispatch for ai.
//!
//! The command tree is built at runtime with clap's builder API: the static
//! `config` command plus one subcommand per configured prompt group, each
//! holding one subcommand per prompt. Parsing happens in two passes because
//! `--provider`/`--model` decide whether prompt commands exist at all.

use anyhow::{bail, Result};
use clap::{Arg, ArgMatches, Command};
use colored::Colorize;
use std::rc::Rc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::logging::LogHandle;
use crate::output::{Renderer, StdoutRenderer};
use crate::provider::{resolve_model, Provider};
use crate::registry::CommandRegistry;
use crate::transport::CompletionTransport;

/// Flags that must be known before the command tree is built.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl GlobalOptions {
    /// Reads the global flags, ignoring everything after them.
    ///
    /// Parse errors fall back to defaults; the full parse reports them.
    pub fn parse(args: &[String]) -> Self {
        let Ok(matches) = root_command()
            .allow_external_subcommands(true)
            .try_get_matches_from(args)
        else {
            return Self::default();
        };
        Self {
            provider: matches.get_one::<String>("provider").cloned(),
            model: matches.get_one::<String>("model").cloned(),
        }
    }
}

/// Loads configuration, builds the command tree and runs the chosen command.
pub async fn run(log: &LogHandle) -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let config = Config::load()?;
    if let Some(level) = config.log_level.as_deref() {
        if let Err(err) = log.set_level(level) {
            error!("Invalid log level '{level}', keeping the default: {err}");
        }
    }

    let options = GlobalOptions::parse(&args);
    let transport = connect(&config, &options);
    let registry = CommandRegistry::build(&config.commands, transport)
        .with_idle_timeout(
            config
                .stream_idle_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        );
    if registry.is_empty() {
        info!("No commands loaded from configuration.");
    }

    let matches = build_cli(&registry).get_matches_from(&args);
    let mut renderer = StdoutRenderer::new();
    dispatch(&registry, &config, &matches, &mut renderer).await
}

/// Builds the completion transport, or `None` when it cannot be configured.
///
/// A missing API key is not fatal: the CLI still runs with built-in commands.
fn connect(config: &Config, options: &GlobalOptions) -> Option<Rc<dyn CompletionTransport>> {
    let provider = resolve_model(options.provider.as_deref(), options.model.as_deref(), config)
        .and_then(|selection| Provider::from_config(config, &selection));
    match provider {
        Ok(provider) => Some(Rc::new(provider) as Rc<dyn CompletionTransport>),
        Err(err) => {
            warn!("Failed to initialize completion client: {err:#}");
            None
        }
    }
}

/// Top-level command with global flags and no subcommands.
fn root_command() -> Command {
    Command::new(APP_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run LLM prompts from config.toml")
        .arg(
            Arg::new("provider")
                .long("provider")
                .value_name("NAME")
                .help("Provider to use (openai, anthropic, openrouter, ollama)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model to use (overrides config)"),
        )
}

/// Top-level names owned by clap or built-in commands.
const RESERVED_NAMES: &[&str] = &["config", "help"];

/// Built-in commands available even without a completion client.
fn config_command() -> Command {
    Command::new("config")
        .about("Inspect configuration")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("show").about("Show current config"))
        .subcommand(Command::new("path").about("Print the config file path"))
}

/// Builds the full CLI: built-ins plus one subcommand per prompt group.
pub fn build_cli(registry: &CommandRegistry) -> Command {
    let mut cli = root_command()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(config_command());

    for group in registry.groups() {
        if group.name.is_empty() || RESERVED_NAMES.contains(&group.name.as_str()) {
            warn!("Skipping prompt group '{}': name is reserved", group.name);
            continue;
        }
        let mut group_cmd = Command::new(group.name.clone()).about(group.usage.clone());
        for command in &group.commands {
            // clap adds its own `help` subcommand to every group
            if command.name.is_empty() || command.name == "help" {
                warn!(
                    "Skipping prompt command '{} {}': name is reserved",
                    group.name, command.name
                );
                continue;
            }
            group_cmd = group_cmd.subcommand(
                Command::new(command.name.clone())
                    .about(command.system_prompt.clone())
                    .arg(
                        Arg::new("prompt")
                            .value_name("PROMPT")
                            .help("Your prompt")
                            .num_args(1..)
                            .trailing_var_arg(true)
                            .allow_hyphen_values(true),
                    ),
            );
        }
        if group_cmd.has_subcommands() {
            group_cmd = group_cmd
                .subcommand_required(true)
                .arg_required_else_help(true);
        }
        cli = cli.subcommand(group_cmd);
    }

    cli
}

/// Runs the command selected by `matches`.
pub async fn dispatch(
    registry: &CommandRegistry,
    config: &Config,
    matches: &ArgMatches,
    renderer: &mut dyn Renderer,
) -> Result<()> {
    match matches.subcommand() {
        Some(("config", sub)) => match sub.subcommand() {
            Some(("show", _)) => {
                let path = Config::config_path()?;
                println!("{} {}", "Config path:".bold(), path.display());
                println!();
                println!("{}", toml::to_string_pretty(&config.redacted())?);
                Ok(())
            }
            Some(("path", _)) => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
            _ => Ok(()),
        },
        Some((group, sub)) => {
            let Some((command, args)) = sub.subcommand() else {
                bail!("No subcommands configured for '{group}'");
            };
            let input = prompt_text(args);
            match registry
                .invoke(group, command, input.as_deref(), renderer)
                .await
            {
                Some(result) => Ok(result?),
                None => bail!("Unknown command: {group} {command}"),
            }
        }
        None => Ok(()),
    }
}

/// Joins the words after the subcommand into one prompt.
fn prompt_text(args: &ArgMatches) -> Option<String> {
    args.get_many::<String>("prompt")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
}
