//! Entry point for ai, a terminal front end for configured LLM prompts.
//!
//! This binary loads environment variables, installs logging, and hands the
//! process arguments to [`cli::run`], which builds the command tree from
//! configuration and dispatches the chosen command.

mod cli;
mod config;
mod constants;
mod error;
mod logging;
mod output;
mod provider;
mod registry;
mod relay;
mod transport;

/// Runs the ai CLI.
///
/// Loads `.env` files (silently ignored if absent), initializes logging, and
/// runs the command. Any failure is reported as fatal and exits with status 1.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    let log = logging::init();
    if let Err(err) = cli::run(&log).await {
        logging::fatal!("Application error: {err:#}");
    }
}
