//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    // Flags and env vars win over the config file
    let ctx = commands::Context {
        host: cli.host.or_else(|| config.host.clone()),
        username: cli.username.or_else(|| config.username.clone()),
        password: cli.password,
        token: cli.token.or_else(|| config.token.clone()),
        jks_passphrase: config.jks_passphrase.clone(),
        timeout: cli
            .timeout
            .or(config.timeout_secs)
            .map(Duration::from_secs),
        output_format: cli
            .output
            .or(config.output_format)
            .unwrap_or(OutputFormat::Pretty),
    };

    match cli.command {
        Commands::Certificate(args) => commands::certificate::execute(ctx, args).await,
        Commands::Authority(args) => commands::authority::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}

/// Install the log subscriber on stderr.
///
/// `-q` turns logging off, `-v` enables debug; otherwise `RUST_LOG` is
/// honored, defaulting to warnings only.
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
