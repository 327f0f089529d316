mod commands;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stories::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Play(args) => commands::play::handle(config_path, &args),
        Commands::Simulate(args) => commands::simulate::handle(config_path, &args),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(config_path),
        Commands::Config(ConfigCommands::Path) => commands::config::handle_path(config_path),
        Commands::Config(ConfigCommands::Init { force }) => {
            commands::config::handle_init(config_path, force)
        }
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` controls the filter (default `warn`). The interactive player
/// owns the terminal, so logs go to `--log-file` when given.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}
