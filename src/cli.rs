//! Command-line interface definitions.
//!
//! Kept in the library so `xtask` can generate man pages from them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Stories - segmented progress playback in the terminal
#[derive(Debug, Parser)]
#[command(name = "stories", version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (stderr otherwise)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play stories interactively in the terminal
    Play(PlayArgs),

    /// Run a command script against a simulated clock and print JSON lines
    Simulate(SimulateArgs),

    /// Show or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Playback overrides shared by `play` and `simulate`.
#[derive(Debug, Clone, Args)]
pub struct PlaybackArgs {
    /// Number of stories
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,

    /// Duration of each story in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub duration: Option<u64>,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub playback: PlaybackArgs,

    /// Show the key help when the player opens
    #[arg(long)]
    pub help_on_start: bool,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Script file, or - for stdin
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    #[command(flatten)]
    pub playback: PlaybackArgs,

    /// Tick interval while waiting, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub step: u64,

    /// Also print progress sink updates
    #[arg(long)]
    pub progress: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
