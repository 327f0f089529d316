//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod play;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};
use stories::cli::PlaybackArgs;
use stories::Config;

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Apply command-line overrides on top of the config.
pub fn apply_overrides(config: &mut Config, args: &PlaybackArgs) -> Result<()> {
    if let Some(count) = args.count {
        config.playback.stories_count = count;
    }
    if let Some(duration) = args.duration {
        config.playback.story_duration_ms = duration;
    }
    anyhow::ensure!(
        config.playback.stories_count > 0,
        "stories count must be greater than zero"
    );
    anyhow::ensure!(
        config.playback.story_duration_ms > 0,
        "story duration must be greater than zero"
    );
    Ok(())
}

/// Load config and apply overrides in one go.
pub fn resolve_config(path: Option<&Path>, args: &PlaybackArgs) -> Result<Config> {
    let mut config = load_config(path).context("Failed to load configuration")?;
    apply_overrides(&mut config, args)?;
    Ok(config)
}
