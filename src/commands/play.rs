//! Play subcommand handler

use std::path::Path;

use anyhow::{bail, Result};

use stories::cli::PlayArgs;
use stories::player::{play_stories, PlayerOptions, PlayerResult};

use super::resolve_config;

/// Run the interactive player.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&Path>, args: &PlayArgs) -> Result<()> {
    let config = resolve_config(config_path, &args.playback)?;

    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        bail!("The player needs an interactive terminal (try `stories simulate` instead)");
    }

    let options = PlayerOptions {
        stories_count: config.playback.stories_count,
        story_duration: config.playback.story_duration(),
        tick_interval: config.player.tick_interval(),
        show_help: args.help_on_start || config.player.show_help_on_start,
    };

    match play_stories(&options)? {
        PlayerResult::Finished => println!("Watched all {} stories.", options.stories_count),
        PlayerResult::Interrupted => println!("Stopped."),
    }
    Ok(())
}
