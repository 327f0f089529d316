//! Simulate subcommand handler

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use stories::cli::SimulateArgs;
use stories::simulate::{parse_script, Simulation, SimulationOptions};

use super::resolve_config;

/// Run a script and print one JSON record per line.
pub fn handle(config_path: Option<&Path>, args: &SimulateArgs) -> Result<()> {
    let config = resolve_config(config_path, &args.playback)?;
    let text = read_script(&args.script)?;
    let script = parse_script(&text)?;

    let options = SimulationOptions {
        stories_count: config.playback.stories_count,
        story_duration: config.playback.story_duration(),
        step: Duration::from_millis(args.step),
        progress: args.progress,
    };
    tracing::debug!(steps = script.len(), ?options, "running simulation");
    let records = Simulation::new(options)?.run(&script);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read script {}", path.display()))
}
