//! Status bar rendering for the terminal player.
//!
//! Displays playback state, the current story, elapsed time and the last
//! message (e.g. a rejected command).

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::stories::PlaybackState;

/// Format a duration as seconds with one decimal (`1.5s`).
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}

/// Everything the status bar shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInfo<'a> {
    pub state: PlaybackState,
    pub index: usize,
    pub count: usize,
    pub elapsed: Duration,
    pub duration: Duration,
    pub message: Option<&'a str>,
}

/// Build the visible status text (no colors).
pub fn build_status_text(info: &StatusInfo<'_>) -> String {
    let icon = match info.state {
        PlaybackState::Running => "▶",
        PlaybackState::Paused => "⏸",
        PlaybackState::Completed => "✓",
        PlaybackState::Idle | PlaybackState::Destroyed => "■",
    };
    let mut text = format!(
        " {} {:<9} story {}/{}  {}/{}",
        icon,
        info.state.label(),
        info.index + 1,
        info.count,
        format_seconds(info.elapsed),
        format_seconds(info.duration),
    );
    match info.message {
        Some(message) => {
            text.push_str("  ");
            text.push_str(message);
        }
        None => text.push_str("  ?:help  q:quit"),
    }
    text
}

/// Render a separator line at `row`.
pub fn render_separator_line<W: Write>(out: &mut W, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!("\x1b[{};1H\x1b[90m", row + 1)); // Move + dark gray
    for _ in 0..width {
        output.push('─');
    }
    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}

/// Render the status bar at `row`.
pub fn render_status_bar<W: Write>(
    out: &mut W,
    row: u16,
    info: &StatusInfo<'_>,
) -> Result<()> {
    const WHITE: &str = "\x1b[97m";
    const YELLOW: &str = "\x1b[33m";
    const RESET: &str = "\x1b[0m";

    let color = if info.message.is_some() { YELLOW } else { WHITE };
    write!(
        out,
        "\x1b[{};1H\x1b[2K{}{}{}",
        row + 1,
        color,
        build_status_text(info),
        RESET
    )?;
    Ok(())
}
