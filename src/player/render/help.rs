//! Help overlay rendering for the terminal player.
//!
//! Displays a centered help box with all available keyboard shortcuts.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

/// Help text lines for the help overlay.
pub const HELP_LINES: &[&str] = &[
    "╔═══════════════════════════════════╗",
    "║        Stories Player Help        ║",
    "╠═══════════════════════════════════╣",
    "║                                   ║",
    "║  Navigation                       ║",
    "║    ->  l  n   Skip to next story  ║",
    "║    <-  h  p   Back one story      ║",
    "║                                   ║",
    "║  Playback                         ║",
    "║    Space      Pause / Resume      ║",
    "║    r          Restart             ║",
    "║                                   ║",
    "║  General                          ║",
    "║    ?          Show this help      ║",
    "║    q  Esc     Quit player         ║",
    "║                                   ║",
    "║     Press any key to close        ║",
    "╚═══════════════════════════════════╝",
];

/// Width of the help box (for centering calculations).
pub const HELP_BOX_WIDTH: usize = 37;

/// Calculate the starting row for centering the help box.
pub fn calc_help_start_row(term_height: u16) -> u16 {
    let box_height = HELP_LINES.len() as u16;
    (term_height.saturating_sub(box_height)) / 2
}

/// Calculate the starting column for centering the help box.
pub fn calc_help_start_col(term_width: u16) -> u16 {
    ((term_width as usize).saturating_sub(HELP_BOX_WIDTH) / 2) as u16
}

/// Render the help overlay centered in the terminal.
pub fn render_help<W: Write>(out: &mut W, width: u16, height: u16) -> Result<()> {
    let start_row = calc_help_start_row(height);
    let start_col = calc_help_start_col(width);

    queue!(out, SetForegroundColor(Color::Cyan))?;
    for (i, line) in HELP_LINES.iter().enumerate() {
        let row = start_row + i as u16;
        if row >= height {
            break;
        }
        queue!(out, MoveTo(start_col, row), Print(line))?;
    }
    queue!(out, ResetColor)?;
    Ok(())
}
