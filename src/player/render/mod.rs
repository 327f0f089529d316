//! Rendering components for the terminal player.
//!
//! This module contains the UI rendering functions for the player:
//! segmented progress bar, content panel, status bar and help overlay.

mod content;
mod help;
mod segments;
mod status;

pub use content::{content_caption, render_content, story_color};
pub use help::{calc_help_start_col, calc_help_start_row, render_help, HELP_BOX_WIDTH, HELP_LINES};
pub use segments::{build_segment_cells, render_segments, segment_width, BarCell};
pub use status::{
    build_status_text, format_seconds, render_separator_line, render_status_bar, StatusInfo,
};
