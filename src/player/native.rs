//! Terminal stories player.
//!
//! Owns the terminal (raw mode, alternate screen), polls the controller at
//! a fixed interval, renders the bars and content from what the controller
//! reported, and feeds key presses back as commands.

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event, execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::player::input::handle_event;
use crate::player::render::{
    render_content, render_help, render_segments, render_separator_line, render_status_bar,
    StatusInfo,
};
use crate::player::state::{InputResult, PlayerState};
use crate::stories::{Clock, PlaybackState, StoriesController};

/// How a player session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerResult {
    /// The last story finished before the user quit
    Finished,
    /// The user quit before the end
    Interrupted,
}

/// Player settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerOptions {
    pub stories_count: usize,
    pub story_duration: Duration,
    pub tick_interval: Duration,
    pub show_help: bool,
}

/// Restores the terminal when dropped, including on early returns.
struct TerminalGuard;

impl TerminalGuard {
    #[cfg(not(tarpaulin_include))]
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run the interactive player until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn play_stories(options: &PlayerOptions) -> Result<PlayerResult> {
    let mut controller = StoriesController::new();
    controller.set_stories_count(options.stories_count)?;
    controller.set_story_duration(options.story_duration)?;

    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
    let mut state = PlayerState::new(options.stories_count, cols, rows);
    state.show_help = options.show_help;
    controller.set_listener(Rc::clone(&state.content));
    controller.set_progress_sink(Rc::clone(&state.bars));

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    controller.start()?;
    tracing::info!(
        count = options.stories_count,
        duration_ms = options.story_duration.as_millis() as u64,
        "player started"
    );

    loop {
        controller.tick();
        if controller.state() == PlaybackState::Running {
            state.needs_render = true;
        }
        if state.needs_render {
            render_frame(&mut stdout, &state, &controller)?;
            state.needs_render = false;
        }

        if event::poll(options.tick_interval)? {
            let event = event::read()?;
            if handle_event(event, &mut state, &mut controller) == InputResult::Quit {
                break;
            }
        }
    }

    let finished = state.content.borrow().finished;
    controller.destroy();
    tracing::info!(finished, "player closed");
    Ok(if finished {
        PlayerResult::Finished
    } else {
        PlayerResult::Interrupted
    })
}

/// Draw one full frame: bars, content, separator, status and help.
pub fn render_frame<W: Write, C: Clock>(
    out: &mut W,
    state: &PlayerState,
    controller: &StoriesController<C>,
) -> Result<()> {
    let width = state.term_cols;
    let rows = state.term_rows;

    render_segments(out, width, 0, state.bars.borrow().fractions())?;

    {
        let content = state.content.borrow();
        render_content(
            out,
            width,
            1,
            state.content_rows(),
            content.shown,
            content.count,
            content.finished,
        )?;
    }

    render_separator_line(out, width, rows.saturating_sub(2))?;
    let info = StatusInfo {
        state: controller.state(),
        index: controller.current_index(),
        count: controller.stories_count().unwrap_or(0),
        elapsed: controller.elapsed(),
        duration: controller.story_duration().unwrap_or_default(),
        message: state.message.as_deref(),
    };
    render_status_bar(out, rows.saturating_sub(1), &info)?;

    if state.show_help {
        render_help(out, width, rows)?;
    }
    out.flush()?;
    Ok(())
}
