//! Player state management
//!
//! Contains the host-side state of the terminal player: what the screen
//! shows, which story's content is on display, and shared types used
//! across player modules. None of this lives in the controller.

use std::cell::RefCell;
use std::rc::Rc;

use crate::stories::{ListenerContext, SegmentBars, StoriesListener};

/// Result of processing an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
}

/// Which story's content the host is showing.
///
/// Updated from listener callbacks, the way an app swaps the displayed
/// image on `on_next`/`on_prev`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryContent {
    /// Index of the story on display
    pub shown: usize,
    /// Number of stories
    pub count: usize,
    /// Set once `on_complete` fired
    pub finished: bool,
}

impl StoryContent {
    pub fn new(count: usize) -> Self {
        Self {
            shown: 0,
            count,
            finished: false,
        }
    }

    pub fn shared(count: usize) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(count)))
    }

    /// Back to the first story (restart).
    pub fn rewind(&mut self) {
        self.shown = 0;
        self.finished = false;
    }
}

impl StoriesListener for StoryContent {
    fn on_next(&mut self, _cx: &mut ListenerContext<'_>) {
        if self.shown + 1 < self.count {
            self.shown += 1;
        }
    }

    fn on_prev(&mut self, _cx: &mut ListenerContext<'_>) {
        // Guard mirrors the content list bounds, not the controller's index.
        if self.shown == 0 {
            return;
        }
        self.shown -= 1;
    }

    fn on_complete(&mut self, _cx: &mut ListenerContext<'_>) {
        self.finished = true;
    }
}

/// Central state for the terminal player.
#[derive(Debug)]
pub struct PlayerState {
    /// Segment fill levels, fed by the controller's progress sink
    pub bars: Rc<RefCell<SegmentBars>>,
    /// Host content, fed by the controller's listener
    pub content: Rc<RefCell<StoryContent>>,

    // === UI ===
    /// Whether help overlay is visible
    pub show_help: bool,
    /// One-line message shown in the status bar (e.g. a rejected command)
    pub message: Option<String>,

    // === Terminal ===
    pub term_cols: u16,
    pub term_rows: u16,

    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl PlayerState {
    /// Rows used by the segment bar, separator and status bar.
    pub const CHROME_LINES: u16 = 3;

    pub fn new(count: usize, term_cols: u16, term_rows: u16) -> Self {
        Self {
            bars: SegmentBars::shared(count),
            content: StoryContent::shared(count),
            show_help: false,
            message: None,
            term_cols,
            term_rows,
            needs_render: true,
        }
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.term_cols = cols;
        self.term_rows = rows;
        self.needs_render = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.needs_render = true;
    }

    pub fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.needs_render = true;
        }
    }

    /// Rows available for the content panel.
    pub fn content_rows(&self) -> u16 {
        self.term_rows.saturating_sub(Self::CHROME_LINES)
    }
}
