//! Input handling for the terminal player.
//!
//! Dispatches crossterm events to the keyboard handler and returns
//! control flow signals.

mod keyboard;

pub use keyboard::{handle_key_event, key_action, KeyAction};

use crossterm::event::Event;

use crate::player::state::{InputResult, PlayerState};
use crate::stories::{Clock, StoriesController};

/// Handle any input event, dispatching to the appropriate handler.
pub fn handle_event<C: Clock>(
    event: Event,
    state: &mut PlayerState,
    controller: &mut StoriesController<C>,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, state, controller),
        Event::Resize(cols, rows) => {
            state.handle_resize(cols, rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore mouse, focus events, etc.
    }
}
