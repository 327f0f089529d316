//! Keyboard input handling for the terminal player.
//!
//! Keys map to [`KeyAction`]s, which are then applied to the controller.
//! The controller knows nothing about keys; this is the only place that does.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::{InputResult, PlayerState};
use crate::stories::{Clock, PlaybackState, StoriesController, StoryCommand};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Skip,
    Reverse,
    TogglePause,
    Restart,
    ToggleHelp,
    Quit,
}

/// Map a key event to an action, if it has one.
pub fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => Some(KeyAction::Skip),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => Some(KeyAction::Reverse),
        KeyCode::Char(' ') => Some(KeyAction::TogglePause),
        KeyCode::Char('r') => Some(KeyAction::Restart),
        KeyCode::Char('?') => Some(KeyAction::ToggleHelp),
        _ => None,
    }
}

/// Handle a keyboard event.
pub fn handle_key_event<C: Clock>(
    key: KeyEvent,
    state: &mut PlayerState,
    controller: &mut StoriesController<C>,
) -> InputResult {
    let Some(action) = key_action(key) else {
        return InputResult::Continue;
    };

    // If help is showing, any action except quit closes it
    if state.show_help && action != KeyAction::Quit {
        state.toggle_help();
        return InputResult::Continue;
    }

    state.clear_message();
    let result = match action {
        KeyAction::Quit => return InputResult::Quit,
        KeyAction::ToggleHelp => {
            state.toggle_help();
            return InputResult::Continue;
        }
        KeyAction::Skip => controller.apply(StoryCommand::Skip),
        KeyAction::Reverse => controller.apply(StoryCommand::Reverse),
        KeyAction::TogglePause => match controller.state() {
            PlaybackState::Paused => controller.apply(StoryCommand::Resume),
            _ => controller.apply(StoryCommand::Pause),
        },
        KeyAction::Restart => {
            controller.reset();
            state.content.borrow_mut().rewind();
            controller.apply(StoryCommand::Start)
        }
    };

    if let Err(err) = result {
        tracing::debug!(?action, %err, "key action rejected");
        state.set_message(err.to_string());
    }
    state.needs_render = true;
    InputResult::Continue
}
