//! Controller errors.

use std::time::Duration;

use super::state::PlaybackState;

/// Errors returned by [`StoriesController`](super::StoriesController) commands.
///
/// Every variant is recoverable: the controller is left unchanged and the
/// caller may retry once the state or configuration is fixed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoriesError {
    #[error("Cannot start: story {missing} is not configured")]
    NotConfigured { missing: &'static str },

    #[error("Cannot {command} while {state}")]
    InvalidState {
        command: &'static str,
        state: PlaybackState,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(ConfigIssue),

    #[error("Story index {index} is out of bounds (count is {count})")]
    IndexOutOfBounds { index: usize, count: usize },
}

/// What was wrong with a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("stories count must be greater than zero")]
    ZeroCount,

    #[error("story duration must be greater than zero (got {0:?})")]
    ZeroDuration(Duration),
}

impl StoriesError {
    pub(crate) fn invalid_state(command: &'static str, state: PlaybackState) -> Self {
        Self::InvalidState { command, state }
    }
}
