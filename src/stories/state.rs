//! Playback state, commands and listener events.
//!
//! These are the plain value types shared by the controller, the listener
//! context (queued commands) and the host surfaces (player, simulator).

use std::fmt;

use serde::Serialize;

/// Lifecycle state of a [`StoriesController`](super::StoriesController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Configured (or not) but never started, or reset.
    #[default]
    Idle,
    /// The current segment's timer is live.
    Running,
    /// Elapsed time is frozen; no timer is pending.
    Paused,
    /// Every segment has finished.
    Completed,
    /// Torn down explicitly.
    Destroyed,
}

impl PlaybackState {
    /// Whether playback is underway (a segment is current and may be resumed).
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Whether the controller is stopped and may be reconfigured.
    pub fn is_stopped(self) -> bool {
        !self.is_active()
    }

    /// Whether this is a terminal state that only start/reset can leave.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Destroyed)
    }

    /// Short lowercase label for status lines and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A controller command, as issued by a host or queued from a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "index", rename_all = "snake_case")]
pub enum StoryCommand {
    Start,
    StartFrom(usize),
    Pause,
    Resume,
    Skip,
    Reverse,
    Destroy,
    Reset,
}

impl StoryCommand {
    /// Command name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::StartFrom(_) => "start_from",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Skip => "skip",
            Self::Reverse => "reverse",
            Self::Destroy => "destroy",
            Self::Reset => "reset",
        }
    }
}

/// Listener-facing event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryEvent {
    Next,
    Prev,
    Complete,
}
