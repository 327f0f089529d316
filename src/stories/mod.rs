//! Stories playback controller
//!
//! A row of N equally long segments that fill one after another, with
//! commands to pause, resume, skip forward and go back.
//!
//! # Architecture
//!
//! - `controller`: the [`StoriesController`] state machine
//! - `state`: [`PlaybackState`], [`StoryCommand`] and [`StoryEvent`]
//! - `timer`: the single pending [`SegmentTimer`] and its slot
//! - `clock`: [`Clock`] sources ([`SystemClock`], [`ManualClock`])
//! - `listener`: the [`StoriesListener`] capability and callback context
//! - `sink`: the [`ProgressSink`] that receives segment fill levels
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use stories::stories::{ManualClock, PlaybackState, StoriesController};
//!
//! let clock = ManualClock::new();
//! let mut controller = StoriesController::with_clock(clock.clone());
//! controller.set_stories_count(3).unwrap();
//! controller.set_story_duration(Duration::from_millis(3000)).unwrap();
//! controller.start().unwrap();
//!
//! clock.advance(Duration::from_millis(3000));
//! controller.tick();
//! assert_eq!(controller.current_index(), 1);
//! assert_eq!(controller.state(), PlaybackState::Running);
//! ```

mod clock;
mod controller;
mod error;
mod listener;
mod sink;
mod state;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::StoriesController;
pub use error::{ConfigIssue, StoriesError};
pub use listener::{EventLog, ListenerContext, LoggedEvent, StoriesListener};
pub use sink::{NoopSink, ProgressLog, ProgressSink, SegmentBars, SinkUpdate};
pub use state::{PlaybackState, StoryCommand, StoryEvent};
pub use timer::{SegmentTimer, TimerSlot};
