//! Terminal stories player
//!
//! An interactive host for the [`StoriesController`](crate::stories::StoriesController):
//! it renders the segmented bar from the controller's progress sink, swaps
//! the displayed content from listener callbacks, and maps keys to commands.
//!
//! # Architecture
//!
//! - `state`: [`PlayerState`] and the host-side [`StoryContent`] listener
//! - `input/`: keyboard handling (keys to controller commands)
//! - `render/`: segmented bar, content panel, status bar and help overlay
//!
//! # Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use stories::player::{play_stories, PlayerOptions, PlayerResult};
//!
//! let options = PlayerOptions {
//!     stories_count: 10,
//!     story_duration: Duration::from_millis(3000),
//!     tick_interval: Duration::from_millis(16),
//!     show_help: false,
//! };
//! match play_stories(&options).unwrap() {
//!     PlayerResult::Finished => println!("Watched every story"),
//!     PlayerResult::Interrupted => println!("Stopped by user"),
//! }
//! ```

pub(crate) mod input;
mod native;
pub mod render;
pub mod state;

pub use native::{play_stories, render_frame, PlayerOptions, PlayerResult};
pub use state::{InputResult, PlayerState, StoryContent};
