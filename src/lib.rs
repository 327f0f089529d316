//! Stories - segmented, timed progress playback
//!
//! The core is [`stories::StoriesController`], a single-threaded state
//! machine over N equally long segments with one pending timer. Around it:
//!
//! - `player`: interactive terminal host (bars, content, key bindings)
//! - `simulate`: deterministic scripted runs on a manual clock
//! - `config`: TOML configuration
//! - `cli`: command-line definitions (shared with `xtask`)

pub mod cli;
pub mod config;
pub mod player;
pub mod simulate;
pub mod stories;

pub use config::Config;
pub use stories::{PlaybackState, StoriesController, StoriesError};
