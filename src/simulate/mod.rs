//! Scripted, deterministic playback.
//!
//! Drives a [`StoriesController`](crate::stories::StoriesController) on a
//! [`ManualClock`](crate::stories::ManualClock) from a small line-oriented
//! script and records what happened as serializable [`Record`]s.

mod runner;
mod script;

pub use runner::{Record, Simulation, SimulationOptions};
pub use script::{parse_script, ScriptError, ScriptLine, Step};
