//! Integration tests
//!
//! - `controller_test`: playback scenarios and invariants through the public API
//! - `simulate_test`: the `simulate` subcommand end to end
//! - `cli_test`: help, config and completions subcommands

mod helpers;

mod cli_test;
mod controller_test;
mod simulate_test;
