//! Script parsing for the simulator.
//!
//! One step per line. Blank lines and `#` comments are ignored.
//!
//! ```text
//! start            # or: start_from 2
//! wait 1500        # milliseconds; `1500ms` and `2s` also work
//! pause
//! resume
//! skip
//! reverse
//! tick
//! reset
//! destroy
//! ```

use std::time::Duration;

use crate::stories::StoryCommand;

/// One script step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Apply a controller command
    Command(StoryCommand),
    /// Let time pass, ticking the controller along the way
    Wait(Duration),
    /// Tick once without moving time
    Tick,
}

/// A step and the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

/// Script parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown step '{word}'")]
    UnknownStep { line: usize, word: String },

    #[error("line {line}: '{step}' needs an argument")]
    MissingArgument { line: usize, step: &'static str },

    #[error("line {line}: '{step}' takes no argument")]
    UnexpectedArgument { line: usize, step: &'static str },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        steps.push(ScriptLine {
            line,
            step: parse_step(line, content)?,
        });
    }
    Ok(steps)
}

fn parse_step(line: usize, content: &str) -> Result<Step, ScriptError> {
    let mut words = content.split_whitespace();
    let word = words.next().unwrap_or_default();
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(ScriptError::UnknownStep {
            line,
            word: extra.to_string(),
        });
    }

    let bare = |step: Step, name: &'static str| match arg {
        Some(_) => Err(ScriptError::UnexpectedArgument { line, step: name }),
        None => Ok(step),
    };

    match word.to_ascii_lowercase().as_str() {
        "start" => bare(Step::Command(StoryCommand::Start), "start"),
        "pause" => bare(Step::Command(StoryCommand::Pause), "pause"),
        "resume" => bare(Step::Command(StoryCommand::Resume), "resume"),
        "skip" => bare(Step::Command(StoryCommand::Skip), "skip"),
        "reverse" => bare(Step::Command(StoryCommand::Reverse), "reverse"),
        "destroy" => bare(Step::Command(StoryCommand::Destroy), "destroy"),
        "reset" => bare(Step::Command(StoryCommand::Reset), "reset"),
        "tick" => bare(Step::Tick, "tick"),
        "start_from" => {
            let value = arg.ok_or(ScriptError::MissingArgument {
                line,
                step: "start_from",
            })?;
            let index = value.parse().map_err(|_| ScriptError::InvalidNumber {
                line,
                value: value.to_string(),
            })?;
            Ok(Step::Command(StoryCommand::StartFrom(index)))
        }
        "wait" => {
            let value = arg.ok_or(ScriptError::MissingArgument { line, step: "wait" })?;
            Ok(Step::Wait(parse_duration(line, value)?))
        }
        _ => Err(ScriptError::UnknownStep {
            line,
            word: word.to_string(),
        }),
    }
}

/// Parse `1500`, `1500ms` or `2s`.
fn parse_duration(line: usize, value: &str) -> Result<Duration, ScriptError> {
    let invalid = || ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    };
    if let Some(ms) = value.strip_suffix("ms") {
        return ms.parse().map(Duration::from_millis).map_err(|_| invalid());
    }
    if let Some(secs) = value.strip_suffix('s') {
        return secs
            .parse::<u64>()
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .map(Duration::from_millis)
            .ok_or_else(invalid);
    }
    value.parse().map(Duration::from_millis).map_err(|_| invalid())
}
