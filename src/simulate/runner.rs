//! Runs a parsed script against a controller on a manual clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use super::script::{ScriptLine, Step};
use crate::stories::{
    EventLog, ManualClock, PlaybackState, ProgressLog, SinkUpdate, StoriesController,
    StoriesError, StoryEvent,
};

/// Per-wait limit on step-by-step ticking when progress is recorded.
const MAX_PROGRESS_TICKS: usize = 10_000;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub stories_count: usize,
    pub story_duration: Duration,
    /// Tick interval used while waiting
    pub step: Duration,
    /// Include sink updates in the output
    pub progress: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            stories_count: 10,
            story_duration: Duration::from_millis(3000),
            step: Duration::from_millis(100),
            progress: false,
        }
    }
}

/// One line of simulator output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Command {
        at_ms: u64,
        line: usize,
        command: &'static str,
        state: PlaybackState,
        index: usize,
    },
    Error {
        at_ms: u64,
        line: usize,
        command: &'static str,
        message: String,
    },
    Event {
        at_ms: u64,
        event: StoryEvent,
        index: usize,
    },
    Fill {
        at_ms: u64,
        index: usize,
        fraction: f64,
    },
    Clear {
        at_ms: u64,
        index: usize,
    },
    Summary {
        at_ms: u64,
        state: PlaybackState,
        index: usize,
        elapsed_ms: u64,
        fractions: Vec<f64>,
    },
}

/// A controller wired to recording listener and sink.
pub struct Simulation {
    clock: ManualClock,
    controller: StoriesController<ManualClock>,
    events: Rc<RefCell<EventLog>>,
    sink: Rc<RefCell<ProgressLog>>,
    options: SimulationOptions,
    records: Vec<Record>,
}

impl Simulation {
    pub fn new(options: SimulationOptions) -> Result<Self, StoriesError> {
        let clock = ManualClock::new();
        let mut controller = StoriesController::with_clock(clock.clone());
        controller.set_stories_count(options.stories_count)?;
        controller.set_story_duration(options.story_duration)?;

        let events = EventLog::shared();
        let sink = ProgressLog::shared();
        controller.set_listener(Rc::clone(&events));
        controller.set_progress_sink(Rc::clone(&sink));

        Ok(Self {
            clock,
            controller,
            events,
            sink,
            options,
            records: Vec::new(),
        })
    }

    /// Run every step, then append a summary. Returns all records.
    pub fn run(mut self, script: &[ScriptLine]) -> Vec<Record> {
        for line in script {
            self.run_step(line);
        }
        let summary = Record::Summary {
            at_ms: self.at_ms(),
            state: self.controller.state(),
            index: self.controller.current_index(),
            elapsed_ms: self.controller.elapsed().as_millis() as u64,
            fractions: self.controller.fractions(),
        };
        self.records.push(summary);
        self.records
    }

    fn run_step(&mut self, line: &ScriptLine) {
        match line.step {
            Step::Command(command) => {
                let result = self.controller.apply(command);
                let at_ms = self.at_ms();
                let record = match result {
                    Ok(()) => Record::Command {
                        at_ms,
                        line: line.line,
                        command: command.name(),
                        state: self.controller.state(),
                        index: self.controller.current_index(),
                    },
                    Err(err) => Record::Error {
                        at_ms,
                        line: line.line,
                        command: command.name(),
                        message: err.to_string(),
                    },
                };
                self.records.push(record);
                self.collect();
            }
            Step::Wait(total) => {
                let step = self.options.step.max(Duration::from_millis(1));
                let mut waited = Duration::ZERO;
                let mut ticks = 0;
                while waited < total {
                    let left = total - waited;
                    let chunk = if self.options.progress && ticks < MAX_PROGRESS_TICKS {
                        step
                    } else {
                        // Nothing observable happens between expiries.
                        self.controller
                            .time_to_expiry()
                            .map_or(left, |until| round_up(until, step))
                    };
                    let chunk = chunk.min(left);
                    self.clock.advance(chunk);
                    waited += chunk;
                    ticks += 1;
                    self.controller.tick();
                    self.collect();
                }
            }
            Step::Tick => {
                self.controller.tick();
                self.collect();
            }
        }
    }

    /// Move recorded listener events and sink updates into the output.
    fn collect(&mut self) {
        let at_ms = self.at_ms();
        if self.options.progress {
            for update in self.sink.borrow_mut().drain() {
                self.records.push(match update {
                    SinkUpdate::Fill { index, fraction } => Record::Fill {
                        at_ms,
                        index,
                        fraction,
                    },
                    SinkUpdate::Clear { index } => Record::Clear { at_ms, index },
                });
            }
        } else {
            self.sink.borrow_mut().drain();
        }
        for logged in self.events.borrow_mut().drain() {
            self.records.push(Record::Event {
                at_ms,
                event: logged.event,
                index: logged.index,
            });
        }
    }

    fn at_ms(&self) -> u64 {
        self.clock.since_origin().as_millis() as u64
    }
}

/// `until` rounded up to a whole, non-zero number of `step`s.
fn round_up(until: Duration, step: Duration) -> Duration {
    let step_nanos = step.as_nanos();
    let steps = ((until.as_nanos() + step_nanos - 1) / step_nanos).max(1);
    let nanos = steps * step_nanos;
    Duration::new((nanos / NANOS_PER_SEC) as u64, (nanos % NANOS_PER_SEC) as u32)
}
