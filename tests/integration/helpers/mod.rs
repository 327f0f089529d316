//! Shared test helpers

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use assert_cmd::Command;
use stories::stories::{EventLog, ManualClock, ProgressLog, StoriesController, StoryEvent};

/// A controller on a manual clock with recording listener and sink.
pub struct Harness {
    pub clock: ManualClock,
    pub controller: StoriesController<ManualClock>,
    pub events: Rc<RefCell<EventLog>>,
    pub sink: Rc<RefCell<ProgressLog>>,
}

impl Harness {
    pub fn new(count: usize, duration_ms: u64) -> Self {
        let clock = ManualClock::new();
        let mut controller = StoriesController::with_clock(clock.clone());
        controller.set_stories_count(count).unwrap();
        controller
            .set_story_duration(Duration::from_millis(duration_ms))
            .unwrap();
        let events = EventLog::shared();
        let sink = ProgressLog::shared();
        controller.set_listener(Rc::clone(&events));
        controller.set_progress_sink(Rc::clone(&sink));
        Self {
            clock,
            controller,
            events,
            sink,
        }
    }

    /// Advance the clock by `ms` and tick once.
    pub fn wait(&mut self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
        self.controller.tick();
    }

    /// Advance in `step`-sized ticks.
    pub fn wait_in_steps(&mut self, ms: u64, step: u64) {
        let mut waited = 0;
        while waited < ms {
            let chunk = step.min(ms - waited);
            self.wait(chunk);
            waited += chunk;
        }
    }

    pub fn count(&self, event: StoryEvent) -> usize {
        self.events.borrow().count(event)
    }

    pub fn event_kinds(&self) -> Vec<StoryEvent> {
        self.events.borrow().events().iter().map(|e| e.event).collect()
    }

    /// Assert the segment partition: full before, partial at, empty after.
    pub fn assert_partition(&self) {
        let index = self.controller.current_index();
        let fractions = self.controller.fractions();
        for (i, &fraction) in fractions.iter().enumerate() {
            if i < index {
                assert_eq!(fraction, 1.0, "segment {i} before current {index}: {fractions:?}");
            } else if i == index {
                assert!((0.0..=1.0).contains(&fraction), "{fractions:?}");
            } else {
                assert_eq!(fraction, 0.0, "segment {i} after current {index}: {fractions:?}");
            }
        }
    }
}

/// The stories binary, with colors and logs quieted.
pub fn stories_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stories").expect("stories binary should build");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Write `content` to `name` inside `dir`, returning the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
