//! The stories playback controller.
//!
//! Owns the segment count, the uniform segment duration, the current index
//! and elapsed time, and the single pending [`SegmentTimer`]. Time only moves
//! forward through [`StoriesController::tick`] (and the catch-up every
//! timeline command performs first), so the whole machine is deterministic
//! for a given [`Clock`].

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::clock::{Clock, SystemClock};
use super::error::{ConfigIssue, StoriesError};
use super::listener::{self, ListenerContext, StoriesListener};
use super::sink::{NoopSink, ProgressSink};
use super::state::{PlaybackState, StoryCommand, StoryEvent};
use super::timer::{SegmentTimer, TimerSlot};

/// Sequential, timed progress over N equally long story segments.
///
/// Not thread-safe: all commands and ticks must come from the context that
/// owns the controller.
pub struct StoriesController<C: Clock = SystemClock> {
    clock: C,
    count: Option<usize>,
    duration: Option<Duration>,
    state: PlaybackState,
    current: usize,
    /// Elapsed time of the current segment while no timer is live.
    /// While running, this is the part banked before the live timer started.
    elapsed: Duration,
    timer: TimerSlot,
    /// Last fraction sent to the sink for the current segment.
    reported: Option<f64>,
    /// Elapsed time behind `reported`.
    reported_elapsed: Duration,
    listener: Option<Box<dyn StoriesListener>>,
    sink: Box<dyn ProgressSink>,
    queue: VecDeque<StoryCommand>,
    /// "Now" as seen by commands queued during a timer expiry.
    replay_at: Option<Instant>,
}

impl StoriesController<SystemClock> {
    /// Create an unconfigured controller on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for StoriesController<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StoriesController<C> {
    /// Create an unconfigured controller driven by `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            count: None,
            duration: None,
            state: PlaybackState::Idle,
            current: 0,
            elapsed: Duration::ZERO,
            timer: TimerSlot::new(),
            reported: None,
            reported_elapsed: Duration::ZERO,
            listener: None,
            sink: Box::new(NoopSink),
            queue: VecDeque::new(),
            replay_at: None,
        }
    }

    // === Configuration ===

    /// Set the number of segments. Only allowed while stopped.
    pub fn set_stories_count(&mut self, count: usize) -> Result<(), StoriesError> {
        self.ensure_stopped("set_stories_count")?;
        if count == 0 {
            return Err(StoriesError::InvalidConfig(ConfigIssue::ZeroCount));
        }
        self.leave_terminal();
        self.count = Some(count);
        debug!(count, "stories count set");
        Ok(())
    }

    /// Set the duration shared by every segment. Only allowed while stopped.
    pub fn set_story_duration(&mut self, duration: Duration) -> Result<(), StoriesError> {
        self.ensure_stopped("set_story_duration")?;
        if duration.is_zero() {
            return Err(StoriesError::InvalidConfig(ConfigIssue::ZeroDuration(
                duration,
            )));
        }
        self.leave_terminal();
        self.duration = Some(duration);
        debug!(duration_ms = duration.as_millis() as u64, "story duration set");
        Ok(())
    }

    /// Register the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl StoriesListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Replace the progress sink.
    pub fn set_progress_sink(&mut self, sink: impl ProgressSink + 'static) {
        self.sink = Box::new(sink);
    }

    // === Commands ===

    /// Start at the first segment.
    pub fn start(&mut self) -> Result<(), StoriesError> {
        self.apply(StoryCommand::Start)
    }

    /// Start at `index`; earlier segments are shown full without callbacks.
    pub fn start_from(&mut self, index: usize) -> Result<(), StoriesError> {
        self.apply(StoryCommand::StartFrom(index))
    }

    pub fn pause(&mut self) -> Result<(), StoriesError> {
        self.apply(StoryCommand::Pause)
    }

    pub fn resume(&mut self) -> Result<(), StoriesError> {
        self.apply(StoryCommand::Resume)
    }

    /// Finish the current segment now and move to the next one.
    pub fn skip(&mut self) -> Result<(), StoriesError> {
        self.apply(StoryCommand::Skip)
    }

    /// Go back one segment. Does nothing on the first segment.
    pub fn reverse(&mut self) -> Result<(), StoriesError> {
        self.apply(StoryCommand::Reverse)
    }

    /// Cancel any pending timer and tear down. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        // Destroy cannot fail; queued commands it triggers log their own errors.
        let _ = self.apply(StoryCommand::Destroy);
    }

    /// Cancel playback and return to `Idle` with every segment empty.
    pub fn reset(&mut self) {
        let _ = self.apply(StoryCommand::Reset);
    }

    /// Apply one command, then any commands listeners queued meanwhile.
    pub fn apply(&mut self, command: StoryCommand) -> Result<(), StoriesError> {
        if matches!(
            command,
            StoryCommand::Pause | StoryCommand::Skip | StoryCommand::Reverse
        ) {
            // Let overdue expiries happen before the command acts.
            self.poll_timer();
        }
        let result = self.execute(command);
        self.flush_queue();
        result
    }

    /// Advance time: report progress and process any expired segment.
    pub fn tick(&mut self) {
        self.poll_timer();
        self.flush_queue();
    }

    // === Inspection ===

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn stories_count(&self) -> Option<usize> {
        self.count
    }

    pub fn story_duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Whether a segment timer is pending. True exactly while running.
    pub fn is_timer_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Time left until the pending timer expires, if one is pending and reachable.
    pub fn time_to_expiry(&self) -> Option<Duration> {
        let deadline = self.timer.get()?.deadline()?;
        Some(deadline.saturating_duration_since(self.clock.now()))
    }

    /// Elapsed time of the current segment.
    pub fn elapsed(&self) -> Duration {
        match self.timer.get() {
            Some(timer) => timer.elapsed_at(self.clock.now()),
            None => self.elapsed,
        }
    }

    /// Fill level of segment `index` right now.
    pub fn fraction(&self, index: usize) -> f64 {
        let count = self.count.unwrap_or(0);
        if index >= count {
            return 0.0;
        }
        match self.state {
            PlaybackState::Idle => 0.0,
            PlaybackState::Completed => 1.0,
            _ if index < self.current => 1.0,
            _ if index == self.current => self.current_fraction(),
            _ => 0.0,
        }
    }

    /// Fill level of every segment.
    pub fn fractions(&self) -> Vec<f64> {
        (0..self.count.unwrap_or(0))
            .map(|i| self.fraction(i))
            .collect()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // === Internals ===

    fn now(&self) -> Instant {
        self.replay_at.unwrap_or_else(|| self.clock.now())
    }

    fn current_fraction(&self) -> f64 {
        match self.duration {
            Some(duration) => {
                (self.elapsed().as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    fn execute(&mut self, command: StoryCommand) -> Result<(), StoriesError> {
        match command {
            StoryCommand::Start => self.begin(command, 0),
            StoryCommand::StartFrom(index) => self.begin(command, index),
            StoryCommand::Pause => self.pause_inner(),
            StoryCommand::Resume => self.resume_inner(),
            StoryCommand::Skip => self.skip_inner(),
            StoryCommand::Reverse => self.reverse_inner(),
            StoryCommand::Destroy => {
                self.destroy_inner();
                Ok(())
            }
            StoryCommand::Reset => {
                self.reset_inner();
                Ok(())
            }
        }
    }

    fn configured(&self) -> Result<(usize, Duration), StoriesError> {
        let count = self
            .count
            .ok_or(StoriesError::NotConfigured { missing: "count" })?;
        let duration = self
            .duration
            .ok_or(StoriesError::NotConfigured { missing: "duration" })?;
        Ok((count, duration))
    }

    fn ensure_stopped(&self, command: &'static str) -> Result<(), StoriesError> {
        if !self.state.is_stopped() {
            return Err(StoriesError::invalid_state(command, self.state));
        }
        Ok(())
    }

    fn ensure_active(&self, command: &'static str) -> Result<(), StoriesError> {
        if !self.state.is_active() {
            return Err(StoriesError::invalid_state(command, self.state));
        }
        Ok(())
    }

    fn leave_terminal(&mut self) {
        if self.state.is_terminal() {
            self.reset_inner();
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, index = self.current, "playback state changed");
            self.state = state;
        }
    }

    fn begin(&mut self, command: StoryCommand, index: usize) -> Result<(), StoriesError> {
        self.ensure_stopped(command.name())?;
        let (count, _) = self.configured()?;
        if index >= count {
            return Err(StoriesError::IndexOutOfBounds { index, count });
        }
        if self.state != PlaybackState::Idle {
            self.reset_inner();
        }
        for done in 0..index {
            self.sink.fill(done, 1.0);
        }
        self.enter_segment(index);
        self.set_state(PlaybackState::Running);
        self.schedule();
        Ok(())
    }

    fn pause_inner(&mut self) -> Result<(), StoriesError> {
        if self.state != PlaybackState::Running {
            return Err(StoriesError::invalid_state("pause", self.state));
        }
        let now = self.now();
        if let Some(timer) = self.timer.cancel() {
            self.elapsed = timer.elapsed_at(now);
        }
        self.set_state(PlaybackState::Paused);
        Ok(())
    }

    fn resume_inner(&mut self) -> Result<(), StoriesError> {
        if self.state != PlaybackState::Paused {
            return Err(StoriesError::invalid_state("resume", self.state));
        }
        self.set_state(PlaybackState::Running);
        self.schedule();
        Ok(())
    }

    fn skip_inner(&mut self) -> Result<(), StoriesError> {
        self.ensure_active("skip")?;
        self.timer.cancel();
        self.advance();
        Ok(())
    }

    fn reverse_inner(&mut self) -> Result<(), StoriesError> {
        self.ensure_active("reverse")?;
        if self.current == 0 {
            trace!("reverse on first story ignored");
            return Ok(());
        }
        self.timer.cancel();
        self.sink.clear(self.current);
        self.enter_segment(self.current - 1);
        self.sink.clear(self.current);
        if self.state == PlaybackState::Running {
            self.schedule();
        }
        self.emit(StoryEvent::Prev);
        Ok(())
    }

    fn destroy_inner(&mut self) {
        if self.state == PlaybackState::Destroyed {
            return;
        }
        let now = self.now();
        if let Some(timer) = self.timer.cancel() {
            // An unprocessed expiry is dropped: the segment stays where it was last shown.
            self.elapsed = if timer.is_due(now) {
                self.reported_elapsed
            } else {
                timer.elapsed_at(now)
            };
        }
        self.set_state(PlaybackState::Destroyed);
    }

    fn reset_inner(&mut self) {
        self.timer.cancel();
        if self.state != PlaybackState::Idle {
            for index in 0..self.count.unwrap_or(0) {
                self.sink.clear(index);
            }
        }
        self.enter_segment(0);
        self.set_state(PlaybackState::Idle);
    }

    /// Make `index` the current segment with nothing elapsed.
    fn enter_segment(&mut self, index: usize) {
        debug_assert!(
            self.count.map_or(index == 0, |count| index < count),
            "segment index {index} out of bounds"
        );
        self.current = index;
        self.elapsed = Duration::ZERO;
        self.reported = None;
        self.reported_elapsed = Duration::ZERO;
    }

    /// Install the timer for the current segment from its banked elapsed time.
    fn schedule(&mut self) {
        let Some(duration) = self.duration else {
            return;
        };
        let timer = SegmentTimer::schedule(self.current, self.now(), self.elapsed, duration);
        self.timer.install(timer);
    }

    /// Finish the current segment (timer already cancelled) and move on.
    fn advance(&mut self) {
        let count = self.count.unwrap_or(0);
        self.sink.fill(self.current, 1.0);
        if self.current + 1 >= count {
            self.elapsed = Duration::ZERO;
            self.set_state(PlaybackState::Completed);
            self.emit(StoryEvent::Complete);
            return;
        }
        self.enter_segment(self.current + 1);
        if self.state == PlaybackState::Running {
            self.schedule();
        }
        self.emit(StoryEvent::Next);
    }

    /// Report progress, and process every expiry that is due by now.
    fn poll_timer(&mut self) {
        while let Some(timer) = self.timer.get().copied() {
            let now = self.clock.now();
            if !timer.is_due(now) {
                self.report_progress(timer.elapsed_at(now));
                return;
            }
            trace!(index = timer.index(), "segment timer expired");
            self.replay_at = timer.deadline();
            self.timer.cancel();
            self.advance();
            self.flush_queue();
            self.replay_at = None;
        }
    }

    fn report_progress(&mut self, elapsed: Duration) {
        let Some(duration) = self.duration else {
            return;
        };
        let fraction = (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
        if self.reported.map_or(true, |last| fraction > last) {
            self.sink.fill(self.current, fraction);
            self.reported = Some(fraction);
            self.reported_elapsed = elapsed;
        }
    }

    fn emit(&mut self, event: StoryEvent) {
        debug!(?event, index = self.current, "story event");
        let count = self.count.unwrap_or(0);
        if let Some(target) = self.listener.as_deref_mut() {
            let mut cx = ListenerContext::new(self.current, count, &mut self.queue);
            listener::dispatch(target, event, &mut cx);
        }
    }

    fn flush_queue(&mut self) {
        while let Some(command) = self.queue.pop_front() {
            if let Err(err) = self.execute(command) {
                warn!(command = command.name(), %err, "dropped queued story command");
            }
        }
    }
}

impl<C: Clock> fmt::Debug for StoriesController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoriesController")
            .field("count", &self.count)
            .field("duration", &self.duration)
            .field("state", &self.state)
            .field("current", &self.current)
            .field("elapsed", &self.elapsed)
            .field("timer", &self.timer)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
