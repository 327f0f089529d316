//! The single pending segment timer.
//!
//! A [`SegmentTimer`] is a deadline for the active segment. The controller
//! keeps it in a [`TimerSlot`], which holds at most one handle: installing a
//! new timer always takes the previous one out first, so an abandoned
//! segment can never fire.

use std::time::{Duration, Instant};

/// Deadline for one run of a segment (from start or from resume).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTimer {
    index: usize,
    started_at: Instant,
    /// Elapsed time carried over from before this run (pause/resume).
    banked: Duration,
    /// `None` when the deadline lies beyond what `Instant` can represent.
    deadline: Option<Instant>,
}

impl SegmentTimer {
    /// Schedule segment `index` to finish `duration - banked` after `now`.
    pub fn schedule(index: usize, now: Instant, banked: Duration, duration: Duration) -> Self {
        let remaining = duration.saturating_sub(banked);
        Self {
            index,
            started_at: now,
            banked,
            deadline: now.checked_add(remaining),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.map_or(false, |deadline| now >= deadline)
    }

    /// Total elapsed time of the segment at `now`, never past the deadline.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let now = match self.deadline {
            Some(deadline) => now.min(deadline),
            None => now,
        };
        self.banked
            .saturating_add(now.saturating_duration_since(self.started_at))
    }
}

/// Owner of the at-most-one pending timer.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<SegmentTimer>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending timer, returning the cancelled one (if any).
    pub fn install(&mut self, timer: SegmentTimer) -> Option<SegmentTimer> {
        let previous = self.cancel();
        tracing::trace!(index = timer.index, "segment timer scheduled");
        self.pending = Some(timer);
        previous
    }

    /// Cancel the pending timer, returning it.
    pub fn cancel(&mut self) -> Option<SegmentTimer> {
        let previous = self.pending.take();
        if let Some(timer) = &previous {
            tracing::trace!(index = timer.index, "segment timer cancelled");
        }
        previous
    }

    pub fn get(&self) -> Option<&SegmentTimer> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
