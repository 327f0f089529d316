//! Progress sink: where segment fill levels are reported.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

/// Consumer of segment progress, typically a renderer.
///
/// `fill` is only ever called for the active segment, with strictly
/// increasing fractions, ending at 1.0 when the segment finishes. `clear`
/// empties a segment (reverse, restart, reset); fills for it may follow.
pub trait ProgressSink {
    fn fill(&mut self, index: usize, fraction: f64);

    fn clear(&mut self, index: usize);
}

/// Sink that drops every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn fill(&mut self, _index: usize, _fraction: f64) {}

    fn clear(&mut self, _index: usize) {}
}

impl<T: ProgressSink + ?Sized> ProgressSink for Rc<RefCell<T>> {
    fn fill(&mut self, index: usize, fraction: f64) {
        self.borrow_mut().fill(index, fraction);
    }

    fn clear(&mut self, index: usize) {
        self.borrow_mut().clear(index);
    }
}

/// One sink call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum SinkUpdate {
    Fill { index: usize, fraction: f64 },
    Clear { index: usize },
}

/// Sink that records every call, in order.
#[derive(Debug, Default)]
pub struct ProgressLog {
    updates: Vec<SinkUpdate>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn updates(&self) -> &[SinkUpdate] {
        &self.updates
    }

    /// Fractions reported for `index`, in order (clears are skipped).
    pub fn fills_for(&self, index: usize) -> Vec<f64> {
        self.updates
            .iter()
            .filter_map(|u| match *u {
                SinkUpdate::Fill { index: i, fraction } if i == index => Some(fraction),
                _ => None,
            })
            .collect()
    }

    pub fn drain(&mut self) -> Vec<SinkUpdate> {
        std::mem::take(&mut self.updates)
    }
}

impl ProgressSink for ProgressLog {
    fn fill(&mut self, index: usize, fraction: f64) {
        self.updates.push(SinkUpdate::Fill { index, fraction });
    }

    fn clear(&mut self, index: usize) {
        self.updates.push(SinkUpdate::Clear { index });
    }
}

/// Mirror of every segment's fill level, as a renderer would keep it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentBars {
    fractions: Vec<f64>,
}

impl SegmentBars {
    pub fn new(count: usize) -> Self {
        Self {
            fractions: vec![0.0; count],
        }
    }

    pub fn shared(count: usize) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(count)))
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }
}

impl ProgressSink for SegmentBars {
    fn fill(&mut self, index: usize, fraction: f64) {
        if let Some(slot) = self.fractions.get_mut(index) {
            *slot = fraction.clamp(0.0, 1.0);
        }
    }

    fn clear(&mut self, index: usize) {
        if let Some(slot) = self.fractions.get_mut(index) {
            *slot = 0.0;
        }
    }
}
