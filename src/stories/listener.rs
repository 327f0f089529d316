//! Listener capability and the context handed to callbacks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::state::{StoryCommand, StoryEvent};

/// Receives lifecycle callbacks from the controller.
///
/// Every method has an empty default so a host only implements the events it
/// cares about. Callbacks cannot borrow the controller; to drive it from a
/// callback, queue a command on the [`ListenerContext`].
pub trait StoriesListener {
    fn on_next(&mut self, _cx: &mut ListenerContext<'_>) {}

    fn on_prev(&mut self, _cx: &mut ListenerContext<'_>) {}

    fn on_complete(&mut self, _cx: &mut ListenerContext<'_>) {}
}

/// View of the controller passed to a listener callback.
///
/// Commands queued here are applied in order once the callback returns,
/// before the command (or tick) that caused the callback returns.
#[derive(Debug)]
pub struct ListenerContext<'a> {
    index: usize,
    count: usize,
    queue: &'a mut VecDeque<StoryCommand>,
}

impl<'a> ListenerContext<'a> {
    pub(crate) fn new(index: usize, count: usize, queue: &'a mut VecDeque<StoryCommand>) -> Self {
        Self {
            index,
            count,
            queue,
        }
    }

    /// Index of the segment that is current after the transition.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total number of segments.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Queue a command to run after this callback returns.
    pub fn request(&mut self, command: StoryCommand) {
        self.queue.push_back(command);
    }
}

/// Dispatch an event to the matching listener method.
pub(crate) fn dispatch(
    listener: &mut dyn StoriesListener,
    event: StoryEvent,
    cx: &mut ListenerContext<'_>,
) {
    match event {
        StoryEvent::Next => listener.on_next(cx),
        StoryEvent::Prev => listener.on_prev(cx),
        StoryEvent::Complete => listener.on_complete(cx),
    }
}

impl<T: StoriesListener + ?Sized> StoriesListener for Rc<RefCell<T>> {
    fn on_next(&mut self, cx: &mut ListenerContext<'_>) {
        self.borrow_mut().on_next(cx);
    }

    fn on_prev(&mut self, cx: &mut ListenerContext<'_>) {
        self.borrow_mut().on_prev(cx);
    }

    fn on_complete(&mut self, cx: &mut ListenerContext<'_>) {
        self.borrow_mut().on_complete(cx);
    }
}

/// A fired event and the segment index current right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedEvent {
    pub event: StoryEvent,
    pub index: usize,
}

/// Listener that records every event it receives.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, for registering with a controller while keeping access.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Number of times `event` fired.
    pub fn count(&self, event: StoryEvent) -> usize {
        self.events.iter().filter(|e| e.event == event).count()
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, event: StoryEvent, cx: &ListenerContext<'_>) {
        self.events.push(LoggedEvent {
            event,
            index: cx.index(),
        });
    }
}

impl StoriesListener for EventLog {
    fn on_next(&mut self, cx: &mut ListenerContext<'_>) {
        self.push(StoryEvent::Next, cx);
    }

    fn on_prev(&mut self, cx: &mut ListenerContext<'_>) {
        self.push(StoryEvent::Prev, cx);
    }

    fn on_complete(&mut self, cx: &mut ListenerContext<'_>) {
        self.push(StoryEvent::Complete, cx);
    }
}
