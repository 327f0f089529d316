//! Playback scenarios and invariants for the stories controller

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use stories::stories::{
    EventLog, ListenerContext, PlaybackState, SinkUpdate, StoriesListener, StoryCommand,
    StoryEvent,
};

use crate::helpers::Harness;

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn start_activates_only_the_first_segment() {
    for n in 1..=12 {
        let mut h = Harness::new(n, 1000);
        h.controller.start().unwrap();
        assert_eq!(h.controller.state(), PlaybackState::Running);
        assert_eq!(h.controller.current_index(), 0);
        assert_eq!(h.controller.fractions(), vec![0.0; n], "n = {n}");
        h.assert_partition();
    }
}

#[test]
fn partition_holds_through_mixed_commands() {
    let mut h = Harness::new(6, 1000);
    h.controller.start().unwrap();
    h.assert_partition();
    h.wait(700);
    h.assert_partition();
    h.controller.skip().unwrap();
    h.assert_partition();
    h.wait(300);
    h.controller.pause().unwrap();
    h.assert_partition();
    h.controller.skip().unwrap();
    h.controller.reverse().unwrap();
    h.assert_partition();
    h.controller.resume().unwrap();
    h.wait(2500);
    h.assert_partition();
    assert_eq!(h.controller.current_index(), 3);
}

#[test]
fn reverse_at_first_segment_is_a_no_op() {
    let mut h = Harness::new(4, 1000);
    h.controller.start().unwrap();
    h.wait(400);
    let elapsed = h.controller.elapsed();

    h.controller.reverse().unwrap();

    assert_eq!(h.controller.state(), PlaybackState::Running);
    assert_eq!(h.controller.current_index(), 0);
    assert_eq!(h.controller.elapsed(), elapsed);
    assert_eq!(h.count(StoryEvent::Prev), 0);
}

#[test]
fn skip_on_last_segment_completes_without_next() {
    let mut h = Harness::new(3, 1000);
    h.controller.start_from(2).unwrap();

    h.controller.skip().unwrap();

    assert_eq!(h.controller.state(), PlaybackState::Completed);
    assert_eq!(h.event_kinds(), vec![StoryEvent::Complete]);
    assert!(!h.controller.is_timer_pending());
    assert_eq!(h.controller.fractions(), vec![1.0; 3]);
}

#[test]
fn pause_resume_cycles_preserve_segment_time() {
    let mut h = Harness::new(2, 1000);
    h.controller.start().unwrap();
    h.wait(300);
    h.controller.pause().unwrap();
    h.wait(5000);
    h.controller.resume().unwrap();
    h.wait(200);
    h.controller.pause().unwrap();
    h.wait(1000);
    h.controller.resume().unwrap();

    // 300 + 200 + 499 = 999ms of running time
    h.wait(499);
    assert_eq!(h.controller.current_index(), 0);
    assert_eq!(h.controller.elapsed(), Duration::from_millis(999));

    h.wait(1);
    assert_eq!(h.controller.current_index(), 1);
    assert_eq!(h.count(StoryEvent::Next), 1);
}

#[test]
fn progress_stops_at_one_and_after_abandonment() {
    let mut h = Harness::new(3, 1000);
    h.controller.start().unwrap();
    h.wait_in_steps(600, 200);
    h.controller.skip().unwrap();
    h.wait_in_steps(600, 200);

    let fills = h.sink.borrow().fills_for(0);
    assert_eq!(fills.last(), Some(&1.0));
    assert!(fills.windows(2).all(|w| w[0] < w[1]), "{fills:?}");

    let updates = h.sink.borrow().updates().to_vec();
    let finished_at = updates
        .iter()
        .position(|u| *u == SinkUpdate::Fill { index: 0, fraction: 1.0 })
        .unwrap();
    assert!(updates[finished_at + 1..]
        .iter()
        .all(|u| !matches!(u, SinkUpdate::Fill { index: 0, .. })));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn natural_advance_after_full_duration() {
    let mut h = Harness::new(10, 3000);
    h.controller.start().unwrap();
    h.wait_in_steps(2900, 100);
    assert_eq!(h.count(StoryEvent::Next), 0);

    h.wait(100);
    assert_eq!(h.count(StoryEvent::Next), 1);
    assert_eq!(h.controller.current_index(), 1);
    assert_eq!(h.controller.fraction(0), 1.0);
    assert_eq!(h.controller.fraction(1), 0.0);

    h.wait(300);
    let rising = h.controller.fraction(1);
    assert!(rising > 0.0 && rising < 1.0, "{rising}");
    assert_eq!(h.count(StoryEvent::Next), 1);
}

#[test]
fn three_skips_from_index_two_complete_five_stories() {
    let mut h = Harness::new(5, 3000);
    h.controller.start_from(2).unwrap();

    h.controller.skip().unwrap();
    h.controller.skip().unwrap();
    assert_eq!(h.controller.current_index(), 4);
    assert_eq!(h.event_kinds(), vec![StoryEvent::Next, StoryEvent::Next]);

    h.controller.skip().unwrap();
    assert_eq!(h.controller.state(), PlaybackState::Completed);
    assert_eq!(
        h.event_kinds(),
        vec![StoryEvent::Next, StoryEvent::Next, StoryEvent::Complete]
    );
}

#[test]
fn reverse_returns_to_previous_segment_with_reset_time() {
    let mut h = Harness::new(3, 3000);
    h.controller.start().unwrap();
    h.controller.reverse().unwrap();
    assert_eq!(h.controller.current_index(), 0);
    assert_eq!(h.count(StoryEvent::Prev), 0);

    h.controller.skip().unwrap();
    assert_eq!(h.controller.current_index(), 1);
    h.wait(400);

    h.controller.reverse().unwrap();
    assert_eq!(h.controller.current_index(), 0);
    assert_eq!(h.controller.elapsed(), Duration::ZERO);
    assert_eq!(h.count(StoryEvent::Prev), 1);
    assert_eq!(h.controller.fractions(), vec![0.0, 0.0, 0.0]);
    assert_eq!(h.controller.state(), PlaybackState::Running);
}

#[test]
fn destroy_while_running_silences_everything() {
    let mut h = Harness::new(3, 3000);
    h.controller.start().unwrap();
    h.wait(1000);
    h.controller.destroy();
    h.events.borrow_mut().drain();
    h.sink.borrow_mut().drain();

    h.wait(10_000);
    h.controller.tick();

    assert_eq!(h.controller.state(), PlaybackState::Destroyed);
    assert!(h.events.borrow().events().is_empty());
    assert!(h.sink.borrow().updates().is_empty());
    assert!(!h.controller.is_timer_pending());
}

#[test]
fn reversed_segment_timer_replaces_abandoned_one() {
    let mut h = Harness::new(3, 1000);
    h.controller.start().unwrap();
    h.controller.skip().unwrap();
    h.wait(500);
    h.controller.reverse().unwrap();

    // Segment 1's abandoned deadline (1000ms) passes here.
    h.wait(600);
    assert_eq!(h.controller.current_index(), 0);
    assert_eq!(h.count(StoryEvent::Next), 1);

    h.wait(400);
    assert_eq!(h.controller.current_index(), 1);
    assert_eq!(h.count(StoryEvent::Next), 2);
}

#[test]
fn natural_completion_fires_complete_once() {
    let mut h = Harness::new(2, 500);
    h.controller.start().unwrap();
    h.wait_in_steps(2000, 50);
    assert_eq!(h.controller.state(), PlaybackState::Completed);
    assert_eq!(h.event_kinds(), vec![StoryEvent::Next, StoryEvent::Complete]);
}

// ============================================================================
// Listener registration and re-entrancy
// ============================================================================

#[test]
fn last_registered_listener_wins() {
    let mut h = Harness::new(3, 1000);
    let replacement = EventLog::shared();
    h.controller.set_listener(Rc::clone(&replacement));
    h.controller.start().unwrap();
    h.controller.skip().unwrap();

    assert!(h.events.borrow().events().is_empty());
    assert_eq!(replacement.borrow().count(StoryEvent::Next), 1);
}

/// Host that pauses on every new story, like a "tap to continue" UI.
struct PauseOnNext {
    calls: Rc<RefCell<usize>>,
}

impl StoriesListener for PauseOnNext {
    fn on_next(&mut self, cx: &mut ListenerContext<'_>) {
        *self.calls.borrow_mut() += 1;
        cx.request(StoryCommand::Pause);
    }
}

#[test]
fn commands_from_callbacks_apply_after_they_return() {
    let mut h = Harness::new(3, 1000);
    let calls = Rc::new(RefCell::new(0));
    h.controller.set_listener(PauseOnNext {
        calls: Rc::clone(&calls),
    });
    h.controller.start().unwrap();

    h.wait(1000);
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(h.controller.state(), PlaybackState::Paused);
    assert_eq!(h.controller.current_index(), 1);

    h.wait(5000);
    assert_eq!(h.controller.current_index(), 1);

    h.controller.resume().unwrap();
    h.wait(1000);
    assert_eq!(*calls.borrow(), 2);
    assert_eq!(h.controller.current_index(), 2);
    assert_eq!(h.controller.state(), PlaybackState::Paused);
}

#[test]
fn clearing_listener_stops_callbacks() {
    let mut h = Harness::new(3, 1000);
    h.controller.clear_listener();
    h.controller.start().unwrap();
    h.controller.skip().unwrap();
    assert!(h.events.borrow().events().is_empty());
    assert_eq!(h.controller.current_index(), 1);
}
