//! Pointer drag/tap recognition.
//!
//! A drag is measured from a rolling anchor. Once the pointer has travelled
//! more than [`SWIPE_THRESHOLD`] pixels along either axis, the dominant axis
//! picks a swipe direction and the anchor moves to the current position.
//! While the pointer is down a deadline timer checks whether it has rested
//! since the last check; resting counts as a tap.

use bevy::prelude::*;
use std::time::Duration;

use super::Control;
use crate::game::{SWIPE_THRESHOLD, TAP_DELAY, TAP_REPEAT};

/// Output of the recognizer, applied to the input sets by the device.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GestureSignal {
    /// A swipe direction became active.
    Press(Control),
    /// A swipe direction ended.
    Release(Control),
    /// A click: pressed and released within the same frame.
    Tap,
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    pointer: Option<u64>,
    start: Vec2,
    latest: Vec2,
    anchor: Vec2,
    swipe: Option<Control>,
    deadline: Option<Duration>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, id: u64, position: Vec2, now: Duration) -> Vec<GestureSignal> {
        let mut signals = Vec::new();
        if self.pointer.is_some() {
            return signals;
        }
        // A stale swipe can survive a lost release event.
        if let Some(previous) = self.swipe.take() {
            signals.push(GestureSignal::Release(previous));
        }
        self.pointer = Some(id);
        self.start = position;
        self.latest = position;
        self.anchor = position;
        self.deadline = Some(now + TAP_DELAY);
        signals
    }

    pub fn pointer_move(&mut self, id: u64, position: Vec2, now: Duration) -> Vec<GestureSignal> {
        let mut signals = Vec::new();
        if self.pointer != Some(id) {
            return signals;
        }
        self.latest = position;

        let delta = position - self.anchor;
        let (abs_x, abs_y) = (delta.x.abs(), delta.y.abs());
        if abs_x < SWIPE_THRESHOLD && abs_y < SWIPE_THRESHOLD {
            return signals;
        }

        let swipe = if abs_x > abs_y {
            if delta.x < 0.0 {
                Control::SwipeLeft
            } else {
                Control::SwipeRight
            }
        } else if delta.y < 0.0 {
            Control::SwipeUp
        } else {
            Control::SwipeDown
        };
        if self.swipe == Some(swipe) {
            return signals;
        }

        self.anchor = position;
        if let Some(previous) = self.swipe.replace(swipe) {
            signals.push(GestureSignal::Release(previous));
        }
        signals.push(GestureSignal::Press(swipe));
        self.deadline = Some(now + TAP_DELAY);
        signals
    }

    pub fn pointer_up(&mut self, id: u64, position: Vec2) -> Vec<GestureSignal> {
        let mut signals = Vec::new();
        if self.pointer != Some(id) {
            return signals;
        }
        self.pointer = None;
        self.deadline = None;

        if position == self.start {
            signals.push(GestureSignal::Tap);
        }
        if let Some(swipe) = self.swipe.take() {
            signals.push(GestureSignal::Release(swipe));
        }
        signals
    }

    /// Pointer lost (window focus, touch cancelled). Ends the gesture
    /// without a tap.
    pub fn pointer_cancel(&mut self, id: u64) -> Vec<GestureSignal> {
        let mut signals = Vec::new();
        if self.pointer != Some(id) {
            return signals;
        }
        self.pointer = None;
        self.deadline = None;
        if let Some(swipe) = self.swipe.take() {
            signals.push(GestureSignal::Release(swipe));
        }
        signals
    }

    /// Fires the tap timer when its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<GestureSignal> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        let rested = self.latest == self.anchor;
        self.anchor = self.latest;
        self.deadline = Some(now + TAP_REPEAT);
        rested.then_some(GestureSignal::Tap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUSE: u64 = 0;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_small_moves_do_not_swipe() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::new(100.0, 100.0), ms(0));
        assert!(tracker.pointer_move(MOUSE, Vec2::new(109.0, 95.0), ms(10)).is_empty());
        assert_eq!(tracker.swipe, None);
    }

    #[test]
    fn test_dominant_axis_selects_swipe() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        assert_eq!(
            tracker.pointer_move(MOUSE, Vec2::new(-14.0, 6.0), ms(10)),
            vec![GestureSignal::Press(Control::SwipeLeft)]
        );

        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        assert_eq!(
            tracker.pointer_move(MOUSE, Vec2::new(3.0, 20.0), ms(10)),
            vec![GestureSignal::Press(Control::SwipeDown)]
        );

        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        assert_eq!(
            tracker.pointer_move(MOUSE, Vec2::new(0.0, -11.0), ms(10)),
            vec![GestureSignal::Press(Control::SwipeUp)]
        );
    }

    #[test]
    fn test_repeated_direction_is_not_emitted() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        tracker.pointer_move(MOUSE, Vec2::new(15.0, 0.0), ms(10));
        assert!(tracker.pointer_move(MOUSE, Vec2::new(40.0, 0.0), ms(20)).is_empty());
        assert_eq!(tracker.swipe, Some(Control::SwipeRight));
    }

    #[test]
    fn test_direction_change_releases_previous() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        tracker.pointer_move(MOUSE, Vec2::new(15.0, 0.0), ms(10));
        // Anchor moved to (15, 0), so this is measured from there.
        assert_eq!(
            tracker.pointer_move(MOUSE, Vec2::new(16.0, 30.0), ms(20)),
            vec![
                GestureSignal::Release(Control::SwipeRight),
                GestureSignal::Press(Control::SwipeDown),
            ]
        );
    }

    #[test]
    fn test_release_without_motion_taps() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::new(5.0, 5.0), ms(0));
        assert_eq!(
            tracker.pointer_up(MOUSE, Vec2::new(5.0, 5.0)),
            vec![GestureSignal::Tap]
        );
    }

    #[test]
    fn test_release_after_swipe_releases_it() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        tracker.pointer_move(MOUSE, Vec2::new(0.0, 25.0), ms(10));
        assert_eq!(
            tracker.pointer_up(MOUSE, Vec2::new(0.0, 25.0)),
            vec![GestureSignal::Release(Control::SwipeDown)]
        );
        assert_eq!(tracker.swipe, None);
    }

    #[test]
    fn test_hold_taps_after_delay_then_repeats() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        assert_eq!(tracker.poll(ms(499)), None);
        assert_eq!(tracker.poll(ms(500)), Some(GestureSignal::Tap));
        assert_eq!(tracker.deadline, Some(ms(584)));
        assert_eq!(tracker.poll(ms(550)), None);
        assert_eq!(tracker.poll(ms(584)), Some(GestureSignal::Tap));
    }

    #[test]
    fn test_moving_pointer_does_not_tap() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        tracker.pointer_move(MOUSE, Vec2::new(3.0, 2.0), ms(100));
        assert_eq!(tracker.poll(ms(500)), None);
        // The anchor caught up, so resting from here on taps again.
        assert_eq!(tracker.poll(ms(584)), Some(GestureSignal::Tap));
    }

    #[test]
    fn test_new_swipe_rearms_long_delay() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        tracker.pointer_move(MOUSE, Vec2::new(20.0, 0.0), ms(300));
        assert_eq!(tracker.poll(ms(500)), None);
        assert_eq!(tracker.deadline, Some(ms(800)));
    }

    #[test]
    fn test_release_cancels_timer() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        tracker.pointer_move(MOUSE, Vec2::new(30.0, 0.0), ms(10));
        tracker.pointer_up(MOUSE, Vec2::new(30.0, 0.0));
        assert_eq!(tracker.deadline, None);
        assert_eq!(tracker.poll(ms(10_000)), None);
    }

    #[test]
    fn test_secondary_pointer_is_ignored() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(1, Vec2::ZERO, ms(0));
        assert!(tracker.pointer_down(2, Vec2::new(50.0, 50.0), ms(5)).is_empty());
        assert!(tracker.pointer_move(2, Vec2::new(90.0, 50.0), ms(10)).is_empty());
        assert!(tracker.pointer_up(2, Vec2::new(50.0, 50.0)).is_empty());
        assert_eq!(tracker.pointer, Some(1));
    }

    #[test]
    fn test_cancel_never_taps() {
        let mut tracker = GestureTracker::new();
        tracker.pointer_down(MOUSE, Vec2::ZERO, ms(0));
        assert!(tracker.pointer_cancel(MOUSE).is_empty());
        assert_eq!(tracker.pointer, None);
        assert_eq!(tracker.poll(ms(600)), None);
    }
}
