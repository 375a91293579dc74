use bevy::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use super::gesture::{GestureSignal, GestureTracker};

/// Closed set of symbols the simulation understands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Control {
    KeyUp,
    KeyRight,
    KeyDown,
    KeyLeft,
    SwipeUp,
    SwipeRight,
    SwipeDown,
    SwipeLeft,
    Pause,
    /// Space bar: forces a move while held.
    Advance,
    /// Click or tap from a pointer.
    Click,
}

/// Input state handed to one simulation tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Became active this frame.
    pub down: HashSet<Control>,
    /// Currently held.
    pub active: HashSet<Control>,
    /// Released this frame.
    pub up: HashSet<Control>,
}

impl InputFrame {
    /// Frame with the given controls freshly pressed, mostly useful in tests.
    pub fn pressing(controls: &[Control]) -> Self {
        let down: HashSet<Control> = controls.iter().copied().collect();
        InputFrame {
            active: down.clone(),
            down,
            up: HashSet::new(),
        }
    }

    pub fn pressed(&self, control: Control) -> bool {
        self.down.contains(&control)
    }

    pub fn pressed_any(&self, controls: &[Control]) -> bool {
        controls.iter().any(|control| self.down.contains(control))
    }

    pub fn held(&self, control: Control) -> bool {
        self.active.contains(&control)
    }

    /// True when anything at all was pressed this frame.
    pub fn any_pressed(&self) -> bool {
        !self.down.is_empty()
    }
}

/// Accumulates key and pointer activity between simulation ticks.
#[derive(Debug, Default)]
pub struct InputDevice {
    frame: InputFrame,
    gestures: GestureTracker,
}

impl InputDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        self.frame.active.insert(control);
        self.frame.down.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.frame.up.insert(control);
    }

    pub fn pointer_down(&mut self, id: u64, position: Vec2, now: Duration) {
        let signals = self.gestures.pointer_down(id, position, now);
        self.apply(signals);
    }

    pub fn pointer_move(&mut self, id: u64, position: Vec2, now: Duration) {
        let signals = self.gestures.pointer_move(id, position, now);
        self.apply(signals);
    }

    pub fn pointer_up(&mut self, id: u64, position: Vec2) {
        let signals = self.gestures.pointer_up(id, position);
        self.apply(signals);
    }

    pub fn pointer_cancel(&mut self, id: u64) {
        let signals = self.gestures.pointer_cancel(id);
        self.apply(signals);
    }

    /// Runs the tap timer. Call once per display frame.
    pub fn poll(&mut self, now: Duration) {
        if let Some(signal) = self.gestures.poll(now) {
            self.apply([signal]);
        }
    }

    /// Hands out the accumulated frame and starts the next one: `down` and
    /// `up` are cleared and released controls leave `active`.
    pub fn take_frame(&mut self) -> InputFrame {
        let snapshot = self.frame.clone();
        let InputFrame { down, active, up } = &mut self.frame;
        for control in up.drain() {
            active.remove(&control);
        }
        down.clear();
        snapshot
    }

    fn apply(&mut self, signals: impl IntoIterator<Item = GestureSignal>) {
        for signal in signals {
            match signal {
                GestureSignal::Press(control) => self.press(control),
                GestureSignal::Release(control) => self.release(control),
                GestureSignal::Tap => {
                    self.press(Control::Click);
                    self.release(Control::Click);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_down_and_active() {
        let mut device = InputDevice::new();
        device.press(Control::KeyUp);
        let frame = device.take_frame();
        assert!(frame.pressed(Control::KeyUp));
        assert!(frame.held(Control::KeyUp));

        let next = device.take_frame();
        assert!(!next.pressed(Control::KeyUp));
        assert!(next.held(Control::KeyUp));
    }

    #[test]
    fn test_active_cleared_only_after_release() {
        let mut device = InputDevice::new();
        device.press(Control::Advance);
        device.take_frame();
        device.release(Control::Advance);

        let frame = device.take_frame();
        assert!(frame.up.contains(&Control::Advance));
        assert!(frame.held(Control::Advance));

        let next = device.take_frame();
        assert!(!next.held(Control::Advance));
        assert!(!next.up.contains(&Control::Advance));
    }

    #[test]
    fn test_tap_is_a_one_frame_click() {
        let mut device = InputDevice::new();
        device.pointer_down(0, Vec2::new(10.0, 10.0), Duration::ZERO);
        device.pointer_up(0, Vec2::new(10.0, 10.0));

        let frame = device.take_frame();
        assert!(frame.pressed(Control::Click));
        assert!(frame.held(Control::Click));
        assert!(frame.up.contains(&Control::Click));
        assert!(!device.take_frame().held(Control::Click));
    }

    #[test]
    fn test_swipe_maps_to_controls() {
        let mut device = InputDevice::new();
        device.pointer_down(7, Vec2::ZERO, Duration::ZERO);
        device.pointer_move(7, Vec2::new(30.0, 0.0), Duration::from_millis(16));
        let frame = device.take_frame();
        assert!(frame.pressed(Control::SwipeRight));
        assert!(frame.any_pressed());

        device.pointer_up(7, Vec2::new(30.0, 0.0));
        let frame = device.take_frame();
        assert!(frame.up.contains(&Control::SwipeRight));
        assert!(!frame.pressed(Control::Click));
    }

    #[test]
    fn test_held_pointer_synthesizes_click() {
        let mut device = InputDevice::new();
        device.pointer_down(0, Vec2::ZERO, Duration::ZERO);
        device.poll(Duration::from_millis(100));
        assert!(!device.take_frame().pressed(Control::Click));
        device.poll(Duration::from_millis(500));
        assert!(device.take_frame().pressed(Control::Click));
    }

    #[test]
    fn test_pressing_helper() {
        let frame = InputFrame::pressing(&[Control::KeyLeft, Control::Pause]);
        assert!(frame.pressed_any(&[Control::KeyRight, Control::KeyLeft]));
        assert!(frame.held(Control::Pause));
        assert!(frame.up.is_empty());
    }
}
