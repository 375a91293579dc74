//! Input plugin - folds keyboard, mouse and touch events into the session's input device.

mod device;
mod gesture;

pub use device::{Control, InputDevice, InputFrame};
pub use gesture::{GestureSignal, GestureTracker};

use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::game::ArcadeSet;
use crate::session::GameSession;

/// Pointer id used for the mouse; touches use their own ids.
pub const MOUSE_POINTER: u64 = u64::MAX;

/// Plugin for device input collection.
pub struct ArcadeInputPlugin;

impl Plugin for ArcadeInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (collect_keyboard, collect_mouse, collect_touches, poll_gestures)
                .chain()
                .in_set(ArcadeSet::Input),
        );
    }
}

/// Maps a physical key to a control symbol.
pub fn control_for_key(key: KeyCode) -> Option<Control> {
    match key {
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Control::KeyUp),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Control::KeyRight),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Control::KeyDown),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Control::KeyLeft),
        KeyCode::KeyP => Some(Control::Pause),
        KeyCode::Space => Some(Control::Advance),
        _ => None,
    }
}

/// Key presses, including OS auto-repeat, become fresh `down` events.
fn collect_keyboard(mut keys: MessageReader<KeyboardInput>, mut session: ResMut<GameSession>) {
    for event in keys.read() {
        let Some(control) = control_for_key(event.key_code) else {
            continue;
        };
        match event.state {
            ButtonState::Pressed => session.input_mut().press(control),
            ButtonState::Released => session.input_mut().release(control),
        }
    }
}

/// Left mouse button acts as a pointer.
fn collect_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time<Real>>,
    mut last_cursor: Local<Option<Vec2>>,
    mut session: ResMut<GameSession>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position().or(*last_cursor);
    *last_cursor = cursor;
    let Some(position) = cursor else {
        return;
    };
    let now = time.elapsed();
    let input = session.input_mut();

    if buttons.just_pressed(MouseButton::Left) {
        input.pointer_down(MOUSE_POINTER, position, now);
    } else if buttons.pressed(MouseButton::Left) {
        input.pointer_move(MOUSE_POINTER, position, now);
    }
    if buttons.just_released(MouseButton::Left) {
        input.pointer_up(MOUSE_POINTER, position);
    }
}

/// Touches act as pointers; only the first finger down is tracked.
fn collect_touches(touches: Res<Touches>, time: Res<Time<Real>>, mut session: ResMut<GameSession>) {
    let now = time.elapsed();
    let input = session.input_mut();

    for touch in touches.iter_just_pressed() {
        input.pointer_down(touch.id(), touch.position(), now);
    }
    for touch in touches.iter() {
        input.pointer_move(touch.id(), touch.position(), now);
    }
    for touch in touches.iter_just_released() {
        input.pointer_up(touch.id(), touch.position());
    }
    for touch in touches.iter_just_canceled() {
        input.pointer_cancel(touch.id());
    }
}

fn poll_gestures(time: Res<Time<Real>>, mut session: ResMut<GameSession>) {
    session.input_mut().poll(time.elapsed());
}
