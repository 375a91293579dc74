//! Rendering plugin - draws the frame view with vector shapes, plus the food pulse and camera shake effects.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;
use std::time::Duration;

use crate::game::{
    ArcadeSet, BOARD_COLOR, CameraShake, FoodEatenEvent, GRID_LINE_COLOR, GameOverEvent,
    GridGeometry, HEAD_GLOW_COLOR, OVERLAY_COLOR, TICKS_PER_SECOND, Z_BOARD, Z_FOOD, Z_GRID,
    Z_HEAD, Z_OVERLAY, Z_PARTICLE, Z_SEGMENT,
};
use crate::session::{FrameView, GameSession};

/// Corner rounding of segments and food, relative to half their size.
const CORNER_RADIUS: f32 = 0.25;

/// Plugin for drawing and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FoodPulses>()
            .add_systems(Update, fit_board_to_window.in_set(ArcadeSet::Input))
            .add_systems(
                Update,
                (
                    draw_board,
                    draw_chain,
                    draw_food,
                    draw_particles,
                    spawn_food_pulse,
                    draw_food_pulses,
                    draw_overlay,
                    trigger_camera_shake_on_game_over,
                    camera_shake_system,
                )
                    .chain()
                    .in_set(ArcadeSet::Present),
            );
    }
}

/// A ring expanding out of an eaten food cell.
#[derive(Debug)]
struct Pulse {
    center: Vec2,
    radius: f32,
    timer: Timer,
}

impl Pulse {
    fn new(center: Vec2, radius: f32) -> Self {
        Pulse {
            center,
            radius,
            timer: Timer::from_seconds(0.3, TimerMode::Once),
        }
    }

    /// Ticks the ring; false once it has faded out.
    fn advance(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta);
        !self.timer.is_finished()
    }

    /// Grows from the cell's half size to 2.5 times that.
    fn current_radius(&self) -> f32 {
        self.radius * (1.0 + 1.5 * self.timer.fraction())
    }

    fn alpha(&self) -> f32 {
        0.8 * (1.0 - self.timer.fraction())
    }
}

#[derive(Resource, Default, Debug)]
struct FoodPulses(Vec<Pulse>);

/// Converts a window pixel (origin top-left, y down) to 2d world space
/// (origin at the window center, y up).
pub fn to_world(pixel: Vec2, window: Vec2) -> Vec2 {
    Vec2::new(pixel.x - window.x / 2.0, window.y / 2.0 - pixel.y)
}

/// World-space center of a pixel rectangle.
fn rect_center(origin: Vec2, size: Vec2, window: Vec2) -> Vec2 {
    to_world(origin + size / 2.0, window)
}

fn window_size(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    windows.single().ok().map(|window| window.size())
}

/// Keeps the board centered and sized to the window.
fn fit_board_to_window(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<GameSession>,
) {
    if resized.read().last().is_none() {
        return;
    }
    let Some(window) = window_size(&windows) else {
        return;
    };
    let current = *session.geometry();
    let geometry = GridGeometry::fit(current.cols, current.rows, window);
    if geometry != current {
        debug!("Board resized to {}x{} px", geometry.width, geometry.height);
        session.set_geometry(geometry);
    }
}

fn draw_board(
    mut painter: ShapePainter,
    session: Res<GameSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(window) = window_size(&windows) else {
        return;
    };
    let geometry = session.view().geometry;
    let size = Vec2::new(geometry.width, geometry.height);
    let center = rect_center(Vec2::new(geometry.x, geometry.y), size, window);

    painter.reset();
    painter.color = BOARD_COLOR;
    painter.transform = Transform::from_translation(center.extend(Z_BOARD));
    painter.rect(size);

    // grid lines
    painter.reset();
    painter.color = GRID_LINE_COLOR;
    painter.thickness = 1.0;
    let cell = geometry.cell_size();
    let top_left = to_world(Vec2::new(geometry.x, geometry.y), window);
    for col in 1..geometry.cols {
        let x = top_left.x + col as f32 * cell.x;
        painter.line(
            Vec3::new(x, top_left.y, Z_GRID),
            Vec3::new(x, top_left.y - size.y, Z_GRID),
        );
    }
    for row in 1..geometry.rows {
        let y = top_left.y - row as f32 * cell.y;
        painter.line(
            Vec3::new(top_left.x, y, Z_GRID),
            Vec3::new(top_left.x + size.x, y, Z_GRID),
        );
    }
}

fn draw_chain(
    mut painter: ShapePainter,
    session: Res<GameSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(window) = window_size(&windows) else {
        return;
    };
    let view = session.view();
    let cell = view.geometry.cell_size();
    let Some((head, body)) = view.segments.split_last() else {
        return;
    };

    painter.reset();
    painter.corner_radii = Vec4::splat(CORNER_RADIUS);
    for segment in body {
        let center = rect_center(view.geometry.cell_origin(segment.cell), cell, window);
        painter.color = segment.color.to_color();
        painter.transform = Transform::from_translation(center.extend(Z_SEGMENT));
        painter.rect(cell * 0.9);
    }

    let center = rect_center(view.geometry.cell_origin(head.cell), cell, window);
    painter.color = head.color.to_color();
    painter.transform = Transform::from_translation(center.extend(Z_HEAD));
    painter.rect(cell);

    // glow behind the head
    painter.reset();
    painter.color = HEAD_GLOW_COLOR;
    painter.alpha_mode = ShapeAlphaMode::Add;
    painter.transform = Transform::from_translation(center.extend(Z_HEAD - 0.1));
    painter.circle(cell.max_element() * 0.8);
}

fn draw_food(
    mut painter: ShapePainter,
    session: Res<GameSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(window) = window_size(&windows) else {
        return;
    };
    let view = session.view();
    let Some(food) = view.food else {
        return;
    };
    let cell = view.geometry.cell_size();
    let center = rect_center(view.geometry.cell_origin(food.cell), cell, window);

    painter.reset();
    painter.color = food.color.to_color();
    painter.corner_radii = Vec4::splat(CORNER_RADIUS);
    painter.transform = Transform::from_translation(center.extend(Z_FOOD));
    painter.rect(cell * 0.8);

    painter.alpha_mode = ShapeAlphaMode::Add;
    painter.color = food.color.to_color().with_alpha(0.35);
    painter.circle(cell.max_element() * 0.7);
}

/// Particles are drawn ahead of the last tick by the interpolation fraction.
fn draw_particles(
    mut painter: ShapePainter,
    session: Res<GameSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(window) = window_size(&windows) else {
        return;
    };
    let view = session.view();
    painter.reset();
    painter.alpha_mode = ShapeAlphaMode::Add;
    for particle in &view.particles {
        let size = particle.size.max(Vec2::ZERO);
        let position = particle.position
            + particle.velocity * view.interpolation / TICKS_PER_SECOND as f32;
        let center = rect_center(position, size, window);
        painter.color = particle.color.to_color();
        painter.transform = Transform::from_translation(center.extend(Z_PARTICLE));
        painter.rect(size);
    }
}

fn spawn_food_pulse(
    mut food_eaten_reader: MessageReader<FoodEatenEvent>,
    mut pulses: ResMut<FoodPulses>,
    session: Res<GameSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(window) = window_size(&windows) else {
        food_eaten_reader.clear();
        return;
    };
    let geometry = session.view().geometry;
    let cell = geometry.cell_size();
    for event in food_eaten_reader.read() {
        pulses.0.push(Pulse::new(
            rect_center(geometry.cell_origin(event.cell), cell, window),
            cell.max_element() / 2.0,
        ));
    }
}

fn draw_food_pulses(
    mut painter: ShapePainter,
    time: Res<Time>,
    mut pulses: ResMut<FoodPulses>,
) {
    pulses.0.retain_mut(|pulse| pulse.advance(time.delta()));

    painter.reset();
    painter.alpha_mode = ShapeAlphaMode::Add;
    painter.hollow = true;
    painter.thickness = 3.0;
    for pulse in &pulses.0 {
        painter.color = Color::srgba(1.0, 1.0, 0.3, pulse.alpha());
        painter.transform = Transform::from_translation(pulse.center.extend(Z_PARTICLE + 0.5));
        painter.circle(pulse.current_radius());
    }
}

/// Dims the board while paused or after game over.
fn draw_overlay(
    mut painter: ShapePainter,
    session: Res<GameSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let view: &FrameView = session.view();
    if !view.paused && !view.game_over {
        return;
    }
    let Some(window) = window_size(&windows) else {
        return;
    };
    let geometry = view.geometry;
    let size = Vec2::new(geometry.width, geometry.height);

    painter.reset();
    painter.color = OVERLAY_COLOR;
    painter.transform = Transform::from_translation(
        rect_center(Vec2::new(geometry.x, geometry.y), size, window).extend(Z_OVERLAY),
    );
    painter.rect(size);
}

/// System to trigger camera shake on game over.
fn trigger_camera_shake_on_game_over(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut camera_shake: ResMut<CameraShake>,
) {
    if let Some(event) = game_over_reader.read().last() {
        debug!("Shaking camera after game over at {} points", event.score);
        camera_shake.timer = Timer::from_seconds(0.5, TimerMode::Once);
        camera_shake.intensity = if event.new_record { 12.0 } else { 8.0 };
    }
}

/// System to apply camera shake effect.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if camera_shake.timer.is_finished() {
        return;
    }
    camera_shake.timer.tick(time.delta());

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    if camera_shake.timer.is_finished() {
        camera_transform.translation.x = 0.0;
        camera_transform.translation.y = 0.0;
    } else {
        let decay = 1.0 - camera_shake.timer.fraction();
        let mut rng = rand::rng();
        camera_transform.translation.x = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
        camera_transform.translation.y = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
    }
}
