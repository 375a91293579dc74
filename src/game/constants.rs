//! Game constants for board size, timing, effects and colors.

use bevy::prelude::*;
use std::time::Duration;

use super::Hsl;

// Board dimensions
pub const DEFAULT_COLS: u32 = 20;
pub const DEFAULT_ROWS: u32 = 20;

// Window
pub const WINDOW_WIDTH: u32 = 600;
pub const WINDOW_HEIGHT: u32 = 800;

// Fraction of the window the board may take
pub const BOARD_WIDTH_FRACTION: f32 = 0.9;
pub const BOARD_HEIGHT_FRACTION: f32 = 0.65;

// Simulation timing
pub const TICKS_PER_SECOND: f64 = 60.0;
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(1000);

// Movement
pub const INITIAL_SPEED: f32 = 0.5;
pub const SPEEDUP_FACTOR: f32 = 0.9;
pub const SPEEDUP_EVERY: u32 = 10;

// Gestures
pub const SWIPE_THRESHOLD: f32 = 10.0;
pub const TAP_DELAY: Duration = Duration::from_millis(500);
pub const TAP_REPEAT: Duration = Duration::from_millis(84);

// Particles
pub const PARTICLE_CAPACITY: usize = 1024;
pub const BURST_SIZE: usize = 20;
pub const BURST_SPEED: f32 = 180.0;
pub const PARTICLE_SHRINK: f32 = 18.0;
pub const PARTICLE_GRAVITY: f32 = 540.0;

// Persistence
pub const MAX_SCORE_KEY: &str = "maxScore";
pub const DEFAULT_SCORES_PATH: &str = "snake_scores.json";

// Colors
pub const HEAD_COLOR: Hsl = Hsl::WHITE;
pub const BACKGROUND_COLOR: Color = Color::srgb(0.133, 0.153, 0.220);
pub const BOARD_COLOR: Color = Color::srgb(0.094, 0.094, 0.145);
pub const GRID_LINE_COLOR: Color = Color::srgb(0.137, 0.137, 0.196);
pub const LABEL_COLOR: Color = Color::srgb(0.431, 0.471, 0.533);
pub const BANNER_COLOR: Color = Color::srgb(0.298, 1.0, 0.843);
pub const OVERLAY_COLOR: Color = Color::srgba(0.094, 0.094, 0.145, 0.9);
pub const HEAD_GLOW_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.3);

// Z-index constants for rendering layers
pub const Z_BOARD: f32 = 0.0;
pub const Z_GRID: f32 = 0.1;
pub const Z_SEGMENT: f32 = 1.0;
pub const Z_HEAD: f32 = 1.5;
pub const Z_FOOD: f32 = 2.0;
pub const Z_PARTICLE: f32 = 3.0;
pub const Z_OVERLAY: f32 = 4.0;
