//! Game resources (singleton state) and board geometry.

use bevy::prelude::*;

use super::{BOARD_HEIGHT_FRACTION, BOARD_WIDTH_FRACTION, GridCell};

/// Pixel-space placement of the board inside the window.
///
/// Coordinates follow window conventions: origin at the top-left corner and
/// `y` growing downwards. The renderer flips into world space.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GridGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub cols: u32,
    pub rows: u32,
}

impl GridGeometry {
    /// Board whose cells are `cell_size` pixels wide, anchored at the origin.
    pub fn with_cell_size(cols: u32, rows: u32, cell_size: f32) -> Self {
        GridGeometry {
            x: 0.0,
            y: 0.0,
            width: cols as f32 * cell_size,
            height: rows as f32 * cell_size,
            cols,
            rows,
        }
    }

    /// Largest centered square board that fits the given window size.
    pub fn fit(cols: u32, rows: u32, window: Vec2) -> Self {
        let side = (window.x * BOARD_WIDTH_FRACTION).min(window.y * BOARD_HEIGHT_FRACTION);
        GridGeometry {
            x: (window.x - side) / 2.0,
            y: (window.y - side) / 2.0,
            width: side,
            height: side,
            cols,
            rows,
        }
    }

    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.width / self.cols as f32,
            self.height / self.rows as f32,
        )
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, cell: GridCell) -> Vec2 {
        let size = self.cell_size();
        Vec2::new(
            self.x + cell.col as f32 * size.x,
            self.y + cell.row as f32 * size.y,
        )
    }
}

/// Resource for camera shake effect.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
        }
    }
}
