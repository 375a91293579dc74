//! Shared value types for the board plus the UI marker components.

use bevy::prelude::*;

/// Cell coordinate on the board. Column grows to the right, row grows down.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub const fn new(col: i32, row: i32) -> Self {
        GridCell { col, row }
    }

    /// Neighbouring cell in `direction`, wrapped onto a `cols` x `rows` torus.
    pub fn stepped(&self, direction: Direction, cols: u32, rows: u32) -> GridCell {
        let (dc, dr) = direction.delta();
        GridCell {
            col: (self.col + dc).rem_euclid(cols as i32),
            row: (self.row + dr).rem_euclid(rows as i32),
        }
    }
}

/// Direction of travel. `None` means the chain has not started moving yet.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Column/row delta for one step (rows grow downwards).
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Hue/saturation/lightness color tag carried by segments, food and particles.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hsl {
    /// Degrees, 0..360.
    pub hue: f32,
    /// Percent.
    pub saturation: f32,
    /// Percent.
    pub lightness: f32,
}

impl Hsl {
    pub const WHITE: Hsl = Hsl::new(0.0, 0.0, 100.0);

    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    /// Same hue, pastel tone used for digested body segments.
    pub fn faded(&self) -> Hsl {
        Hsl::new(self.hue, 50.0, 90.0)
    }

    pub fn to_color(&self) -> Color {
        Color::hsl(self.hue, self.saturation / 100.0, self.lightness / 100.0)
    }
}

/// One link of the chain.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub cell: GridCell,
    pub color: Hsl,
}

impl Segment {
    pub const fn new(cell: GridCell, color: Hsl) -> Self {
        Segment { cell, color }
    }
}

/// The single food item on the board.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FoodItem {
    pub cell: GridCell,
    pub color: Hsl,
}

/// Component to mark the score value text.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the max score value text.
#[derive(Component)]
pub struct MaxScoreText;

/// Component to mark the centered PAUSED / GAME OVER banner.
#[derive(Component)]
pub struct StatusText;
