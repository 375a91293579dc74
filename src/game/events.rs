//! Game events (messages).

use bevy::prelude::*;

use super::GridCell;

/// Message triggered when the head eats the food (for visual effects).
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct FoodEatenEvent {
    pub cell: GridCell,
}

/// Message triggered when the chain bites itself.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct GameOverEvent {
    pub score: u32,
    pub new_record: bool,
}
