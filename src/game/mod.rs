//! Core game module containing shared components, resources, events, config and constants.

mod components;
mod config;
mod constants;
mod events;
mod resources;

pub use components::*;
pub use config::*;
pub use constants::*;
pub use events::*;
pub use resources::*;

use bevy::prelude::*;

/// Ordering of the per-frame work inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcadeSet {
    /// Device events are folded into the input device.
    Input,
    /// The simulation clock runs the fixed ticks.
    Simulate,
    /// Drawing and UI read the frame view.
    Present,
}
