//! Pooled visual effects.

mod pool;

pub use pool::{Pool, Poolable};

use bevy::prelude::*;

use crate::game::{Hsl, PARTICLE_GRAVITY, PARTICLE_SHRINK};

/// Spawn parameters for a [`Particle`], in window pixels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParticleParams {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub color: Hsl,
}

/// A shrinking square that flies off and falls down the screen.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
    /// Top-left corner, window pixels (y down).
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub color: Hsl,
    alive: bool,
}

impl Poolable for Particle {
    type Params = ParticleParams;

    fn create(params: ParticleParams) -> Self {
        Particle {
            position: params.position,
            velocity: params.velocity,
            size: params.size,
            color: params.color,
            alive: true,
        }
    }

    fn reset(&mut self, params: ParticleParams) {
        *self = Self::create(params);
    }

    fn update(&mut self, dt: f32) {
        self.size -= Vec2::splat(PARTICLE_SHRINK * dt);
        self.position += self.velocity * dt;
        self.velocity.y += PARTICLE_GRAVITY * dt;
        if self.size.x <= 0.0 && self.size.y <= 0.0 {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
