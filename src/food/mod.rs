//! Food placement and the particle burst left behind when it is eaten.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::game::{
    BURST_SIZE, BURST_SPEED, FoodItem, GridCell, GridGeometry, Hsl, PARTICLE_CAPACITY,
};
use crate::particles::{Particle, ParticleParams, Pool};

/// Owns the food item and the particles it scatters.
#[derive(Debug)]
pub struct FoodSpawner {
    item: Option<FoodItem>,
    particles: Pool<Particle>,
    rng: StdRng,
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodSpawner {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic placement, for replays and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        FoodSpawner {
            item: None,
            particles: Pool::with_capacity(PARTICLE_CAPACITY),
            rng,
        }
    }

    pub fn item(&self) -> Option<&FoodItem> {
        self.item.as_ref()
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.live()
    }

    /// Puts the food on a specific cell.
    pub fn place(&mut self, item: FoodItem) {
        self.item = Some(item);
    }

    /// Places the food on a random cell not in `excluded` and gives it a
    /// fresh hue. Leaves no food when every cell is excluded.
    pub fn spawn(
        &mut self,
        excluded: impl IntoIterator<Item = GridCell>,
        cols: u32,
        rows: u32,
    ) -> Option<FoodItem> {
        let occupied: HashSet<GridCell> = excluded.into_iter().collect();
        let attempts = cols as usize * rows as usize;

        let mut cell = None;
        for _ in 0..attempts {
            let candidate = GridCell::new(
                self.rng.random_range(0..cols as i32),
                self.rng.random_range(0..rows as i32),
            );
            if !occupied.contains(&candidate) {
                cell = Some(candidate);
                break;
            }
        }
        // Crowded board: fall back to a scan so placement always terminates.
        let cell = cell.or_else(|| {
            (0..rows as i32)
                .flat_map(|row| (0..cols as i32).map(move |col| GridCell::new(col, row)))
                .find(|candidate| !occupied.contains(candidate))
        });

        self.item = match cell {
            Some(cell) => Some(FoodItem {
                cell,
                color: Hsl::new(self.rng.random_range(0..360) as f32, 100.0, 50.0),
            }),
            None => {
                debug!("Board is full, no room for food");
                None
            }
        };
        self.item
    }

    /// Scatters particles from the food's cell.
    pub fn kill(&mut self, geometry: &GridGeometry) {
        let Some(item) = self.item else {
            return;
        };
        let cell_size = geometry.cell_size();
        let origin = geometry.cell_origin(item.cell) + cell_size / 4.0;

        for _ in 0..BURST_SIZE {
            let velocity = Vec2::new(
                self.rng.random_range(-BURST_SPEED..BURST_SPEED),
                self.rng.random_range(-BURST_SPEED..BURST_SPEED),
            );
            self.particles.create(ParticleParams {
                position: origin,
                velocity,
                size: cell_size / 2.0,
                color: item.color,
            });
        }
    }

    /// Advances the particles.
    pub fn update(&mut self, dt: f32) {
        self.particles.update(dt);
    }
}
