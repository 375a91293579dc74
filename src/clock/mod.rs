//! Clock plugin - fixed-timestep accumulator that drives the session from the frame callback.

use bevy::prelude::*;
use std::time::Duration;

use crate::game::{ArcadeSet, FoodEatenEvent, GameOverEvent, MAX_FRAME_DELTA, TICKS_PER_SECOND};
use crate::session::{GameSession, SessionEvent};

/// Something advanced in fixed steps and drawn once per display frame.
pub trait Simulation {
    /// Advance by one fixed step of `dt` seconds.
    fn update(&mut self, dt: f32);
    /// Present the current state; `interpolation` is the fraction of a step
    /// that has elapsed since the last update, in `[0, 1)`.
    fn render(&mut self, interpolation: f32);
}

/// What a single display frame did.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FrameReport {
    /// The clock is not running.
    Stopped,
    /// The frame came too late after the previous one and was dropped.
    Discarded { elapsed: Duration },
    Ran { ticks: u32, interpolation: f32 },
}

#[derive(Resource, Debug)]
pub struct SimulationClock {
    step: f64,
    max_frame_delta: Duration,
    accumulated: f64,
    last_frame: Duration,
    running: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND)
    }
}

impl SimulationClock {
    pub fn new(ticks_per_second: f64) -> Self {
        SimulationClock {
            step: 1.0 / ticks_per_second,
            max_frame_delta: MAX_FRAME_DELTA,
            accumulated: 0.0,
            last_frame: Duration::ZERO,
            running: false,
        }
    }

    /// Seconds per simulation step.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the loop at `now` and draws the initial state. No-op when
    /// already running.
    pub fn start(&mut self, now: Duration, sim: &mut impl Simulation) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_frame = now;
        sim.render(1.0);
    }

    /// Stops the loop; later frames do nothing until the next `start`.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = 0.0;
    }

    /// Runs the fixed steps owed since the previous frame, then renders.
    pub fn frame(&mut self, now: Duration, sim: &mut impl Simulation) -> FrameReport {
        if !self.running {
            return FrameReport::Stopped;
        }

        let elapsed = now.saturating_sub(self.last_frame);
        self.last_frame = now;

        // discard idle time
        if elapsed > self.max_frame_delta {
            return FrameReport::Discarded { elapsed };
        }

        self.accumulated += elapsed.as_secs_f64();

        let mut ticks = 0;
        while self.accumulated >= self.step {
            sim.update(self.step as f32);
            self.accumulated -= self.step;
            ticks += 1;
        }

        let interpolation = (self.accumulated / self.step) as f32;
        sim.render(interpolation);
        FrameReport::Ran {
            ticks,
            interpolation,
        }
    }
}

/// Plugin that owns the simulation clock and the system ordering.
pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_message::<FoodEatenEvent>()
            .add_message::<GameOverEvent>()
            .configure_sets(
                Update,
                (ArcadeSet::Input, ArcadeSet::Simulate, ArcadeSet::Present).chain(),
            )
            .add_systems(Startup, start_clock)
            .add_systems(
                Update,
                (drive_simulation, publish_session_events, quit_on_escape)
                    .chain()
                    .in_set(ArcadeSet::Simulate),
            );
    }
}

fn start_clock(
    time: Res<Time<Real>>,
    mut clock: ResMut<SimulationClock>,
    mut session: ResMut<GameSession>,
) {
    clock.start(time.elapsed(), &mut *session);
    info!("Simulation clock started at {} ticks/s", TICKS_PER_SECOND);
}

/// Runs once per display frame.
fn drive_simulation(
    time: Res<Time<Real>>,
    mut clock: ResMut<SimulationClock>,
    mut session: ResMut<GameSession>,
) {
    if let FrameReport::Discarded { elapsed } = clock.frame(time.elapsed(), &mut *session) {
        debug!("Discarded {:?} of idle time", elapsed);
    }
}

/// Re-emits what happened during the ticks as Bevy messages.
fn publish_session_events(
    mut session: ResMut<GameSession>,
    mut food_eaten_writer: MessageWriter<FoodEatenEvent>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    for event in session.drain_events() {
        match event {
            SessionEvent::FoodEaten { cell, .. } => {
                food_eaten_writer.write(FoodEatenEvent { cell });
            }
            SessionEvent::GameOver { score, new_record } => {
                game_over_writer.write(GameOverEvent { score, new_record });
            }
        }
    }
}

fn quit_on_escape(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SimulationClock>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        clock.stop();
        info!("Simulation clock stopped");
        exit.write(AppExit::Success);
    }
}
