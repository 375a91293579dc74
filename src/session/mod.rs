//! The game session: owns every collaborator and runs one simulation tick at a time.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::clock::Simulation;
use crate::food::FoodSpawner;
use crate::game::{
    FoodItem, GameConfig, GridCell, GridGeometry, Segment, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::input::{Control, InputDevice};
use crate::particles::Particle;
use crate::snake::{SnakeController, StepOutcome};
use crate::storage::{ScoreStore, load_max_score, open_store, save_max_score};

/// Opens the score store and builds the [`GameSession`] during `PreStartup`,
/// once logging and the window are up.
pub struct SessionPlugin {
    pub config: GameConfig,
}

/// Configuration the session is built from.
#[derive(Resource, Debug, Clone)]
pub struct SessionConfig(pub GameConfig);

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SessionConfig(self.config.clone()))
            .add_systems(PreStartup, open_session);
    }
}

fn open_session(
    mut commands: Commands,
    config: Res<SessionConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let window = windows
        .single()
        .map(|window| window.size())
        .unwrap_or(Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32));
    let store = open_store(&config.0.scores_path);
    let session = GameSession::from_config(&config.0, window, store);
    info!(
        "New {}x{} game, best score {}",
        config.0.cols,
        config.0.rows,
        session.max_score()
    );
    commands.insert_resource(session);
}

/// Notable things that happened during the ticks of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    FoodEaten { cell: GridCell, score: u32 },
    GameOver { score: u32, new_record: bool },
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub geometry: GridGeometry,
    /// Tail first, head last.
    pub segments: Vec<Segment>,
    pub food: Option<FoodItem>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub max_score: u32,
    pub paused: bool,
    pub game_over: bool,
    pub interpolation: f32,
}

#[derive(Resource)]
pub struct GameSession {
    geometry: GridGeometry,
    input: InputDevice,
    snake: SnakeController,
    food: FoodSpawner,
    store: Box<dyn ScoreStore>,
    score: u32,
    max_score: u32,
    paused: bool,
    game_over: bool,
    events: Vec<SessionEvent>,
    view: FrameView,
}

impl GameSession {
    /// Wires the collaborators together, reads the stored max score and puts
    /// the chain and the first food on the board.
    pub fn new(
        geometry: GridGeometry,
        input: InputDevice,
        snake: SnakeController,
        food: FoodSpawner,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let max_score = load_max_score(store.as_ref());
        let view = FrameView {
            geometry,
            segments: Vec::new(),
            food: None,
            particles: Vec::new(),
            score: 0,
            max_score,
            paused: false,
            game_over: false,
            interpolation: 0.0,
        };
        let mut session = GameSession {
            geometry,
            input,
            snake,
            food,
            store,
            score: 0,
            max_score,
            paused: false,
            game_over: false,
            events: Vec::new(),
            view,
        };
        session.respawn();
        session.render(0.0);
        session
    }

    /// Session built from configuration, for a board fitted to `window`.
    pub fn from_config(config: &GameConfig, window: Vec2, store: Box<dyn ScoreStore>) -> Self {
        let food = match config.seed {
            Some(seed) => FoodSpawner::with_seed(seed),
            None => FoodSpawner::new(),
        };
        Self::new(
            GridGeometry::fit(config.cols, config.rows, window),
            InputDevice::new(),
            SnakeController::new(config.initial_speed),
            food,
            store,
        )
    }

    pub fn input_mut(&mut self) -> &mut InputDevice {
        &mut self.input
    }

    pub fn snake(&self) -> &SnakeController {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut SnakeController {
        &mut self.snake
    }

    pub fn food(&self) -> &FoodSpawner {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut FoodSpawner {
        &mut self.food
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Moves the board on screen, e.g. after a window resize. The grid
    /// dimensions stay the same.
    pub fn set_geometry(&mut self, geometry: GridGeometry) {
        self.geometry = geometry;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The state captured by the last render.
    pub fn view(&self) -> &FrameView {
        &self.view
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn respawn(&mut self) {
        let GridGeometry { cols, rows, .. } = self.geometry;
        self.snake.spawn(cols, rows);
        self.food.spawn(self.snake.cells(), cols, rows);
    }

    fn restart(&mut self) {
        self.game_over = false;
        self.score = 0;
        self.respawn();
        info!("New game");
    }

    fn finish(&mut self) {
        self.game_over = true;
        let new_record = self.score > self.max_score;
        if new_record {
            self.max_score = self.score;
            save_max_score(self.store.as_mut(), self.max_score);
        }
        info!(
            "Game Over! Final score: {} (best {})",
            self.score, self.max_score
        );
        self.events.push(SessionEvent::GameOver {
            score: self.score,
            new_record,
        });
    }
}

impl Simulation for GameSession {
    fn update(&mut self, dt: f32) {
        let frame = self.input.take_frame();

        if frame.pressed(Control::Pause) {
            self.paused = !self.paused;
            debug!("Paused: {}", self.paused);
        }
        if self.game_over && frame.any_pressed() {
            self.restart();
        }
        if self.paused {
            return;
        }

        let outcome = self.snake.update(
            dt,
            &frame,
            &self.geometry,
            &mut self.food,
            &mut self.score,
        );
        match outcome {
            StepOutcome::Grew { cell } => self.events.push(SessionEvent::FoodEaten {
                cell,
                score: self.score,
            }),
            StepOutcome::Collided => self.finish(),
            _ => {}
        }
        self.food.update(dt);
    }

    fn render(&mut self, interpolation: f32) {
        self.view = FrameView {
            geometry: self.geometry,
            segments: self.snake.chain().to_vec(),
            food: self.food.item().copied(),
            particles: self.food.particles().to_vec(),
            score: self.score,
            max_score: self.max_score,
            paused: self.paused,
            game_over: self.game_over,
            interpolation,
        };
    }
}
