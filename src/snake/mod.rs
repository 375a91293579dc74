//! Snake controller - chain of segments, direction state machine, move timing,
//! collision and growth.

use bevy::prelude::*;

use crate::food::FoodSpawner;
use crate::game::{
    Direction, GridCell, GridGeometry, HEAD_COLOR, INITIAL_SPEED, SPEEDUP_EVERY, SPEEDUP_FACTOR,
    Segment,
};
use crate::input::{Control, InputFrame};

const UP: [Control; 2] = [Control::KeyUp, Control::SwipeUp];
const RIGHT: [Control; 2] = [Control::KeyRight, Control::SwipeRight];
const DOWN: [Control; 2] = [Control::KeyDown, Control::SwipeDown];
const LEFT: [Control; 2] = [Control::KeyLeft, Control::SwipeLeft];

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    /// Spawned, waiting for a first direction.
    Idle,
    Moving,
    /// Bit itself; frozen until respawned.
    Dead,
}

/// What one call to [`SnakeController::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No direction chosen yet.
    Idle,
    /// Waiting for the move timer.
    Waiting,
    Moved,
    /// Ate the food on `cell` and grew by one.
    Grew { cell: GridCell },
    /// The next head cell was part of the chain.
    Collided,
    /// Already dead.
    Halted,
}

/// The player's chain. Index 0 is the tail, the last segment is the head.
#[derive(Debug, Clone)]
pub struct SnakeController {
    chain: Vec<Segment>,
    dir: Direction,
    last_dir: Direction,
    initial_speed: f32,
    speed: f32,
    timer: f32,
    delay: f32,
    dead: bool,
}

impl Default for SnakeController {
    fn default() -> Self {
        Self::new(INITIAL_SPEED)
    }
}

impl SnakeController {
    /// A controller with `initial_speed` seconds per cell. Call
    /// [`spawn`](Self::spawn) to place it on a board.
    pub fn new(initial_speed: f32) -> Self {
        SnakeController {
            chain: vec![Segment::new(GridCell::default(), HEAD_COLOR)],
            dir: Direction::None,
            last_dir: Direction::None,
            initial_speed,
            speed: initial_speed,
            timer: 0.0,
            delay: 0.0,
            dead: false,
        }
    }

    /// A controller already travelling `dir` with the given chain.
    ///
    /// # Panics
    ///
    /// Panics if `chain` is empty; the last segment is the head.
    pub fn from_chain(chain: Vec<Segment>, dir: Direction, initial_speed: f32) -> Self {
        assert!(!chain.is_empty(), "a chain needs at least a head");
        SnakeController {
            chain,
            dir,
            last_dir: dir,
            ..Self::new(initial_speed)
        }
    }

    /// Single white segment in the middle of the board, not moving.
    pub fn spawn(&mut self, cols: u32, rows: u32) {
        let center = GridCell::new((cols / 2) as i32, (rows / 2) as i32);
        self.chain = vec![Segment::new(center, HEAD_COLOR)];
        self.dir = Direction::None;
        self.last_dir = Direction::None;
        self.speed = self.initial_speed;
        self.timer = 0.0;
        self.delay = 0.0;
        self.dead = false;
    }

    pub fn state(&self) -> SnakeState {
        if self.dead {
            SnakeState::Dead
        } else if self.dir == Direction::None {
            SnakeState::Idle
        } else {
            SnakeState::Moving
        }
    }

    /// Segments from tail to head.
    pub fn chain(&self) -> &[Segment] {
        &self.chain
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.chain.iter().map(|segment| segment.cell)
    }

    pub fn head(&self) -> GridCell {
        self.chain[self.chain.len() - 1].cell
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn last_dir(&self) -> Direction {
        self.last_dir
    }

    /// Seconds per cell.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advances by one simulation step of `dt` seconds.
    ///
    /// Eating bumps `score`, bursts the food and spawns the next one.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputFrame,
        geometry: &GridGeometry,
        food: &mut FoodSpawner,
        score: &mut u32,
    ) -> StepOutcome {
        if self.dead {
            return StepOutcome::Halted;
        }

        // input
        let mut dir = self.dir;
        let mut force = input.held(Control::Advance) || input.held(Control::Click);
        for (controls, candidate) in [
            (UP, Direction::Up),
            (RIGHT, Direction::Right),
            (DOWN, Direction::Down),
            (LEFT, Direction::Left),
        ] {
            if input.pressed_any(&controls) && self.last_dir != candidate.opposite() {
                dir = candidate;
                force = true;
            }
        }
        self.dir = dir;
        if dir == Direction::None {
            return StepOutcome::Idle;
        }

        // speed limit
        self.timer += dt;
        if self.timer < self.delay && !force {
            return StepOutcome::Waiting;
        }
        self.delay = if force {
            self.timer + self.speed
        } else {
            self.delay + self.speed
        };

        // next step
        let next = self.head().stepped(dir, geometry.cols, geometry.rows);

        // collision
        if self.cells().any(|cell| cell == next) {
            self.dead = true;
            return StepOutcome::Collided;
        }

        // growth
        if let Some(item) = food.item().copied()
            && item.cell == next
        {
            let head = self.chain.len() - 1;
            self.chain[head].color = item.color.faded();
            self.chain.push(Segment::new(next, HEAD_COLOR));
            self.last_dir = dir;

            food.kill(geometry);
            food.spawn(self.cells(), geometry.cols, geometry.rows);

            *score += 1;
            if *score % SPEEDUP_EVERY == 0 {
                self.speed *= SPEEDUP_FACTOR;
                debug!("Speed up to {:.3}s per cell", self.speed);
            }
            return StepOutcome::Grew { cell: next };
        }

        // each segment takes the place of the one ahead of it
        let head = self.chain.len() - 1;
        for i in 0..head {
            self.chain[i].cell = self.chain[i + 1].cell;
        }
        self.chain[head].cell = next;
        self.last_dir = dir;
        StepOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FoodItem, Hsl};

    fn grid(cols: u32, rows: u32) -> GridGeometry {
        GridGeometry::with_cell_size(cols, rows, 10.0)
    }

    fn chain(cells: &[(i32, i32)]) -> Vec<Segment> {
        cells
            .iter()
            .map(|&(col, row)| Segment::new(GridCell::new(col, row), HEAD_COLOR))
            .collect()
    }

    fn food_at(col: i32, row: i32, hue: f32) -> FoodSpawner {
        let mut food = FoodSpawner::with_seed(9);
        food.place(FoodItem {
            cell: GridCell::new(col, row),
            color: Hsl::new(hue, 100.0, 50.0),
        });
        food
    }

    fn cells(snake: &SnakeController) -> Vec<(i32, i32)> {
        snake.cells().map(|c| (c.col, c.row)).collect()
    }

    #[test]
    #[should_panic(expected = "a chain needs at least a head")]
    fn test_empty_chain_is_rejected() {
        SnakeController::from_chain(Vec::new(), Direction::Right, 0.5);
    }

    #[test]
    fn test_spawn_centers_idle_head() {
        let mut snake = SnakeController::default();
        snake.spawn(20, 15);
        assert_eq!(snake.head(), GridCell::new(10, 7));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.state(), SnakeState::Idle);
    }

    #[test]
    fn test_idle_without_direction() {
        let mut snake = SnakeController::default();
        snake.spawn(5, 5);
        let mut food = food_at(0, 0, 0.0);
        let mut score = 0;
        let outcome = snake.update(1.0, &InputFrame::default(), &grid(5, 5), &mut food, &mut score);
        assert_eq!(outcome, StepOutcome::Idle);
        assert_eq!(snake.head(), GridCell::new(2, 2));
    }

    #[test]
    fn test_first_press_moves_immediately() {
        let mut snake = SnakeController::default();
        snake.spawn(5, 5);
        let mut food = food_at(0, 0, 0.0);
        let mut score = 0;
        let outcome = snake.update(
            1.0 / 60.0,
            &InputFrame::pressing(&[Control::SwipeUp]),
            &grid(5, 5),
            &mut food,
            &mut score,
        );
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(snake.head(), GridCell::new(2, 1));
        assert_eq!(snake.state(), SnakeState::Moving);
        assert_eq!(snake.last_dir(), Direction::Up);
    }

    #[test]
    fn test_moves_are_paced_by_speed() {
        let mut snake = SnakeController::from_chain(chain(&[(0, 0)]), Direction::Right, 0.5);
        let mut food = food_at(4, 4, 0.0);
        let mut score = 0;
        let idle = InputFrame::default();
        let geometry = grid(10, 10);

        // delay starts at zero, so the first tick moves
        assert_eq!(
            snake.update(0.125, &idle, &geometry, &mut food, &mut score),
            StepOutcome::Moved
        );
        let mut moves = 1;
        for _ in 0..14 {
            if snake.update(0.125, &idle, &geometry, &mut food, &mut score) == StepOutcome::Moved {
                moves += 1;
            }
        }
        // moves at 0.125s, 0.5s, 1.0s and 1.5s; 1.875s elapsed
        assert_eq!(moves, 4);
        assert_eq!(snake.head(), GridCell::new(4, 0));
    }

    #[test]
    fn test_advance_held_forces_moves() {
        let mut snake = SnakeController::from_chain(chain(&[(0, 0)]), Direction::Right, 0.5);
        let mut food = food_at(4, 4, 0.0);
        let mut score = 0;
        let geometry = grid(10, 10);
        let mut held = InputFrame::default();
        held.active.insert(Control::Advance);

        for _ in 0..3 {
            assert_eq!(
                snake.update(0.01, &held, &geometry, &mut food, &mut score),
                StepOutcome::Moved
            );
        }
        assert_eq!(snake.head(), GridCell::new(3, 0));
        // without the button the timer gate applies again
        assert_eq!(
            snake.update(0.01, &InputFrame::default(), &geometry, &mut food, &mut score),
            StepOutcome::Waiting
        );
    }

    #[test]
    fn test_chain_follows_head() {
        let mut snake =
            SnakeController::from_chain(chain(&[(1, 1), (1, 2), (1, 3)]), Direction::Down, 0.5);
        let mut food = food_at(4, 0, 0.0);
        let mut score = 0;
        let outcome = snake.update(0.1, &InputFrame::default(), &grid(5, 5), &mut food, &mut score);
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(cells(&snake), vec![(1, 2), (1, 3), (1, 4)]);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_eating_grows_and_recolors() {
        let mut snake = SnakeController::from_chain(chain(&[(2, 2)]), Direction::Right, 0.5);
        let mut food = food_at(3, 2, 120.0);
        let mut score = 0;
        let outcome = snake.update(0.1, &InputFrame::default(), &grid(5, 5), &mut food, &mut score);

        assert_eq!(
            outcome,
            StepOutcome::Grew {
                cell: GridCell::new(3, 2)
            }
        );
        assert_eq!(cells(&snake), vec![(2, 2), (3, 2)]);
        assert_eq!(snake.chain()[0].color, Hsl::new(120.0, 50.0, 90.0));
        assert_eq!(snake.chain()[1].color, HEAD_COLOR);
        assert_eq!(score, 1);

        let next = food.item().expect("food respawned");
        assert!(!snake.cells().any(|cell| cell == next.cell));
        assert_eq!(food.particles().len(), 20);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut snake = SnakeController::from_chain(chain(&[(1, 2), (2, 2)]), Direction::Right, 0.5);
        let mut food = food_at(0, 0, 0.0);
        let mut score = 0;
        let outcome = snake.update(
            0.1,
            &InputFrame::pressing(&[Control::KeyLeft]),
            &grid(6, 6),
            &mut food,
            &mut score,
        );
        assert_eq!(snake.dir(), Direction::Right);
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(snake.head(), GridCell::new(3, 2));
    }

    #[test]
    fn test_reversal_after_eating_is_rejected() {
        let mut snake = SnakeController::default();
        snake.spawn(6, 6);
        let mut food = food_at(4, 3, 10.0);
        let mut score = 0;
        let geometry = grid(6, 6);
        snake.update(
            0.1,
            &InputFrame::pressing(&[Control::KeyRight]),
            &geometry,
            &mut food,
            &mut score,
        );
        assert_eq!(snake.len(), 2);

        let outcome = snake.update(
            0.1,
            &InputFrame::pressing(&[Control::KeyLeft]),
            &geometry,
            &mut food,
            &mut score,
        );
        assert_ne!(outcome, StepOutcome::Collided);
        assert_eq!(snake.dir(), Direction::Right);
    }

    #[test]
    fn test_perpendicular_turn_is_accepted() {
        let mut snake = SnakeController::from_chain(chain(&[(1, 2), (2, 2)]), Direction::Right, 0.5);
        let mut food = food_at(0, 0, 0.0);
        let mut score = 0;
        snake.update(
            0.1,
            &InputFrame::pressing(&[Control::SwipeDown]),
            &grid(6, 6),
            &mut food,
            &mut score,
        );
        assert_eq!(snake.dir(), Direction::Down);
        assert_eq!(snake.head(), GridCell::new(2, 3));
    }

    #[test]
    fn test_self_collision_freezes_chain() {
        // head at (1,2) heading up into the tail at (1,1)
        let body = chain(&[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let mut snake = SnakeController::from_chain(body.clone(), Direction::Up, 0.5);
        let mut food = food_at(4, 4, 0.0);
        let mut score = 3;
        let geometry = grid(5, 5);

        let outcome = snake.update(0.1, &InputFrame::default(), &geometry, &mut food, &mut score);
        assert_eq!(outcome, StepOutcome::Collided);
        assert_eq!(snake.chain(), body.as_slice());
        assert_eq!(snake.state(), SnakeState::Dead);

        let outcome = snake.update(
            0.1,
            &InputFrame::pressing(&[Control::KeyRight]),
            &geometry,
            &mut food,
            &mut score,
        );
        assert_eq!(outcome, StepOutcome::Halted);
        assert_eq!(snake.chain(), body.as_slice());
        assert_eq!(score, 3);
    }

    #[test]
    fn test_wraps_across_edges() {
        let mut snake = SnakeController::from_chain(chain(&[(0, 0)]), Direction::Left, 0.5);
        let mut food = food_at(2, 2, 0.0);
        let mut score = 0;
        snake.update(0.1, &InputFrame::default(), &grid(4, 3), &mut food, &mut score);
        assert_eq!(snake.head(), GridCell::new(3, 0));

        snake.update(
            0.1,
            &InputFrame::pressing(&[Control::KeyUp]),
            &grid(4, 3),
            &mut food,
            &mut score,
        );
        assert_eq!(snake.head(), GridCell::new(3, 2));
    }

    #[test]
    fn test_every_tenth_point_speeds_up() {
        let mut snake = SnakeController::from_chain(chain(&[(0, 0)]), Direction::Right, 0.5);
        let mut food = FoodSpawner::with_seed(11);
        let mut score = 0;
        let geometry = grid(30, 30);
        let idle = InputFrame::default();

        let mut speeds = Vec::new();
        for _ in 0..20 {
            let ahead = snake.head().stepped(Direction::Right, 30, 30);
            food.place(FoodItem {
                cell: ahead,
                color: Hsl::WHITE,
            });
            let outcome = snake.update(1.0, &idle, &geometry, &mut food, &mut score);
            assert!(matches!(outcome, StepOutcome::Grew { .. }));
            speeds.push(snake.speed());
        }

        assert_eq!(score, 20);
        assert_eq!(speeds[8], 0.5);
        assert!((speeds[9] - 0.45).abs() < 1e-6);
        assert_eq!(speeds[18], speeds[9]);
        assert!((speeds[19] - 0.405).abs() < 1e-6);
        assert!(speeds.iter().all(|speed| *speed > 0.0));
    }

    #[test]
    fn test_respawn_resets_state() {
        let body = chain(&[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let mut snake = SnakeController::from_chain(body, Direction::Up, 0.5);
        let mut food = food_at(4, 4, 0.0);
        let mut score = 0;
        snake.update(0.1, &InputFrame::default(), &grid(5, 5), &mut food, &mut score);
        assert_eq!(snake.state(), SnakeState::Dead);

        snake.spawn(5, 5);
        assert_eq!(snake.state(), SnakeState::Idle);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.last_dir(), Direction::None);
        assert_eq!(snake.speed(), 0.5);
    }
}
