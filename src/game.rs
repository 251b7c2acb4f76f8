use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{
    Difficulty, FOOD_REWARD, GridSize, MIN_TICK_INTERVAL_MS, SPEED_MILESTONE, SPEED_STEP_MS,
    Settings,
};
use crate::error::EngineError;
use crate::food::Food;
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Position, Snake};
use crate::snapshot::GameSnapshot;

/// Lifecycle phase derived from the running/over flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum GameStatus {
    /// Fresh state, never ticked.
    Idle,
    Running,
    /// Stopped after at least one tick.
    Paused,
    /// Terminal until the next reset.
    Over,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum DeathReason {
    SelfCollision,
    BoardFull,
}

/// What a single call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Not running, or already over.
    Skipped,
    Moved,
    Ate { speed_changed: bool },
    /// Transitioned to over this tick.
    GameOver(DeathReason),
}

/// Canonical state for one game session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub current_direction: Direction,
    pub queued_direction: Direction,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub is_running: bool,
    pub is_over: bool,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    grid: GridSize,
    difficulty: Difficulty,
    rng: StdRng,
}

impl GameState {
    /// Starts a fresh game with entropy-seeded food placement.
    pub fn reset(grid: GridSize, difficulty: Difficulty) -> Result<Self, EngineError> {
        Self::with_rng(grid, difficulty, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(
        grid: GridSize,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<Self, EngineError> {
        Self::with_rng(grid, difficulty, StdRng::seed_from_u64(seed))
    }

    /// Starts a fresh game from a settings record.
    pub fn from_settings(settings: Settings) -> Result<Self, EngineError> {
        Self::reset(settings.grid()?, settings.difficulty)
    }

    /// Replaces this state with a fresh game, keeping the food RNG stream.
    pub fn restart(&mut self, grid: GridSize, difficulty: Difficulty) -> Result<(), EngineError> {
        *self = Self::with_rng(grid, difficulty, self.rng.clone())?;
        Ok(())
    }

    fn with_rng(
        grid: GridSize,
        difficulty: Difficulty,
        mut rng: StdRng,
    ) -> Result<Self, EngineError> {
        let snake = Snake::new(start_position(grid));
        let food = Food::spawn(&mut rng, grid, &snake)?;

        Ok(Self {
            snake,
            food,
            current_direction: Direction::Right,
            queued_direction: Direction::Right,
            score: 0,
            tick_interval_ms: difficulty.initial_tick_interval_ms(),
            is_running: false,
            is_over: false,
            death_reason: None,
            tick_count: 0,
            grid,
            difficulty,
            rng,
        })
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.is_over {
            GameStatus::Over
        } else if self.is_running {
            GameStatus::Running
        } else if self.tick_count == 0 && self.score == 0 {
            GameStatus::Idle
        } else {
            GameStatus::Paused
        }
    }

    /// Buffers a direction for the next tick.
    ///
    /// Requests reversing `current_direction`, and any request once the game
    /// is over, are dropped. Later requests overwrite earlier ones. Returns
    /// whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.is_over || !direction_change_is_valid(self.current_direction, direction) {
            return false;
        }

        self.queued_direction = direction;
        true
    }

    /// Starts or stops the tick loop. Ignored once the game is over.
    pub fn set_running(&mut self, running: bool) {
        if self.is_over || self.is_running == running {
            return;
        }

        self.is_running = running;
        debug!(
            "game {} at score {}",
            if running { "running" } else { "paused" },
            self.score
        );
    }

    /// Advances simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running || self.is_over {
            return TickOutcome::Skipped;
        }

        self.current_direction = self.queued_direction;
        let next_head = self.snake.head().step(self.current_direction, self.grid);

        // The tail has not moved yet, so stepping onto it counts as a hit.
        if self.snake.occupies(next_head) {
            return self.finish(DeathReason::SelfCollision);
        }

        self.snake.push_head(next_head);
        self.tick_count += 1;

        if next_head != self.food.position {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.score += FOOD_REWARD;
        let speed_changed = self.apply_speed_milestone();

        match Food::spawn(&mut self.rng, self.grid, &self.snake) {
            Ok(food) => self.food = food,
            Err(board_full) => {
                error!("{board_full}");
                return self.finish(DeathReason::BoardFull);
            }
        }

        debug!(
            "food eaten at ({}, {}), score {}, length {}",
            next_head.x,
            next_head.y,
            self.score,
            self.snake.len()
        );
        TickOutcome::Ate { speed_changed }
    }

    /// Returns a read-only copy of the state for render surfaces.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    fn apply_speed_milestone(&mut self) -> bool {
        if self.score % SPEED_MILESTONE != 0 {
            return false;
        }

        let faster = self
            .tick_interval_ms
            .saturating_sub(SPEED_STEP_MS)
            .max(MIN_TICK_INTERVAL_MS)
            .min(self.tick_interval_ms);
        let changed = faster != self.tick_interval_ms;
        if changed {
            debug!("tick interval {} -> {faster} ms", self.tick_interval_ms);
        }
        self.tick_interval_ms = faster;
        changed
    }

    fn finish(&mut self, reason: DeathReason) -> TickOutcome {
        self.is_over = true;
        self.is_running = false;
        self.death_reason = Some(reason);
        info!(
            "game over ({reason:?}) with score {} and length {}",
            self.score,
            self.snake.len()
        );
        TickOutcome::GameOver(reason)
    }
}

/// Starting cell: a third of the way across, halfway down.
#[must_use]
pub fn start_position(grid: GridSize) -> Position {
    Position::new(i32::from(grid.cols() / 3), i32::from(grid.rows() / 2))
}
