use serde::Serialize;

use crate::config::Difficulty;
use crate::game::{DeathReason, GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;

/// Read-only view of one game state, emitted to render surfaces after each
/// tick or accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub cols: u16,
    pub rows: u16,
    /// Head first.
    pub snake: Vec<Position>,
    pub food: Position,
    pub current_direction: Direction,
    pub queued_direction: Direction,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub is_running: bool,
    pub is_over: bool,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    pub difficulty: Difficulty,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let grid = state.grid();
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            snake: state.snake.segments().copied().collect(),
            food: state.food.position,
            current_direction: state.current_direction,
            queued_direction: state.queued_direction,
            score: state.score,
            tick_interval_ms: state.tick_interval_ms,
            is_running: state.is_running,
            is_over: state.is_over,
            status: state.status(),
            death_reason: state.death_reason,
            tick_count: state.tick_count,
            difficulty: state.difficulty(),
        }
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
