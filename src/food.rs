use rand::Rng;
use serde::Serialize;

use crate::config::{GridSize, MAX_FOOD_PLACEMENT_ATTEMPTS};
use crate::error::BoardFullError;
use crate::snake::{Position, Snake};

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a cell the snake does not occupy.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: GridSize,
        snake: &Snake,
    ) -> Result<Self, BoardFullError> {
        spawn_position(rng, grid, snake).map(Self::new)
    }
}

/// Picks a uniformly random free cell.
///
/// Rejection sampling runs for a bounded number of draws; once that budget
/// is spent the remaining free cells are enumerated and one is chosen from
/// those, so a nearly full board still terminates.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
) -> Result<Position, BoardFullError> {
    let cols = i32::from(grid.cols());
    let rows = i32::from(grid.rows());

    for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..cols), rng.gen_range(0..rows));
        if !snake.occupies(candidate) {
            return Ok(candidate);
        }
    }

    let mut candidates = Vec::new();
    for y in 0..rows {
        for x in 0..cols {
            let position = Position::new(x, y);
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Err(BoardFullError {
            cols: grid.cols(),
            rows: grid.rows(),
            snake_len: snake.len(),
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::snake::{Position, Snake};

    use super::spawn_position;

    fn grid(cols: u16, rows: u16) -> GridSize {
        GridSize::new(cols, rows).expect("test grid is valid")
    }

    fn row_snake(len: i32) -> Snake {
        Snake::from_segments((0..len).rev().map(|x| Position::new(x, 0)).collect())
            .expect("distinct, non-empty body")
    }

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = row_snake(3);

        for _ in 0..100 {
            let food_position =
                spawn_position(&mut rng, grid(8, 6), &snake).expect("board has free cells");
            assert!(!snake.occupies(food_position));
            assert!(food_position.is_within_bounds(grid(8, 6)));
        }
    }

    #[test]
    fn nearly_full_board_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        // 4x1 board with three cells taken leaves only (3, 0).
        let snake = row_snake(3);

        for _ in 0..20 {
            let position =
                spawn_position(&mut rng, grid(4, 1), &snake).expect("one cell is free");
            assert_eq!(position, Position::new(3, 0));
        }
    }

    #[test]
    fn full_board_reports_error() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = row_snake(4);

        let error = spawn_position(&mut rng, grid(4, 1), &snake).expect_err("board is full");

        assert_eq!(error.snake_len, 4);
        assert_eq!((error.cols, error.rows), (4, 1));
    }
}
