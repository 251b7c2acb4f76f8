use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wrap_snake::config::{Difficulty, GridSize, MIN_TICK_INTERVAL_MS};
use wrap_snake::game::{GameState, TickOutcome};
use wrap_snake::input::Direction;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn assert_invariants(state: &GameState, previous_interval: u64) {
    let cells: HashSet<_> = state.snake.segments().copied().collect();
    assert_eq!(cells.len(), state.snake.len(), "snake has duplicate cells");
    assert!(state.snake.segments().all(|cell| cell.is_within_bounds(state.grid())));
    assert_eq!(state.score % 10, 0);
    assert!(state.tick_interval_ms <= previous_interval);
    assert!(state.tick_interval_ms >= MIN_TICK_INTERVAL_MS);
}

#[test]
fn random_play_preserves_state_invariants() {
    let grid = GridSize::new(8, 8).expect("valid grid");

    for seed in 0..40 {
        let mut driver = StdRng::seed_from_u64(seed + 1_000);
        let mut state = GameState::new_with_seed(grid, Difficulty::Hard, seed).expect("fresh game");
        state.set_running(true);

        for _ in 0..400 {
            let direction = DIRECTIONS[driver.gen_range(0..DIRECTIONS.len())];
            state.request_direction(direction);

            let previous_interval = state.tick_interval_ms;
            let length_before = state.snake.len();
            let outcome = state.tick();
            assert_invariants(&state, previous_interval);

            match outcome {
                TickOutcome::Moved => assert_eq!(state.snake.len(), length_before),
                TickOutcome::Ate { .. } => {
                    assert_eq!(state.snake.len(), length_before + 1);
                    assert!(!state.snake.occupies(state.food.position));
                }
                TickOutcome::GameOver(_) | TickOutcome::Skipped => {}
            }

            if state.is_over {
                assert!(!state.is_running);
                break;
            }
        }
    }
}

#[test]
fn straight_line_never_collides_on_empty_row() {
    let grid = GridSize::new(12, 3).expect("valid grid");
    let mut state = GameState::new_with_seed(grid, Difficulty::Easy, 9).expect("fresh game");
    state.set_running(true);

    // A single-cell snake can circle the torus forever.
    state.food = wrap_snake::food::Food::new(wrap_snake::snake::Position::new(0, 0));
    for _ in 0..100 {
        assert_eq!(state.tick(), TickOutcome::Moved);
    }
    assert_eq!(state.snake.len(), 1);
}
