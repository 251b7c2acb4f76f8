use wrap_snake::config::{Difficulty, GridSize};
use wrap_snake::food::Food;
use wrap_snake::game::{GameState, GameStatus, TickOutcome};
use wrap_snake::input::{route, Direction, KeyPress, RawEvent, SurfacePoint, Swipe};
use wrap_snake::snake::Position;

fn feed_next_cell(state: &mut GameState) {
    let ahead = state.snake.head().step(state.queued_direction, state.grid());
    state.food = Food::new(ahead);
}

#[test]
fn five_meals_on_easy_reach_first_speed_milestone() {
    let grid = GridSize::new(15, 15).expect("valid grid");
    let mut state = GameState::new_with_seed(grid, Difficulty::Easy, 42).expect("fresh game");
    assert_eq!(state.tick_interval_ms, 200);

    state.set_running(true);
    for meal in 1..=5 {
        feed_next_cell(&mut state);
        assert!(matches!(state.tick(), TickOutcome::Ate { .. }));
        assert_eq!(state.snake.len(), meal + 1);
        assert!(!state.snake.occupies(state.food.position));
    }

    assert_eq!(state.score, 50);
    assert_eq!(state.tick_interval_ms, 190);
    assert_eq!(state.status(), GameStatus::Running);
}

#[test]
fn routed_inputs_steer_around_the_torus() {
    let grid = GridSize::new(15, 15).expect("valid grid");
    let mut state = GameState::new_with_seed(grid, Difficulty::Medium, 7).expect("fresh game");
    state.food = Food::new(Position::new(14, 14));
    state.set_running(true);

    // Start at (5, 7) heading right; a leftward swipe is a reversal.
    let left_swipe = RawEvent::Swipe(Swipe {
        start: SurfacePoint { x: 200.0, y: 50.0 },
        end: SurfacePoint { x: 100.0, y: 60.0 },
    });
    let direction = route(left_swipe).expect("long swipe routes");
    assert!(!state.request_direction(direction));

    let up = route(RawEvent::Key(KeyPress::ArrowUp)).expect("arrow routes");
    assert!(state.request_direction(up));
    for _ in 0..8 {
        assert_eq!(state.tick(), TickOutcome::Moved);
    }

    // Eight steps up from row 7 wraps past row 0 to row 14.
    assert_eq!(state.snake.head(), Position::new(5, 14));
    assert_eq!(state.current_direction, Direction::Up);
}
