//! Single-owner game session.
//!
//! A [`Session`] is the only writer of its [`GameState`]. Ticks, direction
//! requests and lifecycle actions all go through `&mut self`, so a driver
//! loop that owns the session serializes every mutation by construction.

use std::time::{Duration, Instant};

use log::info;

use crate::config::Settings;
use crate::error::EngineError;
use crate::game::{GameState, TickOutcome};
use crate::input::{Direction, GameInput, LifecycleAction};
use crate::snapshot::GameSnapshot;

/// Receives the final score once per finished game.
pub trait ScoreSink {
    fn report_final_score(&mut self, score: u32);
}

impl<F: FnMut(u32)> ScoreSink for F {
    fn report_final_score(&mut self, score: u32) {
        self(score);
    }
}

/// Stoppable one-shot tick deadline.
///
/// The deadline is re-armed from the state's current interval after every
/// tick, so speed changes apply to the next tick rather than the one already
/// pending.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickSchedule {
    next_due: Option<Instant>,
    interval: Duration,
}

impl TickSchedule {
    #[must_use]
    pub fn stopped() -> Self {
        Self::default()
    }

    /// Arms the schedule so the first tick fires one interval from `now`.
    pub fn start(&mut self, now: Instant, interval_ms: u64) {
        self.interval = Duration::from_millis(interval_ms);
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the pending tick; `None` when stopped.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Whether the driver loop should keep going.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// One player's game: state, settings, tick schedule and score sink.
#[derive(Debug)]
pub struct Session<S: ScoreSink> {
    state: GameState,
    settings: Settings,
    schedule: TickSchedule,
    sink: S,
    score_reported: bool,
}

impl<S: ScoreSink> Session<S> {
    /// Starts an idle session with entropy-seeded food placement.
    pub fn new(settings: Settings, sink: S) -> Result<Self, EngineError> {
        Ok(Self::from_state(
            GameState::from_settings(settings)?,
            settings,
            sink,
        ))
    }

    /// Starts an idle session with a fixed food-placement seed.
    pub fn with_seed(settings: Settings, seed: u64, sink: S) -> Result<Self, EngineError> {
        let state = GameState::new_with_seed(settings.grid()?, settings.difficulty, seed)?;
        Ok(Self::from_state(state, settings, sink))
    }

    fn from_state(state: GameState, settings: Settings, sink: S) -> Self {
        info!(
            "session started: {} difficulty, {}x{} grid",
            settings.difficulty,
            state.grid().cols(),
            state.grid().rows()
        );
        Self {
            state,
            settings,
            schedule: TickSchedule::stopped(),
            sink,
            score_reported: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted setups such as replays and tests.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Applies one routed input.
    pub fn handle_input(
        &mut self,
        input: GameInput,
        now: Instant,
    ) -> Result<SessionControl, EngineError> {
        match input {
            GameInput::Direction(direction) => {
                self.request_direction(direction);
            }
            GameInput::Lifecycle(LifecycleAction::ToggleRunning) => self.toggle_running(now)?,
            GameInput::Lifecycle(LifecycleAction::Restart) => self.restart()?,
            GameInput::Lifecycle(LifecycleAction::Quit) => return Ok(SessionControl::Quit),
            GameInput::Lifecycle(LifecycleAction::CycleDifficulty) => {
                let difficulty = self.settings.difficulty.next();
                self.apply_settings(Settings {
                    difficulty,
                    ..self.settings
                })?;
            }
            GameInput::Lifecycle(LifecycleAction::CycleGridSize) => {
                let grid_size = self.settings.grid_size.next();
                self.apply_settings(Settings {
                    grid_size,
                    ..self.settings
                })?;
            }
            GameInput::Lifecycle(LifecycleAction::CycleSnakeColor) => {
                let snake_color = self.settings.snake_color.next();
                self.apply_settings(Settings {
                    snake_color,
                    ..self.settings
                })?;
            }
        }
        Ok(SessionControl::Continue)
    }

    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.state.request_direction(direction)
    }

    /// Starts or stops ticking. Stopping cancels the pending tick at once.
    pub fn set_running(&mut self, running: bool, now: Instant) {
        self.state.set_running(running);
        self.sync_schedule(now);
    }

    /// Pause/resume; on a finished game, starts a fresh one and runs it.
    pub fn toggle_running(&mut self, now: Instant) -> Result<(), EngineError> {
        if self.state.is_over {
            self.restart()?;
            self.set_running(true, now);
            return Ok(());
        }

        let running = !self.state.is_running;
        self.set_running(running, now);
        Ok(())
    }

    /// Discards the current game and returns to idle with the same settings.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let grid = self.settings.grid()?;
        self.state.restart(grid, self.settings.difficulty)?;
        self.schedule.stop();
        self.score_reported = false;
        info!("game restarted");
        Ok(())
    }

    /// Installs new settings. Grid or difficulty changes start a new game.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), EngineError> {
        let needs_reset = settings.grid_size != self.settings.grid_size
            || settings.difficulty != self.settings.difficulty;
        self.settings = settings;

        if needs_reset {
            info!(
                "settings changed to {} / {:?}, resetting",
                settings.difficulty, settings.grid_size
            );
            self.restart()?;
        }
        Ok(())
    }

    /// Runs the pending tick if its deadline has passed.
    pub fn tick_if_due(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.schedule.is_due(now) {
            return None;
        }
        Some(self.tick(now))
    }

    /// Advances one tick immediately and re-arms the schedule.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.state.tick();

        if matches!(outcome, TickOutcome::GameOver(_)) && !self.score_reported {
            self.score_reported = true;
            info!("reporting final score {}", self.state.score);
            self.sink.report_final_score(self.state.score);
        }

        self.sync_schedule(now);
        outcome
    }

    /// Time until the next tick fires; `None` while not running.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.schedule.remaining(now)
    }

    fn sync_schedule(&mut self, now: Instant) {
        if self.state.is_running && !self.state.is_over {
            // Re-reads the interval so milestone speed-ups apply to the next tick.
            self.schedule.start(now, self.state.tick_interval_ms);
        } else {
            self.schedule.stop();
        }
    }
}
