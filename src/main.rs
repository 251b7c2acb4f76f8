use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::{LevelFilter, info, warn};
use simplelog::{Config, WriteLogger};
use wrap_snake::config::{
    Difficulty, GridPreset, Settings, SnakeColor, default_log_path, default_settings_path,
};
use wrap_snake::input::translate;
use wrap_snake::renderer;
use wrap_snake::scoreboard::{DEFAULT_PLAYER_NAME, HighScores};
use wrap_snake::session::{Session, SessionControl};
use wrap_snake::terminal_input::TerminalInput;
use wrap_snake::terminal_runtime::{TerminalGuard, restore_terminal};
use wrap_snake::ui::hud::HudInfo;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Starting speed; overrides the settings file.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Board size preset; overrides the settings file.
    #[arg(long = "grid-size", value_enum)]
    grid_size: Option<GridPreset>,

    /// Snake colour; overrides the settings file.
    #[arg(long = "snake-color", value_enum)]
    snake_color: Option<SnakeColor>,

    /// JSON settings record `{difficulty, gridSize, snakeColor}`.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Fixed seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Name recorded in the high-score table.
    #[arg(long, default_value = DEFAULT_PLAYER_NAME)]
    name: String,

    /// Log file path.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(
        cli.log_file.as_deref().unwrap_or(&default_log_path()),
        cli.log_level.into(),
    );

    let settings = resolve_settings(&cli).map_err(io::Error::other)?;
    let high_scores = HighScores::new(cli.name.as_str());
    let session = match cli.seed {
        Some(seed) => Session::with_seed(settings, seed, high_scores),
        None => Session::new(settings, high_scores),
    }
    .map_err(io::Error::other)?;

    install_panic_hook();
    run(session)
}

fn run(mut session: Session<HighScores>) -> io::Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let mut input = TerminalInput::new();

    loop {
        let snapshot = session.snapshot();
        let info = HudInfo {
            high_scores: session.sink().entries(),
            snake_color: session.settings().snake_color,
        };
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, &info))?;

        let now = Instant::now();
        let timeout = session
            .time_until_next_tick(now)
            .map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL));

        if let Some(game_input) = input.poll(timeout)?.and_then(translate) {
            let control = session
                .handle_input(game_input, Instant::now())
                .map_err(io::Error::other)?;
            if control == SessionControl::Quit {
                break;
            }
        }

        session.tick_if_due(Instant::now());
    }

    info!("quit with best score {}", session.sink().best());
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings, wrap_snake::error::ConfigError> {
    let path = cli.settings.clone().unwrap_or_else(default_settings_path);
    let mut settings = match Settings::load_from_path(&path)? {
        Some(settings) => settings,
        None => {
            if cli.settings.is_some() {
                warn!("settings file {} not found, using defaults", path.display());
            }
            Settings::default()
        }
    };

    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(grid_size) = cli.grid_size {
        settings.grid_size = grid_size;
    }
    if let Some(snake_color) = cli.snake_color {
        settings.snake_color = snake_color;
    }
    Ok(settings)
}

fn init_logging(path: &Path, level: LevelFilter) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let result = File::create(path)
        .map_err(|error| error.to_string())
        .and_then(|file| {
            WriteLogger::init(level, Config::default(), file)
                .map_err(|error| error.to_string())
        });
    if let Err(error) = result {
        eprintln!("Logging disabled ({}): {error}", path.display());
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}
