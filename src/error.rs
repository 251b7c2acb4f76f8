use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected configuration input. Values are never clamped into range.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A zero axis, or a grid of fewer than two cells. A 1x1 board is
    /// rejected here rather than at reset: the snake would fill it and leave
    /// no cell for the first food item.
    #[error("grid must be at least 1x1 with two or more cells, got {cols}x{rows}")]
    InvalidDimensions { cols: u16, rows: u16 },

    #[error("unknown {kind} label '{label}'")]
    UnknownLabel { kind: &'static str, label: String },

    #[error("failed to read settings file {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// No free cell was left for the next food item.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell for food on a {cols}x{rows} grid (snake length {snake_len})")]
pub struct BoardFullError {
    pub cols: u16,
    pub rows: u16,
    pub snake_len: usize,
}

/// Failure surfaced by `GameState::reset`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    BoardFull(#[from] BoardFullError),
}
