use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "wrap-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Points awarded for each food eaten.
pub const FOOD_REWARD: u32 = 10;

/// The tick interval shortens whenever the score lands on a multiple of this.
pub const SPEED_MILESTONE: u32 = 50;

/// Tick interval reduction per milestone, in milliseconds.
pub const SPEED_STEP_MS: u64 = 10;

/// Fastest allowed tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Random draws tried before food placement falls back to a full scan.
pub const MAX_FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Logical grid dimensions for one session.
///
/// Only constructible through [`GridSize::new`], so every value in
/// circulation has non-zero axes and room for a snake plus one food.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct GridSize {
    cols: u16,
    rows: u16,
}

impl GridSize {
    /// Validates and builds grid dimensions.
    pub fn new(cols: u16, rows: u16) -> Result<Self, ConfigError> {
        let grid = Self { cols, rows };
        if cols == 0 || rows == 0 || grid.total_cells() < 2 {
            return Err(ConfigError::InvalidDimensions { cols, rows });
        }
        Ok(grid)
    }

    #[must_use]
    pub fn cols(self) -> u16 {
        self.cols
    }

    #[must_use]
    pub fn rows(self) -> u16 {
        self.rows
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }
}

/// Difficulty label; selects the starting tick interval.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn initial_tick_interval_ms(self) -> u64 {
        match self {
            Self::Easy => 200,
            Self::Medium => 150,
            Self::Hard => 100,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Next label in menu order, wrapping after the last.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(unknown_label("difficulty", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named grid-size preset.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GridPreset {
    Small,
    #[default]
    Medium,
    Large,
}

impl GridPreset {
    #[must_use]
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            Self::Small => (15, 15),
            Self::Medium => (20, 20),
            Self::Large => (25, 25),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Small,
        }
    }

    /// Returns the validated grid for this preset.
    pub fn grid(self) -> Result<GridSize, ConfigError> {
        let (cols, rows) = self.dimensions();
        GridSize::new(cols, rows)
    }
}

impl FromStr for GridPreset {
    type Err = ConfigError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(unknown_label("grid size", other)),
        }
    }
}

/// Snake colour hint. Rendering only; the engine never reads it.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SnakeColor {
    #[default]
    Primary,
    Secondary,
    Accent,
    Purple,
}

impl SnakeColor {
    #[must_use]
    pub fn terminal_color(self) -> Color {
        match self {
            Self::Primary => Color::Blue,
            Self::Secondary => Color::Cyan,
            Self::Accent => Color::Yellow,
            Self::Purple => Color::Magenta,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Accent,
            Self::Accent => Self::Purple,
            Self::Purple => Self::Primary,
        }
    }
}

impl FromStr for SnakeColor {
    type Err = ConfigError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "accent" => Ok(Self::Accent),
            "purple" => Ok(Self::Purple),
            other => Err(unknown_label("snake color", other)),
        }
    }
}

fn unknown_label(kind: &'static str, label: &str) -> ConfigError {
    ConfigError::UnknownLabel {
        kind,
        label: label.to_owned(),
    }
}

/// Player settings record consumed at reset.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub grid_size: GridPreset,
    pub snake_color: SnakeColor,
}

impl Settings {
    /// Parses a JSON settings record. Missing keys fall back to defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads settings from `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::SettingsRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::from_json(&raw)
            .map(Some)
            .map_err(|source| ConfigError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn grid(self) -> Result<GridSize, ConfigError> {
        self.grid_size.grid()
    }
}

/// Returns the platform-correct default settings path.
#[must_use]
pub fn default_settings_path() -> PathBuf {
    app_dir(dirs::config_dir()).join(SETTINGS_FILE_NAME)
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    app_dir(dirs::data_local_dir()).join("wrap-snake.log")
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    let mut base = base.unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{Difficulty, GridPreset, GridSize, Settings, SnakeColor};
    use crate::error::ConfigError;

    #[test]
    fn grid_rejects_zero_dimensions() {
        assert!(matches!(
            GridSize::new(0, 10),
            Err(ConfigError::InvalidDimensions { cols: 0, rows: 10 })
        ));
        assert!(GridSize::new(10, 0).is_err());
        assert!(GridSize::new(1, 1).is_err());
        assert!(GridSize::new(2, 1).is_ok());
    }

    #[test]
    fn presets_match_labels() {
        assert_eq!(Difficulty::Easy.initial_tick_interval_ms(), 200);
        assert_eq!(Difficulty::Medium.initial_tick_interval_ms(), 150);
        assert_eq!(Difficulty::Hard.initial_tick_interval_ms(), 100);

        let large = GridPreset::Large.grid().expect("preset grid is valid");
        assert_eq!((large.cols(), large.rows()), (25, 25));
        assert_eq!("small".parse::<GridPreset>().ok(), Some(GridPreset::Small));
    }

    #[test]
    fn labels_cycle_back_to_first() {
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(GridPreset::Medium.next(), GridPreset::Large);
        assert_eq!(GridPreset::Large.next(), GridPreset::Small);

        let mut color = SnakeColor::Primary;
        for _ in 0..4 {
            color = color.next();
        }
        assert_eq!(color, SnakeColor::Primary);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let error = "insane".parse::<Difficulty>().expect_err("label is unknown");
        assert!(matches!(
            error,
            ConfigError::UnknownLabel {
                kind: "difficulty",
                ..
            }
        ));
    }

    #[test]
    fn settings_parse_camel_case_record() {
        let settings =
            Settings::from_json(r#"{"difficulty":"hard","gridSize":"small","snakeColor":"purple"}"#)
                .expect("record should parse");

        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.grid_size, GridPreset::Small);
        assert_eq!(settings.snake_color, SnakeColor::Purple);
    }

    #[test]
    fn settings_missing_keys_use_defaults() {
        let settings = Settings::from_json(r#"{"difficulty":"easy"}"#).expect("partial record");

        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.grid_size, GridPreset::Medium);
        assert_eq!(settings.snake_color, SnakeColor::Primary);
    }

    #[test]
    fn missing_settings_file_returns_none() {
        let path = unique_test_path("missing");
        let loaded = Settings::load_from_path(&path).expect("missing file is not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "{\"difficulty\": \"brutal\"}").expect("test file write should succeed");

        assert!(matches!(
            Settings::load_from_path(&path),
            Err(ConfigError::SettingsParse { .. })
        ));

        let _ = fs::remove_file(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("wrap-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }
}
