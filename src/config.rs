//! Configuration persistence using TOML
//!
//! Stored in ~/.config/blockfall/config.toml (or platform equivalent).
//! Every section falls back to its defaults when absent.

use crate::board::{BOARD_COLS, BOARD_ROWS, SPAWN_ANCHOR};
use crate::game::{PREVIEW_COLS, PREVIEW_ROWS};
use crate::render::BlockStyle;
use crate::tetromino::PieceKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors from loading, saving or validating configuration
#[derive(Debug)]
pub enum ConfigError {
    /// No platform config directory could be determined
    NoConfigDir,
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    /// A value that parses but cannot be used
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "could not determine config directory"),
            ConfigError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            ConfigError::Parse(e) => write!(f, "invalid config file: {}", e),
            ConfigError::Serialize(e) => write!(f, "failed to serialize config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::NoConfigDir | ConfigError::Invalid(_) => None,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardSettings,
    pub preview: PreviewSettings,
    pub timing: TimingSettings,
    pub randomizer: RandomizerSettings,
    pub render: RenderSettings,
}

/// Main board dimensions and spawn point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub rows: usize,
    pub cols: usize,
    pub spawn_col: i32,
    pub spawn_row: i32,
}

/// Next-piece grid dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Gap between two gravity steps in milliseconds
    pub descent_interval_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizerSettings {
    /// Fixed seed for a reproducible piece sequence; random when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub block_style: BlockStyle,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            spawn_col: SPAWN_ANCHOR.0,
            spawn_row: SPAWN_ANCHOR.1,
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            rows: PREVIEW_ROWS,
            cols: PREVIEW_COLS,
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            descent_interval_ms: 1000,
        }
    }
}

impl TimingSettings {
    pub fn descent_interval(&self) -> Duration {
        Duration::from_millis(self.descent_interval_ms)
    }
}

impl Config {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load the config file from the platform location, or use defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("no config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to the platform location
    pub fn save(&self) -> Result<(), ConfigError> {
        let dir = Self::config_dir().ok_or(ConfigError::NoConfigDir)?;
        fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;
        self.save_to(&dir.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml_string()?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        if board.rows == 0 || board.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "board must have rows and columns, got {}x{}",
                board.rows, board.cols
            )));
        }
        if self.preview.rows == 0 || self.preview.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "preview must have rows and columns, got {}x{}",
                self.preview.rows, self.preview.cols
            )));
        }
        if self.timing.descent_interval_ms == 0 {
            return Err(ConfigError::Invalid("descent interval must be positive".to_string()));
        }
        let spawn_inside = board.spawn_col >= 0
            && board.spawn_row >= 0
            && (board.spawn_col as usize) < board.cols
            && (board.spawn_row as usize) < board.rows;
        if !spawn_inside {
            return Err(ConfigError::Invalid(format!(
                "spawn anchor ({}, {}) is outside the {}x{} board",
                board.spawn_col, board.spawn_row, board.rows, board.cols
            )));
        }
        // Every kind must fit on an empty board in its first rotation
        for kind in PieceKind::ALL {
            let Some(pattern) = kind.patterns().first() else {
                continue;
            };
            let off_board = pattern.iter().any(|&(dx, dy)| {
                let (x, y) = (board.spawn_col + dx, board.spawn_row + dy);
                x < 0 || y < 0 || x as usize >= board.cols || y as usize >= board.rows
            });
            if off_board {
                return Err(ConfigError::Invalid(format!(
                    "{:?} piece does not fit at spawn anchor ({}, {}) on the {}x{} board",
                    kind, board.spawn_col, board.spawn_row, board.rows, board.cols
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Placement};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.board.rows, 20);
        assert_eq!(config.board.cols, 10);
        assert_eq!((config.board.spawn_col, config.board.spawn_row), (3, 0));
        assert_eq!(config.timing.descent_interval(), Duration::from_millis(1000));
        assert_eq!(config.randomizer.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [board]
            rows = 24

            [randomizer]
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.board.rows, 24);
        assert_eq!(config.board.cols, 10);
        assert_eq!(config.randomizer.seed, Some(42));
        assert_eq!(config.render.block_style, BlockStyle::Solid);
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut config = Config::default();
        config.timing.descent_interval_ms = 250;
        config.render.block_style = BlockStyle::Letters;

        let path = std::env::temp_dir().join(format!("blockfall-config-{}.toml", std::process::id()));
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml_str("[board]\ncols = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[timing]\ndescent_interval_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[board]\nspawn_col = 10"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[board]\nrows = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_spawn_where_pieces_do_not_fit() {
        for toml in [
            "[board]\nspawn_col = 7",
            "[board]\nspawn_col = 9",
            "[board]\nspawn_row = 19",
            "[board]\nrows = 2",
            "[board]\ncols = 3",
        ] {
            assert!(
                matches!(Config::from_toml_str(toml), Err(ConfigError::Invalid(_))),
                "accepted {toml:?}"
            );
        }

        // I reaches the right wall, J/L/T reach row 2
        let config = Config::from_toml_str("[board]\nspawn_col = 6\nrows = 3").unwrap();
        let mut board = Board::with_spawn(
            config.board.rows,
            config.board.cols,
            (config.board.spawn_col, config.board.spawn_row),
        );
        for kind in PieceKind::ALL {
            board.reset();
            assert_eq!(board.spawn_piece(kind), Placement::Placed, "{kind:?}");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/definitely/not/here/config.toml");
        let err = Config::load_from(path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
