use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SCORES_PATH, INITIAL_SPEED};

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("board must be at least 2x2, got {cols}x{rows}")]
    InvalidBoard { cols: u32, rows: u32 },
    #[error("initial speed must be a positive number of seconds, got {0}")]
    InvalidSpeed(f32),
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of board columns
    pub cols: u32,
    /// Number of board rows
    pub rows: u32,
    /// Seconds per cell before any speed-up
    pub initial_speed: f32,
    /// Where the max score record lives
    pub scores_path: PathBuf,
    /// Fixed seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            initial_speed: INITIAL_SPEED,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Load a JSON config file; missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < 2 || self.rows < 2 {
            return Err(ConfigError::InvalidBoard {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.initial_speed));
        }
        Ok(())
    }
}
