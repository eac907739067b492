//! Game configuration.

use crate::games::morpion::Mark;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Board size, win length and first player for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns.
    #[serde(default = "default_width")]
    width: usize,

    /// Number of rows.
    #[serde(default = "default_height")]
    height: usize,

    /// Marks in a row needed to win.
    #[serde(default = "default_win_length")]
    win_length: usize,

    /// Player who moves first.
    #[serde(default)]
    first_player: Mark,
}

#[instrument]
fn default_width() -> usize {
    8
}

#[instrument]
fn default_height() -> usize {
    6
}

#[instrument]
fn default_win_length() -> usize {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            win_length: default_win_length(),
            first_player: Mark::default(),
        }
    }
}

impl GameConfig {
    /// Creates a configuration with `X` moving first.
    #[instrument]
    pub fn new(width: usize, height: usize, win_length: usize) -> Self {
        Self {
            width,
            height,
            win_length,
            first_player: Mark::X,
        }
    }

    /// Returns a copy with a different first player.
    #[instrument(skip(self))]
    pub fn with_first_player(self, first_player: Mark) -> Self {
        Self {
            first_player,
            ..self
        }
    }

    /// Returns a copy with any provided values replaced.
    #[instrument(skip(self))]
    pub fn with_overrides(
        self,
        width: Option<usize>,
        height: Option<usize>,
        win_length: Option<usize>,
        first_player: Option<Mark>,
    ) -> Self {
        Self {
            width: width.unwrap_or(self.width),
            height: height.unwrap_or(self.height),
            win_length: win_length.unwrap_or(self.win_length),
            first_player: first_player.unwrap_or(self.first_player),
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            width = config.width,
            height = config.height,
            win_length = config.win_length,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every dimension and the win length are positive.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::new(format!(
                "Board dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.win_length == 0 {
            return Err(ConfigError::new("Win length must be positive".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
