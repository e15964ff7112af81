//! Front-end configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tictac::{GameSettings, Mode, Player};
use tracing::{debug, info, instrument};

/// Settings for the terminal front end, read from TOML.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Opponent for the first game.
    mode: Mode,

    /// Who moves first.
    starting_player: Player,

    /// The human's letter against the computer.
    human_player: Player,

    /// Pause before the computer moves, in milliseconds.
    ai_delay_ms: u64,

    /// Where the log file is written while the terminal is in raw mode.
    log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            mode: settings.mode,
            starting_player: settings.starting_player,
            human_player: settings.human_player,
            ai_delay_ms: tictac::DEFAULT_AI_DELAY.as_millis() as u64,
            log_file: PathBuf::from("tictac_tui.log"),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Overrides [`GameConfig::mode`].
    pub mode: Option<Mode>,
    /// Overrides [`GameConfig::starting_player`].
    pub starting_player: Option<Player>,
    /// Overrides [`GameConfig::human_player`].
    pub human_player: Option<Player>,
    /// Overrides [`GameConfig::ai_delay_ms`].
    pub ai_delay_ms: Option<u64>,
    /// Overrides [`GameConfig::log_file`].
    pub log_file: Option<PathBuf>,
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, otherwise starts from the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(player) = overrides.starting_player {
            self.starting_player = player;
        }
        if let Some(player) = overrides.human_player {
            self.human_player = player;
        }
        if let Some(ms) = overrides.ai_delay_ms {
            self.ai_delay_ms = ms;
        }
        if let Some(path) = overrides.log_file {
            self.log_file = path;
        }
        self
    }

    /// Game settings for the first game.
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            mode: self.mode,
            starting_player: self.starting_player,
            human_player: self.human_player,
        }
    }

    /// The computer's thinking pause.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
