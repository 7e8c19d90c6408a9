//! Game configuration loaded from YAML.
//!
//! Every section is optional; an empty file is a valid one-player game with
//! fresh random dice and no event log.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::chance::ChanceMode;
use crate::rules::MAX_PLAYERS;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Player names in seating order. Blank entries get a default name.
    #[serde(default = "default_players")]
    pub players: Vec<String>,

    #[serde(default)]
    pub chance: ChanceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_players() -> Vec<String> {
    vec![String::new()]
}

/// Which dice source a game uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceKind {
    #[default]
    Rng,
    /// Event-keyed dice: the same seed and decisions replay the same game.
    Deterministic,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChanceConfig {
    #[serde(default)]
    pub mode: ChanceKind,
    /// If None, a fresh seed is drawn per game.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// NDJSON event log; disabled when unset.
    #[serde(default)]
    pub events_path: Option<String>,
    #[serde(default = "default_flush_every_lines")]
    pub flush_every_lines: usize,
    /// Maps to `YH_DEBUG_LOG=1`.
    #[serde(default)]
    pub debug_log: bool,
}

fn default_flush_every_lines() -> usize {
    1
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            events_path: None,
            flush_every_lines: default_flush_every_lines(),
            debug_log: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: default_players(),
            chance: ChanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as unit, not as an empty map.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::Invalid("players must not be empty".into()));
        }
        if self.players.len() > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "at most {MAX_PLAYERS} players, got {}",
                self.players.len()
            )));
        }
        if self.logging.flush_every_lines == 0 {
            return Err(ConfigError::Invalid(
                "logging.flush_every_lines must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build the dice source for one game.
    pub fn chance_mode(&self) -> ChanceMode {
        let seed = self.chance.seed.unwrap_or_else(rand::random);
        match self.chance.mode {
            ChanceKind::Rng => ChanceMode::rng(seed),
            ChanceKind::Deterministic => ChanceMode::deterministic(seed),
        }
    }
}
