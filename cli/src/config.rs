use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use squarefour::{Player, Weights, MAX_DEPTH, MIN_DEPTH};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum First {
    Human,
    Computer,
}

impl From<First> for Player {
    fn from(first: First) -> Self {
        match first {
            First::Human => Player::Human,
            First::Computer => Player::Computer,
        }
    }
}

/// Game setup, loadable from TOML. Command-line flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_name: String,
    pub first: First,
    pub depth: u8,
    /// Seeds tie-breaking between equally scored columns. Without a seed the
    /// lowest column wins every tie.
    pub seed: Option<u64>,
    pub think_delay_ms: u64,
    pub weights: Weights,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player_name: "Player".to_string(),
            first: First::Human,
            depth: 4,
            seed: None,
            think_delay_ms: 500,
            weights: Weights::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&self.depth) {
            return Err(ConfigError::Validation(format!(
                "depth must be in [{MIN_DEPTH}, {MAX_DEPTH}]"
            )));
        }
        if self.player_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "player_name cannot be empty".into(),
            ));
        }
        if self.player_name.trim().eq_ignore_ascii_case("ai") {
            return Err(ConfigError::Validation(
                "player_name cannot be \"AI\"".into(),
            ));
        }
        Ok(())
    }
}
