//! Engine tuning: timing, combat and starting player stats.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a TOML config file when no path is given explicitly.
pub const CONFIG_ENV_VAR: &str = "DUNGEON_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub health: i32,
    pub damage: i32,
    pub health_cap: i32,
    pub inventory_slots: usize,
    pub luck: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { health: 5, damage: 1, health_cap: 20, inventory_slots: 5, luck: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest route, counting the enemy's own tile plus one, at which an enemy engages.
    pub attack_distance: usize,
    pub enemy_move_interval_ms: u64,
    pub enemy_despawn_ms: u64,
    pub player_death_delay_ms: u64,
    /// Real time per tick when a driver runs at a fixed rate.
    pub tick_interval_ms: u64,
    pub frames_per_image: usize,
    pub player_attack_frames: usize,
    pub enemy_attack_frames: usize,
    pub player: PlayerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            attack_distance: 8,
            enemy_move_interval_ms: 1000,
            enemy_despawn_ms: 4000,
            player_death_delay_ms: 3000,
            tick_interval_ms: 40,
            frames_per_image: 2,
            player_attack_frames: 5,
            enemy_attack_frames: 9,
            player: PlayerConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn player_attack_cycle(&self) -> usize {
        self.player_attack_frames * self.frames_per_image
    }

    pub fn enemy_attack_cycle(&self) -> usize {
        self.enemy_attack_frames * self.frames_per_image
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    /// Explicit path first, then `DUNGEON_CONFIG`, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = env::var(CONFIG_ENV_VAR).ok();
        Self::resolve_with(explicit, from_env.as_deref())
    }

    pub fn resolve_with(
        explicit: Option<&Path>,
        env_value: Option<&str>,
    ) -> Result<Self, ConfigError> {
        match (explicit, env_value.filter(|value| !value.trim().is_empty())) {
            (Some(path), _) => Self::load(path),
            (None, Some(value)) => Self::load(Path::new(value.trim())),
            (None, None) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames_per_image == 0
            || self.player_attack_frames == 0
            || self.enemy_attack_frames == 0
        {
            return Err(ConfigError::Invalid("animation frame counts must be non-zero".into()));
        }
        if self.player.inventory_slots == 0 {
            return Err(ConfigError::Invalid("player needs at least one inventory slot".into()));
        }
        if self.player.health <= 0 {
            return Err(ConfigError::Invalid("player must start alive".into()));
        }
        if !self.player.luck.is_finite() {
            return Err(ConfigError::Invalid("player luck must be finite".into()));
        }
        Ok(())
    }
}
