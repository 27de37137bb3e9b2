pub mod config;
pub mod entities;
pub mod error;
pub mod grid;
pub mod level;
pub mod mapgen;
pub mod pathfinding;
pub mod random;
pub mod run;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, EngineConfig, PlayerConfig};
pub use error::{GenerationError, OccupancyError};
pub use grid::{Grid, Tile};
pub use level::{Interaction, Level, LevelSnapshot};
pub use mapgen::{GeneratedDungeon, LevelSettings, SpawnPlan};
pub use pathfinding::{Heuristic, find_path, find_path_with};
pub use run::Run;
pub use types::*;
