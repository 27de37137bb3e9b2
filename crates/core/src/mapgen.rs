//! Procedural dungeon generation split into coherent submodules.

pub mod model;
pub mod params;
pub mod progression;
pub mod room;
pub mod sort;

mod layout;
mod spawns;

use log::debug;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::grid::Grid;

pub use model::GeneratedDungeon;
pub use params::DungeonParams;
pub use progression::{LevelSettings, LootTable, SpawnParams, ValueRange};
pub use room::{Room, RoomRect};
pub use sort::stable_sort_by_key;
pub use spawns::{SpawnPlan, spawn};

/// Builds a grid with non-overlapping rooms joined by L-shaped corridors, then derives
/// visibility. Parameters are validated before anything is allocated.
pub fn generate(
    params: &DungeonParams,
    rng: &mut ChaCha8Rng,
) -> Result<GeneratedDungeon, GenerationError> {
    params.validate()?;
    let mut grid = Grid::new(params.width, params.height);
    let rooms = layout::place_rooms(&mut grid, params, rng)?;
    grid.reveal_visibility();
    debug!("generated {}x{} dungeon with {} rooms", params.width, params.height, rooms.len());
    Ok(GeneratedDungeon { grid, rooms })
}
