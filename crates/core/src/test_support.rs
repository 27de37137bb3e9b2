//! Shared fixtures for unit tests across the crate.

use slotmap::SlotMap;

use crate::config::EngineConfig;
use crate::entities::{Chest, Enemy, ExitMarker, Item};
use crate::grid::Grid;
use crate::mapgen::{Room, RoomRect, SpawnPlan};
use crate::types::{ChestId, EnemyId, Facing, Occupant, Pos};

/// Grid with every tile open floor.
pub(crate) fn open_grid(width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    let tiles: Vec<Pos> = (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| Pos { y, x }))
        .collect();
    grid.set_room(tiles);
    grid
}

pub(crate) fn test_config() -> EngineConfig {
    EngineConfig::default()
}

/// Open arena with the player and exit placed and no enemies or chests.
pub(crate) fn arena_plan(width: usize, height: usize, player_start: Pos, exit: Pos) -> SpawnPlan {
    let mut grid = open_grid(width, height);
    assert!(grid.place(player_start, Occupant::Player));
    assert!(grid.place(exit, Occupant::Exit));
    let whole = Room::new(RoomRect { x: 0, y: 0, width: width as i32, height: height as i32 });
    SpawnPlan {
        grid,
        rooms: vec![whole],
        player_start,
        exit: ExitMarker { pos: exit },
        enemies: SlotMap::with_key(),
        chests: SlotMap::with_key(),
    }
}

pub(crate) fn add_enemy(plan: &mut SpawnPlan, pos: Pos, health: i32, damage: i32) -> EnemyId {
    let id = plan.enemies.insert(Enemy::new(pos, health, damage, Facing::Left));
    assert!(plan.grid.place(pos, Occupant::Enemy(id)));
    id
}

pub(crate) fn add_chest(plan: &mut SpawnPlan, pos: Pos, item: Item) -> ChestId {
    let id = plan.chests.insert(Chest { pos, item });
    assert!(plan.grid.place(pos, Occupant::Chest(id)));
    id
}
