//! Read-only, serializable view of a level for renderers and tools.

use serde::Serialize;

use crate::entities::{Chest, Enemy, ExitMarker, LooseItem, Player};
use crate::mapgen::RoomRect;
use crate::types::{Occupant, Pos};

use super::Level;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub pos: Pos,
    pub blocks_path: bool,
    pub is_floor: bool,
    pub is_hidden: bool,
    pub is_occupied: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelSnapshot {
    pub level: u32,
    pub width: usize,
    pub height: usize,
    /// Row-major.
    pub tiles: Vec<TileView>,
    pub rooms: Vec<RoomRect>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub chests: Vec<Chest>,
    pub items: Vec<LooseItem>,
    pub exit: ExitMarker,
}

impl Level {
    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            level: self.number,
            width: self.grid.width(),
            height: self.grid.height(),
            tiles: self
                .grid
                .tiles()
                .map(|(pos, tile)| TileView {
                    pos,
                    blocks_path: tile.blocks_path,
                    is_floor: tile.is_floor,
                    is_hidden: tile.is_hidden,
                    is_occupied: tile.is_occupied(),
                })
                .collect(),
            rooms: self.rooms.iter().map(|room| room.rect()).collect(),
            player: self.player.clone(),
            enemies: self.enemies.values().cloned().collect(),
            chests: self.chests.values().cloned().collect(),
            items: self.items.values().cloned().collect(),
            exit: self.exit,
        }
    }

    /// One line per row: `#` wall, `.` floor, `,` corridor, `@` player, `E` enemy, `x` dead
    /// enemy, `C` chest, `i` loose item, `>` exit. Hidden tiles render as spaces.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.grid.width() + 1) * self.grid.height());
        for (pos, tile) in self.grid.tiles() {
            let glyph = match tile.occupant() {
                Some(Occupant::Player) => '@',
                Some(Occupant::Enemy(id)) => match self.enemies.get(id) {
                    Some(enemy) if enemy.being.is_dead() => 'x',
                    _ => 'E',
                },
                Some(Occupant::Chest(_)) => 'C',
                Some(Occupant::Item(_)) => 'i',
                Some(Occupant::Exit) => '>',
                None if tile.is_hidden => ' ',
                None if tile.is_floor => '.',
                None if !tile.blocks_path => ',',
                None => '#',
            };
            out.push(glyph);
            if pos.x as usize + 1 == self.grid.width() {
                out.push('\n');
            }
        }
        out
    }
}
