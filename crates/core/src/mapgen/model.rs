//! Public data models for generated dungeons.

use crate::grid::Grid;

use super::room::Room;

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedDungeon {
    pub grid: Grid,
    pub rooms: Vec<Room>,
}

impl GeneratedDungeon {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for (_, tile) in self.grid.tiles() {
            bytes.push(
                u8::from(tile.blocks_path)
                    | (u8::from(tile.is_floor) << 1)
                    | (u8::from(tile.is_hidden) << 2),
            );
        }
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            let rect = room.rect();
            for value in [rect.x, rect.y, rect.width, rect.height] {
                bytes.extend(value.to_le_bytes());
            }
        }
        bytes
    }
}
