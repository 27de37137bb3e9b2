//! Tile grid with per-tile wall, floor, visibility and occupancy state.
//! This module exists so every subsystem mutates occupancy through one place.
//! It does not own entities; occupants are handles into the level's collections.

use serde::Serialize;

use crate::types::{Occupant, Pos};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tile {
    pub blocks_path: bool,
    pub is_floor: bool,
    pub is_hidden: bool,
    #[serde(skip)]
    occupant: Option<Occupant>,
}

impl Tile {
    fn wall() -> Self {
        Self { blocks_path: true, is_floor: false, is_hidden: true, occupant: None }
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_walkable(&self) -> bool {
        !self.blocks_path && self.occupant.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// All-wall, all-hidden, unoccupied grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![Tile::wall(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(self.index(pos))
    }

    fn tile_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.tiles.get_mut(idx)
    }

    /// Row-major iteration, `y` outer.
    pub fn tiles(&self) -> impl Iterator<Item = (Pos, &Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(idx, tile)| {
            (Pos { y: (idx / self.width) as i32, x: (idx % self.width) as i32 }, tile)
        })
    }

    pub fn blocks_path(&self, pos: Pos) -> bool {
        self.tile(pos).is_none_or(|tile| tile.blocks_path)
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(Tile::is_walkable)
    }

    pub fn occupant(&self, pos: Pos) -> Option<Occupant> {
        self.tile(pos).and_then(Tile::occupant)
    }

    /// In-bounds orthogonal neighbours with unit step cost, ordered west, east, north, south.
    pub fn adjacent(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        [pos.offset(-1, 0), pos.offset(1, 0), pos.offset(0, -1), pos.offset(0, 1)]
            .into_iter()
            .filter(|next| self.in_bounds(*next))
    }

    pub fn set_room(&mut self, tiles: impl IntoIterator<Item = Pos>) {
        for pos in tiles {
            if let Some(tile) = self.tile_mut(pos) {
                tile.is_floor = true;
                tile.blocks_path = false;
            }
        }
    }

    pub fn clear_path(&mut self, pos: Pos) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.blocks_path = false;
        }
    }

    /// Carves a two-wide L-shaped corridor from `from` to `to`.
    ///
    /// The horizontal leg clears each tile and the one above it. The vertical leg then runs
    /// clearing each tile and the one to its right, shifted so the legs meet without a gap.
    /// Corridors clear `blocks_path` only; they never become floor.
    pub fn carve_tunnel(&mut self, from: Pos, to: Pos) {
        let leg_x = if from.x <= to.x {
            let end_x = to.x + 1;
            for x in from.x..end_x {
                self.clear_path(Pos { y: from.y, x });
                self.clear_path(Pos { y: from.y - 1, x });
            }
            end_x - 2
        } else {
            let end_x = to.x - 2;
            for x in (end_x + 1..=from.x).rev() {
                self.clear_path(Pos { y: from.y, x });
                self.clear_path(Pos { y: from.y - 1, x });
            }
            end_x + 1
        };

        if from.y <= to.y {
            for y in from.y..to.y {
                self.clear_path(Pos { y, x: leg_x });
                self.clear_path(Pos { y, x: leg_x + 1 });
            }
        } else {
            for y in (to.y + 1..=from.y).rev() {
                self.clear_path(Pos { y, x: leg_x });
                self.clear_path(Pos { y, x: leg_x + 1 });
            }
        }
    }

    /// Single pass: open tiles become visible, and so do walls with an open 8-neighbour.
    /// Boundary tiles are skipped.
    pub fn reveal_visibility(&mut self) {
        if self.width < 3 || self.height < 3 {
            return;
        }
        for y in 1..(self.height as i32 - 1) {
            for x in 1..(self.width as i32 - 1) {
                let pos = Pos { y, x };
                let visible = !self.blocks_path(pos) || self.borders_open_space(pos);
                if visible && let Some(tile) = self.tile_mut(pos) {
                    tile.is_hidden = false;
                }
            }
        }
    }

    fn borders_open_space(&self, pos: Pos) -> bool {
        (-1..=1).any(|dy| {
            (-1..=1).any(|dx| (dx, dy) != (0, 0) && !self.blocks_path(pos.offset(dx, dy)))
        })
    }

    /// Puts `occupant` on a free tile. Returns false if the tile is taken or out of bounds.
    pub fn place(&mut self, pos: Pos, occupant: Occupant) -> bool {
        match self.tile_mut(pos) {
            Some(tile) if tile.occupant.is_none() => {
                tile.occupant = Some(occupant);
                true
            }
            _ => false,
        }
    }

    /// Swaps the occupant of an already occupied tile, e.g. an opened chest leaving its item.
    pub fn replace_occupant(&mut self, pos: Pos, occupant: Occupant) -> Option<Occupant> {
        let tile = self.tile_mut(pos)?;
        tile.occupant.replace(occupant)
    }

    pub fn vacate(&mut self, pos: Pos) -> Option<Occupant> {
        self.tile_mut(pos).and_then(|tile| tile.occupant.take())
    }

    /// Moves the occupant of `from` onto `to` when `to` is unblocked and unoccupied.
    pub fn relocate(&mut self, from: Pos, to: Pos) -> bool {
        if !self.is_walkable(to) {
            return false;
        }
        let Some(occupant) = self.vacate(from) else {
            return false;
        };
        self.place(to, occupant)
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
