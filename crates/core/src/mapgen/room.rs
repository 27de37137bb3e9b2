//! Placed rooms: rectangle, column-grouped tiles, centre, and spawn-ordering distance.

use serde::Serialize;

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoomRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RoomRect {
    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn expanded(self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    rect: RoomRect,
    columns: Vec<Vec<Pos>>,
    centre: Pos,
}

impl Room {
    pub fn new(rect: RoomRect) -> Self {
        let columns = (rect.x..rect.x + rect.width)
            .map(|x| (rect.y..rect.y + rect.height).map(|y| Pos { y, x }).collect())
            .collect();
        Self { rect, columns, centre: rect.center() }
    }

    pub fn rect(&self) -> RoomRect {
        self.rect
    }

    /// Tiles grouped by column, left to right, each column top to bottom.
    pub fn columns(&self) -> &[Vec<Pos>] {
        &self.columns
    }

    pub fn tiles(&self) -> impl Iterator<Item = Pos> + '_ {
        self.columns.iter().flatten().copied()
    }

    pub fn centre(&self) -> Pos {
        self.centre
    }

    /// `centre.x + centre.y`. Orders rooms for spawning; it is not a travel distance.
    pub fn distance(&self) -> i32 {
        self.centre.x + self.centre.y
    }
}
