//! Beings, items, chests and the exit marker that populate a level.
//! Entities live in per-level collections; tiles refer to them by handle only.

mod being;
mod enemy;
mod item;
mod player;

use serde::Serialize;

use crate::types::Pos;

pub use being::{Being, BeingState};
pub use enemy::Enemy;
pub use item::{Chest, Item, ItemKind, LooseItem, UseOutcome};
pub use player::{Inventory, Player, luck_loot_bonus};

/// Immovable marker; interacting with it completes the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ExitMarker {
    pub pos: Pos,
}
