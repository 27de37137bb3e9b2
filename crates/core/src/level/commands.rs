//! Player commands and the facing-tile interaction dispatch.

use log::debug;

use crate::entities::{Item, LooseItem};
use crate::types::{ChestId, Command, EnemyId, ItemId, Occupant};

use super::Level;

/// What an interaction with the tile in front of the player did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    ReachedExit,
    OpenedChest { chest: ChestId, item: ItemId },
    Struck { enemy: EnemyId, killed: bool },
    PickedUp(Item),
    /// The active slot is full, so the item stays on the floor.
    SlotOccupied,
    /// Nothing to interact with; the player swings at empty space.
    Swing,
    /// Mid-swing or dead.
    Unavailable,
}

impl Level {
    /// Returns true when the command completes the level.
    pub(super) fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => {
                if self.player.being.moving {
                    self.player.step(&mut self.grid, direction);
                }
            }
            Command::SelectSlot(index) => {
                self.player.select_slot(index);
            }
            Command::DropItem => {
                self.drop_item();
            }
            Command::UseItem => {
                self.player.use_item();
            }
            Command::Interact => return self.interact() == Interaction::ReachedExit,
        }
        false
    }

    /// Acts on whatever occupies the tile the player faces.
    pub fn interact(&mut self) -> Interaction {
        if !self.player.being.moving || self.player.being.is_dead() {
            return Interaction::Unavailable;
        }
        let target = self.tile_in_front();
        match self.grid.occupant(target) {
            Some(Occupant::Exit) => Interaction::ReachedExit,
            Some(Occupant::Chest(chest)) => match self.chests.remove(chest) {
                Some(opened) => {
                    let item = self.items.insert(LooseItem { pos: target, item: opened.item });
                    self.grid.replace_occupant(target, Occupant::Item(item));
                    Interaction::OpenedChest { chest, item }
                }
                None => Interaction::Swing,
            },
            Some(Occupant::Enemy(enemy)) => {
                self.player.being.start_attack();
                let damage = self.player.being.damage;
                let killed = match self.enemies.get_mut(enemy) {
                    Some(foe) if !foe.being.is_dead() => foe.being.take_damage(damage),
                    _ => false,
                };
                if killed {
                    debug!("enemy at {target:?} killed");
                }
                Interaction::Struck { enemy, killed }
            }
            Some(Occupant::Item(id)) => {
                let Some(loose) = self.items.get(id) else {
                    return Interaction::Swing;
                };
                let item = loose.item;
                if self.player.pick_up(item).is_err() {
                    return Interaction::SlotOccupied;
                }
                self.items.remove(id);
                self.grid.vacate(target);
                Interaction::PickedUp(item)
            }
            Some(Occupant::Player) | None => {
                self.player.being.start_attack();
                Interaction::Swing
            }
        }
    }

    /// Drops the active item onto the facing tile when that tile is open and unoccupied.
    pub fn drop_item(&mut self) -> bool {
        let target = self.tile_in_front();
        if !self.grid.is_walkable(target) {
            return false;
        }
        let Some(item) = self.player.release_active() else {
            return false;
        };
        let id = self.items.insert(LooseItem { pos: target, item });
        self.grid.place(target, Occupant::Item(id))
    }
}
