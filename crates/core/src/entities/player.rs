//! The player: a being with inventory slots, luck and a health cap.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::types::{Direction, Facing, Pos};

use super::being::Being;
use super::item::{Item, UseOutcome};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
    current: usize,
}

impl Inventory {
    pub fn new(size: usize) -> Self {
        Self { slots: vec![None; size], current: 0 }
    }

    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn active(&self) -> Option<&Item> {
        self.slots.get(self.current).and_then(Option::as_ref)
    }

    fn active_weapon_bonus(&self) -> i32 {
        self.active().and_then(Item::weapon_bonus).unwrap_or(0)
    }

    fn take_active(&mut self) -> Option<Item> {
        self.slots.get_mut(self.current).and_then(Option::take)
    }

    fn fill_active(&mut self, item: Item) -> Result<(), Item> {
        match self.slots.get_mut(self.current) {
            Some(slot) if slot.is_none() => {
                *slot = Some(item);
                Ok(())
            }
            _ => Err(item),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub being: Being,
    pub inventory: Inventory,
    pub luck: f64,
    pub health_cap: i32,
    /// Set by a successful step; cleared at the end of every tick.
    pub moved_again: bool,
}

impl Player {
    pub fn new(config: &EngineConfig) -> Self {
        let stats = &config.player;
        Self {
            being: Being::new(Pos { y: 0, x: 0 }, stats.health, stats.damage, Facing::Front),
            inventory: Inventory::new(stats.inventory_slots),
            luck: stats.luck,
            health_cap: stats.health_cap,
            moved_again: false,
        }
    }

    /// Puts the player on a new level's start tile, keeping stats and inventory.
    pub fn enter_level(&mut self, start: Pos) {
        self.being = Being::new(start, self.being.health, self.being.damage, Facing::Front);
        self.moved_again = false;
    }

    pub fn step(&mut self, grid: &mut Grid, direction: Direction) -> bool {
        let moved = self.being.step(grid, direction);
        if moved {
            self.moved_again = true;
        }
        moved
    }

    /// Switches the active slot. A weapon's bonus follows the selection.
    pub fn select_slot(&mut self, index: usize) -> bool {
        if index >= self.inventory.slots.len() {
            return false;
        }
        self.being.damage -= self.inventory.active_weapon_bonus();
        self.inventory.current = index;
        self.being.damage += self.inventory.active_weapon_bonus();
        true
    }

    /// Uses the active item. Returns true if it was consumed.
    pub fn use_item(&mut self) -> bool {
        let Some(item) = self.inventory.active().copied() else {
            return false;
        };
        match item.apply_to(self) {
            UseOutcome::Consumed => {
                self.inventory.take_active();
                true
            }
            UseOutcome::Kept => false,
        }
    }

    /// Stores `item` in the active slot if it is empty, equipping weapons immediately.
    pub fn pick_up(&mut self, item: Item) -> Result<(), Item> {
        self.inventory.fill_active(item)?;
        self.being.damage += self.inventory.active_weapon_bonus();
        Ok(())
    }

    /// Removes the active item for dropping, unequipping it first.
    pub fn release_active(&mut self) -> Option<Item> {
        self.being.damage -= self.inventory.active_weapon_bonus();
        self.inventory.take_active()
    }
}

/// Extra loot rolls per room: one for every two whole points of luck.
pub fn luck_loot_bonus(luck: f64) -> usize {
    if luck.is_finite() && luck > 0.0 { (luck.floor() as usize) / 2 } else { 0 }
}
