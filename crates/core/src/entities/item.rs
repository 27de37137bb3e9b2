//! Loot items and the containers that hold them on the map.

use serde::Serialize;

use crate::types::Pos;

use super::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    Weapon,
    DamagePotion,
    HealthPotion,
    LuckPotion,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] =
        [ItemKind::Weapon, ItemKind::DamagePotion, ItemKind::HealthPotion, ItemKind::LuckPotion];
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Item {
    /// Flat damage bonus while selected. `tier` is 1-based.
    Weapon { tier: usize, bonus: i32 },
    HealthPotion(i32),
    DamagePotion(i32),
    LuckPotion(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseOutcome {
    Consumed,
    Kept,
}

impl Item {
    pub fn weapon_bonus(&self) -> Option<i32> {
        match self {
            Item::Weapon { bonus, .. } => Some(*bonus),
            _ => None,
        }
    }

    /// Drinks a potion. Health only applies while the player is at or under the cap, and an
    /// unapplied health potion stays in the slot. Weapons are never consumed.
    pub fn apply_to(&self, player: &mut Player) -> UseOutcome {
        match *self {
            Item::Weapon { .. } => UseOutcome::Kept,
            Item::HealthPotion(amount) => {
                if player.being.health <= player.health_cap {
                    player.being.health += amount;
                    UseOutcome::Consumed
                } else {
                    UseOutcome::Kept
                }
            }
            Item::DamagePotion(amount) => {
                player.being.damage += amount;
                UseOutcome::Consumed
            }
            Item::LuckPotion(amount) => {
                player.luck += amount;
                UseOutcome::Consumed
            }
        }
    }
}

/// Closed container; occupies its tile until opened.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chest {
    pub pos: Pos,
    pub item: Item,
}

/// Item lying on the floor, either out of an opened chest or dropped by the player.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LooseItem {
    pub pos: Pos,
    pub item: Item,
}
