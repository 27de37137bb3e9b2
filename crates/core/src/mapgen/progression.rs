//! Per-level generation and spawn settings, scaled from the starting level.

use serde::{Deserialize, Serialize};

use super::params::DungeonParams;

pub const STARTING_LEVEL: u32 = 1;
/// Periodic scaling stops after this level; milestones are unaffected.
pub const LAST_SCALING_LEVEL: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ValueRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    /// Sword tiers, weakest first.
    pub weapons: Vec<ValueRange<i32>>,
    pub damage_potions: Vec<ValueRange<i32>>,
    pub health_potions: Vec<ValueRange<i32>>,
    pub luck_potions: Vec<ValueRange<f64>>,
}

impl LootTable {
    pub fn starting() -> Self {
        Self {
            weapons: vec![
                ValueRange::new(1, 2),
                ValueRange::new(1, 2),
                ValueRange::new(1, 3),
                ValueRange::new(2, 4),
                ValueRange::new(2, 5),
                ValueRange::new(3, 5),
            ],
            damage_potions: vec![ValueRange::new(1, 2)],
            health_potions: vec![ValueRange::new(1, 2)],
            luck_potions: vec![ValueRange::new(0.1, 0.3)],
        }
    }

    fn strengthen(&mut self) {
        for range in self
            .weapons
            .iter_mut()
            .chain(self.damage_potions.iter_mut())
            .chain(self.health_potions.iter_mut())
        {
            range.min += 1;
            range.max += 1;
        }
        for range in &mut self.luck_potions {
            range.min += 0.1;
            range.max += 0.1;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Out of ten.
    pub loot_chance: i32,
    pub max_loot: usize,
    /// Out of ten.
    pub enemy_chance: i32,
    pub max_enemies: usize,
    pub max_enemy_health: i32,
    pub max_enemy_damage: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    pub level: u32,
    pub dungeon: DungeonParams,
    pub spawn: SpawnParams,
    pub loot: LootTable,
}

impl LevelSettings {
    pub fn starting() -> Self {
        Self {
            level: STARTING_LEVEL,
            dungeon: DungeonParams {
                max_rooms: 3,
                width: 20,
                height: 20,
                min_room_width: 4,
                max_room_width: 4,
                min_room_height: 4,
                max_room_height: 4,
            },
            spawn: SpawnParams {
                loot_chance: 6,
                max_loot: 3,
                enemy_chance: 2,
                max_enemies: 2,
                max_enemy_health: 2,
                max_enemy_damage: 1,
            },
            loot: LootTable::starting(),
        }
    }

    /// Settings for `level`, replaying every level-up from the start.
    pub fn for_level(level: u32) -> Self {
        let mut settings = Self::starting();
        while settings.level < level {
            settings = settings.next();
        }
        settings
    }

    pub fn next(&self) -> Self {
        let mut next = self.clone();
        next.level += 1;
        next.apply_level_up();
        next
    }

    fn apply_level_up(&mut self) {
        let level = self.level;
        if level <= LAST_SCALING_LEVEL && level % 5 == 0 {
            self.dungeon.max_rooms += 1;
            self.dungeon.width += 3;
            self.dungeon.height += 3;
            self.spawn.max_enemies += 1;
        }
        if level <= LAST_SCALING_LEVEL && level % 10 == 0 {
            self.loot.strengthen();
            self.dungeon.max_room_width += 1;
            self.dungeon.max_room_height += 1;
            self.spawn.max_enemy_health += 1;
            self.spawn.max_enemy_damage += 1;
        }

        let spawn = &mut self.spawn;
        match level {
            5 => {
                spawn.loot_chance = 3;
                spawn.max_loot = 1;
                spawn.enemy_chance = 4;
                spawn.max_enemies = 3;
            }
            10 => {
                spawn.loot_chance = 4;
                spawn.enemy_chance = 5;
            }
            20 => {
                spawn.max_loot = 2;
                spawn.max_enemies = 5;
                spawn.loot_chance = 5;
            }
            50 => spawn.enemy_chance = 7,
            65 => spawn.max_enemies = 6,
            80 => {
                spawn.max_loot = 3;
                spawn.loot_chance = 6;
                spawn.max_enemies = 8;
                spawn.enemy_chance = 8;
            }
            _ => {}
        }
    }
}
