//! One dungeon level: grid, rooms and entity collections, advanced one tick at a time.

mod commands;
mod enemies;
mod snapshot;

use std::iter;

use log::{debug, info};
use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;

use crate::config::EngineConfig;
use crate::entities::{Chest, Enemy, ExitMarker, LooseItem, Player};
use crate::error::{GenerationError, OccupancyError};
use crate::grid::Grid;
use crate::mapgen::{self, LevelSettings, Room, SpawnPlan};
use crate::types::{ChestId, Command, EnemyId, ItemId, Occupant, Pos, TickOutcome};

pub use commands::Interaction;
pub use snapshot::{LevelSnapshot, TileView};

#[derive(Clone, Debug)]
pub struct Level {
    number: u32,
    grid: Grid,
    rooms: Vec<Room>,
    player: Player,
    enemies: SlotMap<EnemyId, Enemy>,
    chests: SlotMap<ChestId, Chest>,
    items: SlotMap<ItemId, LooseItem>,
    exit: ExitMarker,
    config: EngineConfig,
    /// Time since any enemy last stepped.
    enemy_move_timer_ms: u64,
}

impl Level {
    /// Generates and populates a level, then moves `player` onto its start tile.
    pub fn generate(
        settings: &LevelSettings,
        player: Player,
        config: EngineConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<Self, GenerationError> {
        let dungeon = mapgen::generate(&settings.dungeon, rng)?;
        let plan = mapgen::spawn(dungeon, &settings.spawn, &settings.loot, player.luck, rng)?;
        Ok(Self::from_plan(settings.level, plan, player, config))
    }

    /// The plan must already mark the player's start tile with [`Occupant::Player`].
    pub fn from_plan(
        number: u32,
        plan: SpawnPlan,
        mut player: Player,
        config: EngineConfig,
    ) -> Self {
        player.enter_level(plan.player_start);
        debug!(
            "level {number} ready: {} rooms, {} enemies, {} chests",
            plan.rooms.len(),
            plan.enemies.len(),
            plan.chests.len()
        );
        Self {
            number,
            grid: plan.grid,
            rooms: plan.rooms,
            player,
            enemies: plan.enemies,
            chests: plan.chests,
            items: SlotMap::with_key(),
            exit: plan.exit,
            config,
            enemy_move_timer_ms: 0,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &SlotMap<EnemyId, Enemy> {
        &self.enemies
    }

    pub fn chests(&self) -> &SlotMap<ChestId, Chest> {
        &self.chests
    }

    pub fn items(&self) -> &SlotMap<ItemId, LooseItem> {
        &self.items
    }

    pub fn exit(&self) -> ExitMarker {
        self.exit
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves one tick: the player's command, the player's attack animation, every living
    /// enemy in collection order, despawns, the shared move cadence, and finally the player's
    /// death timer.
    pub fn tick(&mut self, command: Option<Command>, elapsed_ms: u64) -> TickOutcome {
        let mut completed = false;
        if !self.player.being.is_dead()
            && let Some(command) = command
        {
            completed = self.apply_command(command);
        }

        if !self.player.being.moving {
            self.player.being.advance_attack(self.config.player_attack_cycle());
        }

        self.resolve_enemies(elapsed_ms);
        self.player.moved_again = false;

        if self.player.being.is_dead()
            && self.player.being.tick_dead_timer(elapsed_ms, self.config.player_death_delay_ms)
        {
            info!("player died on level {}", self.number);
            return TickOutcome::GameOver;
        }
        if completed {
            info!("level {} complete", self.number);
            return TickOutcome::LevelComplete;
        }
        TickOutcome::Continue
    }

    /// Checks both directions of the tile/entity relation: every occupant names an entity
    /// standing on that tile, and every entity is recorded on its tile.
    pub fn verify_occupancy(&self) -> Result<(), OccupancyError> {
        for (pos, tile) in self.grid.tiles() {
            let Some(occupant) = tile.occupant() else {
                continue;
            };
            let entity_pos = match occupant {
                Occupant::Player => Some(self.player.being.pos),
                Occupant::Enemy(id) => self.enemies.get(id).map(|enemy| enemy.being.pos),
                Occupant::Chest(id) => self.chests.get(id).map(|chest| chest.pos),
                Occupant::Item(id) => self.items.get(id).map(|item| item.pos),
                Occupant::Exit => Some(self.exit.pos),
            };
            if entity_pos != Some(pos) {
                return Err(OccupancyError::Dangling { pos, occupant });
            }
        }

        let expected = iter::once((self.player.being.pos, Occupant::Player, "player"))
            .chain(iter::once((self.exit.pos, Occupant::Exit, "exit")))
            .chain(self.enemies.iter().map(|(id, e)| (e.being.pos, Occupant::Enemy(id), "enemy")))
            .chain(self.chests.iter().map(|(id, c)| (c.pos, Occupant::Chest(id), "chest")))
            .chain(self.items.iter().map(|(id, i)| (i.pos, Occupant::Item(id), "item")));
        for (pos, occupant, entity) in expected {
            if self.grid.occupant(pos) != Some(occupant) {
                return Err(OccupancyError::Unmarked { pos, entity });
            }
        }
        Ok(())
    }

    fn tile_in_front(&self) -> Pos {
        self.player.being.direction
    }
}

#[cfg(test)]
mod tests;
