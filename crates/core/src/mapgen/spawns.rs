//! Player, exit, enemy and chest placement on a generated dungeon.

use log::{debug, trace};
use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;

use crate::entities::{Chest, Enemy, ExitMarker, Item, ItemKind, luck_loot_bonus};
use crate::error::GenerationError;
use crate::grid::Grid;
use crate::random::{choose, random_f64, random_index, random_range, roll_chance};
use crate::types::{ChestId, EnemyId, Facing, Occupant, Pos};

use super::model::GeneratedDungeon;
use super::progression::{LootTable, SpawnParams, ValueRange};
use super::room::Room;
use super::sort::stable_sort_by_key;

/// Random tile picks per spawn before that spawn is skipped.
pub const PLACEMENT_ATTEMPTS: usize = 6;

#[derive(Clone, Debug)]
pub struct SpawnPlan {
    pub grid: Grid,
    /// Rooms ordered by ascending distance; the player starts in the first.
    pub rooms: Vec<Room>,
    pub player_start: Pos,
    pub exit: ExitMarker,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub chests: SlotMap<ChestId, Chest>,
}

/// Populates a generated dungeon.
///
/// The player's start and the exit are marked occupied. Every room but the first gets up to
/// `max_enemies` enemy rolls; every room gets up to `max_loot` (plus the luck bonus) chest
/// rolls. A roll that cannot find a free tile within [`PLACEMENT_ATTEMPTS`] picks is dropped.
pub fn spawn(
    dungeon: GeneratedDungeon,
    params: &SpawnParams,
    loot: &LootTable,
    player_luck: f64,
    rng: &mut ChaCha8Rng,
) -> Result<SpawnPlan, GenerationError> {
    let GeneratedDungeon { mut grid, rooms } = dungeon;
    if rooms.len() < 2 {
        return Err(GenerationError::invalid(format!(
            "spawning needs at least two rooms, got {}",
            rooms.len()
        )));
    }
    let rooms = stable_sort_by_key(rooms, Room::distance);

    let player_start = rooms[0].centre();
    let mut exit_pos = rooms[rooms.len() - 1].centre();
    if exit_pos == player_start {
        exit_pos = rooms[1].centre();
    }
    grid.place(player_start, Occupant::Player);
    grid.place(exit_pos, Occupant::Exit);

    let mut enemies: SlotMap<EnemyId, Enemy> = SlotMap::with_key();
    let mut chests: SlotMap<ChestId, Chest> = SlotMap::with_key();
    let max_loot = params.max_loot + luck_loot_bonus(player_luck);

    for (index, room) in rooms.iter().enumerate() {
        if index != 0 {
            for _ in 0..params.max_enemies {
                if !roll_chance(rng, params.enemy_chance) {
                    continue;
                }
                let Some(pos) = find_free_tile(&grid, room, rng, |_| true) else {
                    trace!("enemy spawn skipped in room at {:?}", room.centre());
                    continue;
                };
                let facing = *choose(rng, &[Facing::Left, Facing::Right]).unwrap_or(&Facing::Left);
                let health = random_range(rng, 1, params.max_enemy_health.max(1));
                let damage = random_range(rng, 1, params.max_enemy_damage.max(1));
                let id = enemies.insert(Enemy::new(pos, health, damage, facing));
                grid.place(pos, Occupant::Enemy(id));
            }
        }

        for _ in 0..max_loot {
            if !roll_chance(rng, params.loot_chance) {
                continue;
            }
            let Some(pos) = find_free_tile(&grid, room, rng, |pos| pos != player_start) else {
                trace!("loot spawn skipped in room at {:?}", room.centre());
                continue;
            };
            let Some(item) = roll_item(loot, rng) else {
                continue;
            };
            let id = chests.insert(Chest { pos, item });
            grid.place(pos, Occupant::Chest(id));
        }
    }

    debug!(
        "spawned player at {player_start:?}, exit at {exit_pos:?}, {} enemies, {} chests",
        enemies.len(),
        chests.len()
    );
    Ok(SpawnPlan {
        grid,
        rooms,
        player_start,
        exit: ExitMarker { pos: exit_pos },
        enemies,
        chests,
    })
}

fn find_free_tile(
    grid: &Grid,
    room: &Room,
    rng: &mut ChaCha8Rng,
    allowed: impl Fn(Pos) -> bool,
) -> Option<Pos> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let Some(column) = choose(rng, room.columns()) else {
            return None;
        };
        let Some(&pos) = choose(rng, column) else {
            continue;
        };
        if grid.is_walkable(pos) && allowed(pos) {
            return Some(pos);
        }
    }
    None
}

/// Uniform item type, then a uniform entry from that type's table, then its value.
fn roll_item(loot: &LootTable, rng: &mut ChaCha8Rng) -> Option<Item> {
    let kind = *choose(rng, &ItemKind::ALL)?;
    let item = match kind {
        ItemKind::Weapon => {
            let tier = random_index(rng, loot.weapons.len())?;
            let bonus = roll_int(rng, loot.weapons[tier]);
            Item::Weapon { tier: tier + 1, bonus }
        }
        ItemKind::DamagePotion => {
            let range = *choose(rng, &loot.damage_potions)?;
            Item::DamagePotion(roll_int(rng, range))
        }
        ItemKind::HealthPotion => {
            let range = *choose(rng, &loot.health_potions)?;
            Item::HealthPotion(roll_int(rng, range))
        }
        ItemKind::LuckPotion => {
            let range = *choose(rng, &loot.luck_potions)?;
            Item::LuckPotion(random_f64(rng, range.min, range.max))
        }
    };
    Some(item)
}

fn roll_int(rng: &mut ChaCha8Rng, range: ValueRange<i32>) -> i32 {
    random_range(rng, range.min.min(range.max), range.min.max(range.max))
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::mapgen::room::RoomRect;
    use crate::mapgen::{DungeonParams, LevelSettings, generate};

    fn generated(seed: u64) -> (GeneratedDungeon, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let params = DungeonParams {
            max_rooms: 6,
            width: 40,
            height: 40,
            ..LevelSettings::starting().dungeon
        };
        let dungeon = generate(&params, &mut rng).expect("valid parameters");
        (dungeon, rng)
    }

    fn generous() -> SpawnParams {
        SpawnParams {
            loot_chance: 10,
            max_loot: 2,
            enemy_chance: 10,
            max_enemies: 3,
            max_enemy_health: 4,
            max_enemy_damage: 2,
        }
    }

    #[test]
    fn player_starts_in_nearest_room_and_exit_sits_in_farthest() {
        for seed in 0..10 {
            let (dungeon, mut rng) = generated(seed);
            let plan = spawn(dungeon, &generous(), &LootTable::starting(), 0.0, &mut rng)
                .expect("two rooms");
            let distances: Vec<i32> = plan.rooms.iter().map(Room::distance).collect();
            assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_eq!(plan.player_start, plan.rooms[0].centre());
            assert_ne!(plan.player_start, plan.exit.pos);
            assert_eq!(plan.grid.occupant(plan.player_start), Some(Occupant::Player));
            assert_eq!(plan.grid.occupant(plan.exit.pos), Some(Occupant::Exit));
        }
    }

    #[test]
    fn enemies_never_spawn_in_the_start_room() {
        for seed in 0..10 {
            let (dungeon, mut rng) = generated(seed);
            let plan = spawn(dungeon, &generous(), &LootTable::starting(), 0.0, &mut rng)
                .expect("two rooms");
            let start_room = plan.rooms[0].rect();
            for (id, enemy) in &plan.enemies {
                assert!(!start_room.contains(enemy.being.pos));
                assert_eq!(plan.grid.occupant(enemy.being.pos), Some(Occupant::Enemy(id)));
                assert!((1..=4).contains(&enemy.being.health));
                assert!((1..=2).contains(&enemy.being.damage));
            }
            for (id, chest) in &plan.chests {
                assert_ne!(chest.pos, plan.player_start);
                assert_eq!(plan.grid.occupant(chest.pos), Some(Occupant::Chest(id)));
            }
        }
    }

    #[test]
    fn zero_chance_spawns_nothing() {
        let (dungeon, mut rng) = generated(4);
        let params = SpawnParams { loot_chance: -1, enemy_chance: -1, ..generous() };
        let plan = spawn(dungeon, &params, &LootTable::starting(), 9.0, &mut rng).expect("rooms");
        assert!(plan.enemies.is_empty());
        assert!(plan.chests.is_empty());
    }

    #[test]
    fn spawn_counts_are_bounded_per_room() {
        let (dungeon, mut rng) = generated(8);
        let room_count = dungeon.rooms.len();
        let plan = spawn(dungeon, &generous(), &LootTable::starting(), 4.0, &mut rng)
            .expect("rooms");
        assert!(plan.enemies.len() <= (room_count - 1) * 3);
        assert!(plan.chests.len() <= room_count * (2 + 2));
    }

    #[test]
    fn full_room_skips_placement_instead_of_failing() {
        let mut grid = Grid::new(12, 12);
        let first = Room::new(RoomRect { x: 2, y: 2, width: 1, height: 1 });
        let second = Room::new(RoomRect { x: 6, y: 6, width: 1, height: 1 });
        grid.set_room(first.tiles().chain(second.tiles()));
        let dungeon = GeneratedDungeon { grid, rooms: vec![second, first] };

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let plan = spawn(dungeon, &generous(), &LootTable::starting(), 0.0, &mut rng)
            .expect("rooms");
        assert_eq!(plan.player_start, Pos { y: 2, x: 2 });
        assert_eq!(plan.exit.pos, Pos { y: 6, x: 6 });
        assert!(plan.enemies.is_empty());
        assert!(plan.chests.is_empty());
    }

    #[test]
    fn single_room_is_rejected() {
        let grid = Grid::new(10, 10);
        let rooms = vec![Room::new(RoomRect { x: 2, y: 2, width: 3, height: 3 })];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = spawn(
            GeneratedDungeon { grid, rooms },
            &generous(),
            &LootTable::starting(),
            0.0,
            &mut rng,
        );
        assert!(matches!(result, Err(GenerationError::InvalidConfiguration { .. })));
    }

    #[test]
    fn rolled_items_respect_their_tables() {
        let loot = LootTable::starting();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut seen = [false; 4];
        for _ in 0..400 {
            let item = roll_item(&loot, &mut rng).expect("non-empty tables");
            match item {
                Item::Weapon { tier, bonus } => {
                    seen[0] = true;
                    let range = loot.weapons[tier - 1];
                    assert!((range.min..=range.max).contains(&bonus));
                }
                Item::DamagePotion(value) | Item::HealthPotion(value) => {
                    seen[if matches!(item, Item::DamagePotion(_)) { 1 } else { 2 }] = true;
                    assert!((1..=2).contains(&value));
                }
                Item::LuckPotion(value) => {
                    seen[3] = true;
                    assert!((0.1..0.3).contains(&value));
                }
            }
        }
        assert_eq!(seen, [true; 4]);
    }
}
