use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::entities::{Item, Player};
use crate::test_support::{add_chest, add_enemy, arena_plan, test_config};
use crate::types::Direction;

const PLAYER_START: Pos = Pos { y: 1, x: 1 };

fn level_from(plan: SpawnPlan, config: EngineConfig) -> Level {
    let player = Player::new(&config);
    Level::from_plan(1, plan, player, config)
}

#[test]
fn starts_with_player_on_the_start_tile() {
    let level = level_from(arena_plan(6, 4, PLAYER_START, Pos { y: 3, x: 5 }), test_config());
    assert_eq!(level.player().being.pos, PLAYER_START);
    assert_eq!(level.player().being.direction, Pos { y: 2, x: 1 });
    assert_eq!(level.verify_occupancy(), Ok(()));
}

#[test]
fn killed_enemy_holds_its_tile_until_despawn() {
    let mut config = test_config();
    config.player.damage = 2;
    let mut plan = arena_plan(8, 3, PLAYER_START, Pos { y: 0, x: 7 });
    let enemy_pos = Pos { y: 1, x: 2 };
    let enemy = add_enemy(&mut plan, enemy_pos, 2, 1);
    let mut level = level_from(plan, config);

    assert_eq!(level.tick(Some(Command::Move(Direction::East)), 0), TickOutcome::Continue);
    assert_eq!(level.player().being.pos, PLAYER_START, "the enemy blocks the step");
    assert_eq!(level.player().being.direction, enemy_pos);

    level.tick(Some(Command::Interact), 0);
    let struck = &level.enemies()[enemy];
    assert_eq!(struck.being.health, 0);
    assert!(struck.being.is_dead());
    assert_eq!(level.grid().occupant(enemy_pos), Some(Occupant::Enemy(enemy)));

    for _ in 0..3 {
        level.tick(None, 1_000);
    }
    assert!(level.enemies().contains_key(enemy));
    level.tick(None, 1_000);
    assert!(!level.enemies().contains_key(enemy));
    assert_eq!(level.grid().occupant(enemy_pos), None);
    assert_eq!(level.verify_occupancy(), Ok(()));
}

#[test]
fn striking_a_survivor_reports_no_kill() {
    let mut plan = arena_plan(8, 3, PLAYER_START, Pos { y: 0, x: 7 });
    let enemy = add_enemy(&mut plan, Pos { y: 2, x: 1 }, 3, 1);
    let mut level = level_from(plan, test_config());

    assert_eq!(level.interact(), Interaction::Struck { enemy, killed: false });
    assert_eq!(level.enemies()[enemy].being.health, 2);
    assert!(!level.player().being.moving);
    assert_eq!(level.interact(), Interaction::Unavailable, "mid-swing");
}

#[test]
fn chest_opens_into_an_item_that_can_be_picked_up_and_dropped() {
    let mut plan = arena_plan(5, 4, PLAYER_START, Pos { y: 3, x: 4 });
    let chest_pos = Pos { y: 2, x: 1 };
    let chest = add_chest(&mut plan, chest_pos, Item::Weapon { tier: 1, bonus: 2 });
    let mut level = level_from(plan, test_config());
    let base_damage = level.player().being.damage;

    let Interaction::OpenedChest { chest: opened, item } = level.interact() else {
        panic!("expected the chest to open");
    };
    assert_eq!(opened, chest);
    assert!(level.chests().is_empty());
    assert_eq!(level.grid().occupant(chest_pos), Some(Occupant::Item(item)));
    assert!(level.player().being.moving, "opening is not an attack");
    assert_eq!(level.verify_occupancy(), Ok(()));

    assert_eq!(level.interact(), Interaction::PickedUp(Item::Weapon { tier: 1, bonus: 2 }));
    assert!(level.items().is_empty());
    assert_eq!(level.grid().occupant(chest_pos), None);
    assert_eq!(level.player().being.damage, base_damage + 2);

    level.tick(Some(Command::DropItem), 0);
    assert_eq!(level.items().len(), 1);
    assert!(matches!(level.grid().occupant(chest_pos), Some(Occupant::Item(_))));
    assert_eq!(level.player().being.damage, base_damage);
    assert!(level.player().inventory.active().is_none());
    assert_eq!(level.verify_occupancy(), Ok(()));
}

#[test]
fn full_slot_leaves_the_item_on_the_floor() {
    let mut plan = arena_plan(5, 4, PLAYER_START, Pos { y: 3, x: 4 });
    add_chest(&mut plan, Pos { y: 2, x: 1 }, Item::HealthPotion(2));
    add_chest(&mut plan, Pos { y: 1, x: 2 }, Item::DamagePotion(1));
    let mut level = level_from(plan, test_config());

    assert!(matches!(level.interact(), Interaction::OpenedChest { .. }));
    assert_eq!(level.interact(), Interaction::PickedUp(Item::HealthPotion(2)));

    level.tick(Some(Command::Move(Direction::East)), 0);
    assert!(matches!(level.interact(), Interaction::OpenedChest { .. }));
    assert_eq!(level.interact(), Interaction::SlotOccupied);
    assert_eq!(level.items().len(), 1);

    level.tick(Some(Command::SelectSlot(1)), 0);
    assert_eq!(level.interact(), Interaction::PickedUp(Item::DamagePotion(1)));
    assert_eq!(level.verify_occupancy(), Ok(()));
}

#[test]
fn dropping_needs_an_item_and_an_open_facing_tile() {
    let plan = arena_plan(5, 4, PLAYER_START, Pos { y: 3, x: 4 });
    let mut empty_handed = level_from(plan, test_config());
    assert!(!empty_handed.drop_item());
    assert!(empty_handed.items().is_empty());

    let mut plan = arena_plan(5, 4, PLAYER_START, Pos { y: 2, x: 1 });
    add_chest(&mut plan, Pos { y: 1, x: 2 }, Item::LuckPotion(0.2));
    let mut level = level_from(plan, test_config());
    level.tick(Some(Command::Move(Direction::East)), 0);
    level.interact();
    level.interact();
    assert!(level.player().inventory.active().is_some());

    level.tick(Some(Command::Move(Direction::South)), 0);
    assert_eq!(level.player().being.pos, PLAYER_START, "the exit blocks the step");
    assert!(!level.drop_item(), "the exit occupies the facing tile");

    level.tick(Some(Command::Move(Direction::North)), 0);
    assert_eq!(level.player().being.pos, Pos { y: 0, x: 1 });
    assert!(!level.drop_item(), "facing off the map");
    assert!(level.player().inventory.active().is_some());

    level.tick(Some(Command::Move(Direction::East)), 0);
    assert!(level.drop_item());
    assert!(matches!(level.grid().occupant(Pos { y: 0, x: 3 }), Some(Occupant::Item(_))));
    assert_eq!(level.verify_occupancy(), Ok(()));
}

#[test]
fn interacting_with_the_exit_completes_the_level() {
    let plan = arena_plan(5, 4, PLAYER_START, Pos { y: 2, x: 1 });
    let mut level = level_from(plan, test_config());
    assert_eq!(level.tick(Some(Command::Interact), 16), TickOutcome::LevelComplete);
}

#[test]
fn swing_locks_movement_for_one_attack_cycle() {
    let plan = arena_plan(6, 4, PLAYER_START, Pos { y: 3, x: 5 });
    let mut level = level_from(plan, test_config());
    let cycle = level.config().player_attack_cycle();

    level.tick(Some(Command::Interact), 0);
    assert!(!level.player().being.moving);
    level.tick(Some(Command::Move(Direction::East)), 0);
    assert_eq!(level.player().being.pos, PLAYER_START);
    for _ in 3..cycle {
        level.tick(None, 0);
    }
    assert!(!level.player().being.moving);
    level.tick(None, 0);
    assert!(level.player().being.moving);

    level.tick(Some(Command::Move(Direction::East)), 0);
    assert_eq!(level.player().being.pos, Pos { y: 1, x: 2 });
    assert!(!level.player().moved_again, "cleared at the end of the tick");
}

#[test]
fn enemy_closes_in_on_the_cadence_and_strikes_once_per_cycle() {
    let mut plan = arena_plan(10, 3, PLAYER_START, Pos { y: 0, x: 0 });
    let enemy = add_enemy(&mut plan, Pos { y: 1, x: 6 }, 5, 1);
    let mut level = level_from(plan, test_config());
    let health = level.player().being.health;

    level.tick(None, 1_000);
    assert_eq!(level.enemies()[enemy].being.pos, Pos { y: 1, x: 6 }, "cadence not yet due");
    for expected_x in [5, 4, 3, 2] {
        level.tick(None, 1_000);
        assert_eq!(level.enemies()[enemy].being.pos, Pos { y: 1, x: expected_x });
    }
    level.tick(None, 1_000);
    assert!(!level.enemies()[enemy].being.moving, "turned to attack");
    assert_eq!(level.enemies()[enemy].being.direction, PLAYER_START);
    assert_eq!(level.player().being.health, health);

    level.tick(None, 40);
    assert_eq!(level.player().being.health, health - 1);
    let cycle = level.config().enemy_attack_cycle();
    for _ in 2..cycle {
        level.tick(None, 40);
    }
    assert_eq!(level.player().being.health, health - 1, "one hit per cycle");
    level.tick(None, 40);
    assert_eq!(level.player().being.health, health - 2);
    assert_eq!(level.verify_occupancy(), Ok(()));
}

#[test]
fn dead_player_ignores_input_until_game_over() {
    let mut config = test_config();
    config.player.health = 1;
    let mut plan = arena_plan(5, 3, PLAYER_START, Pos { y: 0, x: 4 });
    add_enemy(&mut plan, Pos { y: 1, x: 2 }, 5, 1);
    let mut level = level_from(plan, config);

    let mut outcomes = Vec::new();
    for _ in 0..10 {
        outcomes.push(level.tick(None, 1_000));
        if level.player().being.is_dead() {
            break;
        }
    }
    assert!(level.player().being.is_dead());
    assert!(outcomes.iter().all(|outcome| *outcome == TickOutcome::Continue));
    let dead_at = level.player().being.pos;

    let mut ticks = 0;
    while level.tick(Some(Command::Move(Direction::North)), 1_000) != TickOutcome::GameOver {
        ticks += 1;
        assert!(ticks < 5, "death delay never elapsed");
    }
    assert_eq!(level.player().being.pos, dead_at);
}

#[test]
fn occupancy_check_reports_dangling_and_unmarked_tiles() {
    let plan = arena_plan(5, 4, PLAYER_START, Pos { y: 3, x: 4 });
    let mut level = level_from(plan, test_config());

    let stray = Pos { y: 0, x: 3 };
    assert!(level.grid.place(stray, Occupant::Exit));
    assert_eq!(
        level.verify_occupancy(),
        Err(OccupancyError::Dangling { pos: stray, occupant: Occupant::Exit })
    );
    level.grid.vacate(stray);

    level.grid.vacate(PLAYER_START);
    assert_eq!(
        level.verify_occupancy(),
        Err(OccupancyError::Unmarked { pos: PLAYER_START, entity: "player" })
    );
}

#[test]
fn snapshot_and_ascii_show_the_same_level() {
    let mut plan = arena_plan(5, 3, PLAYER_START, Pos { y: 2, x: 4 });
    add_chest(&mut plan, Pos { y: 0, x: 0 }, Item::HealthPotion(1));
    let level = level_from(plan, test_config());

    let snapshot = level.snapshot();
    assert_eq!(snapshot.tiles.len(), 15);
    assert_eq!(snapshot.tiles.iter().filter(|tile| tile.is_occupied).count(), 3);
    assert_eq!(snapshot.chests.len(), 1);
    let json = serde_json::to_value(&snapshot).expect("snapshot serializes");
    assert_eq!(json["exit"]["pos"]["x"], 4);

    // open_grid never runs the visibility pass, so every unoccupied tile is hidden
    assert_eq!(level.render_ascii(), "C    \n @   \n    >\n");
}

#[test]
fn generated_level_is_consistent() {
    let config = test_config();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let settings = LevelSettings::for_level(12);
    let level = Level::generate(&settings, Player::new(&config), config, &mut rng)
        .expect("level generates");
    assert_eq!(level.number(), 12);
    assert_eq!(level.player().being.pos, level.rooms()[0].centre());
    assert_ne!(level.player().being.pos, level.exit().pos);
    assert_eq!(level.verify_occupancy(), Ok(()));
}
