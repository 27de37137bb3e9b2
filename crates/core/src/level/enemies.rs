//! Enemy decisions, strikes on the player, and despawning of the dead.

use log::trace;

use crate::types::{EnemyId, Occupant};

use super::Level;

impl Level {
    pub(super) fn resolve_enemies(&mut self, elapsed_ms: u64) {
        let cadence_ready = self.enemy_move_timer_ms >= self.config.enemy_move_interval_ms;
        let attack_cycle = self.config.enemy_attack_cycle();
        let player_pos = self.player.being.pos;
        let mut any_moved = false;

        let ids: Vec<EnemyId> = self.enemies.keys().collect();
        for id in ids {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };
            if enemy.being.is_dead() {
                continue;
            }
            let in_range = enemy.check_distance(
                &self.grid,
                player_pos,
                self.player.moved_again,
                self.config.attack_distance,
            );
            if in_range && cadence_ready && enemy.being.moving {
                enemy.take_path_step(&mut self.grid);
                any_moved = true;
            } else if !enemy.being.moving {
                enemy.advance_attack(attack_cycle);
                if self.grid.occupant(enemy.being.direction) == Some(Occupant::Player)
                    && !enemy.attacked_player
                    && !self.player.being.is_dead()
                {
                    enemy.strike(&mut self.player);
                }
            }
        }

        self.despawn_dead(elapsed_ms);

        if any_moved {
            self.enemy_move_timer_ms = 0;
        }
        self.enemy_move_timer_ms = self.enemy_move_timer_ms.saturating_add(elapsed_ms);
    }

    fn despawn_dead(&mut self, elapsed_ms: u64) {
        let threshold = self.config.enemy_despawn_ms;
        let expired: Vec<EnemyId> = self
            .enemies
            .iter_mut()
            .filter(|(_, enemy)| enemy.being.is_dead())
            .filter_map(|(id, enemy)| {
                enemy.being.tick_dead_timer(elapsed_ms, threshold).then_some(id)
            })
            .collect();
        for id in expired {
            if let Some(enemy) = self.enemies.remove(id) {
                self.grid.vacate(enemy.being.pos);
                trace!("despawned enemy at {:?}", enemy.being.pos);
            }
        }
    }
}
