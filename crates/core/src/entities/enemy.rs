//! Enemy pursuit: flank selection, cached routes, and one-step advancement.

use log::trace;
use serde::Serialize;

use crate::grid::Grid;
use crate::pathfinding::find_path;
use crate::types::{Direction, Facing, Occupant, Pos};

use super::being::Being;
use super::player::Player;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Enemy {
    pub being: Being,
    route: Vec<Pos>,
    target: Option<Pos>,
    /// Set when this attack cycle has already landed a hit.
    pub attacked_player: bool,
}

impl Enemy {
    pub fn new(pos: Pos, health: i32, damage: i32, facing: Facing) -> Self {
        Self {
            being: Being::new(pos, health, damage, facing),
            route: Vec::new(),
            target: None,
            attacked_player: false,
        }
    }

    /// Cached route, starting at the enemy's own tile when non-empty.
    pub fn route(&self) -> &[Pos] {
        &self.route
    }

    pub fn target(&self) -> Option<Pos> {
        self.target
    }

    /// Re-paths toward a flank of the player when the cached target is stale, then reports
    /// whether the player is within `attack_distance` by route length.
    ///
    /// The target is stale when the player moved this tick, when there is none yet, or when
    /// the target tile is now occupied. The nearer flank wins ties, left before right, and a
    /// flank the enemy already stands on is always acceptable. With no usable flank the
    /// cached route is kept and this returns false.
    pub fn check_distance(
        &mut self,
        grid: &Grid,
        player_pos: Pos,
        player_moved_again: bool,
        attack_distance: usize,
    ) -> bool {
        let stale =
            player_moved_again || self.target.is_none_or(|target| grid.occupant(target).is_some());
        if stale {
            let here = self.being.pos;
            let left = player_pos.offset(-1, 0);
            let right = player_pos.offset(1, 0);
            let left_free = grid.is_walkable(left);
            let right_free = grid.is_walkable(right);

            let target = if (here.euclidean(left) <= here.euclidean(right) && left_free)
                || here == left
            {
                left
            } else if right_free || here == right {
                right
            } else if left_free {
                left
            } else {
                return false;
            };
            self.target = Some(target);
            self.route = find_path(grid, here, target);
            trace!("enemy at {here:?} re-pathed to {target:?}: {} steps", self.route.len());
        }
        self.route.len() + 1 <= attack_distance
    }

    /// Takes one step along the cached route, or turns to attack a player standing directly
    /// left or right once the route is used up.
    pub fn take_path_step(&mut self, grid: &mut Grid) {
        let here = self.being.pos;
        if self.route.len() > 1 && self.being.moving {
            let next = self.route[1];
            self.route.remove(0);
            let Some(direction) = Direction::from_delta(next.x - here.x, next.y - here.y) else {
                self.forget_route();
                return;
            };
            let previous_facing = self.being.facing;
            let moved = self.being.step(grid, direction);
            if matches!(direction, Direction::North | Direction::South) {
                self.being.facing = previous_facing;
            }
            if !moved {
                self.forget_route();
            }
            return;
        }

        let left = here.offset(-1, 0);
        let right = here.offset(1, 0);
        if grid.occupant(left) == Some(Occupant::Player) {
            self.face_and_attack(left, Facing::Left);
        } else if grid.occupant(right) == Some(Occupant::Player) {
            self.face_and_attack(right, Facing::Right);
        }
    }

    fn face_and_attack(&mut self, tile: Pos, facing: Facing) {
        self.being.facing = facing;
        self.being.direction = tile;
        self.being.start_attack();
    }

    fn forget_route(&mut self) {
        self.route.clear();
        self.target = None;
    }

    /// Advances the attack animation; completing a cycle re-arms the hit.
    pub fn advance_attack(&mut self, cycle_len: usize) -> bool {
        let completed = self.being.advance_attack(cycle_len);
        if completed {
            self.attacked_player = false;
        }
        completed
    }

    pub fn strike(&mut self, player: &mut Player) {
        self.attacked_player = true;
        player.being.take_damage(self.being.damage);
    }
}
