//! Shared state machine for anything with health: moving, attacking, dead.

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Direction, Facing, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BeingState {
    Moving,
    Attacking,
    Dead,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Being {
    pub pos: Pos,
    pub health: i32,
    pub damage: i32,
    /// Tile the being is facing; interactions and attacks target it.
    pub direction: Pos,
    pub facing: Facing,
    pub moving: bool,
    dead: bool,
    attack_count: usize,
    dead_timer_ms: u64,
}

impl Being {
    pub fn new(pos: Pos, health: i32, damage: i32, facing: Facing) -> Self {
        Self {
            pos,
            health,
            damage,
            direction: pos.offset(0, 1),
            facing,
            moving: true,
            dead: health <= 0,
            attack_count: 0,
            dead_timer_ms: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn state(&self) -> BeingState {
        if self.dead {
            BeingState::Dead
        } else if self.moving {
            BeingState::Moving
        } else {
            BeingState::Attacking
        }
    }

    /// Steps one tile if the target is unblocked and unoccupied. The faced tile and sprite
    /// update even when the step fails. Dead beings do nothing.
    pub fn step(&mut self, grid: &mut Grid, direction: Direction) -> bool {
        if self.dead {
            return false;
        }
        let (dx, dy) = direction.delta();
        self.facing = Facing::from(direction);
        let target = self.pos.offset(dx, dy);
        let moved = grid.relocate(self.pos, target);
        if moved {
            self.pos = target;
        }
        self.direction = self.pos.offset(dx, dy);
        moved
    }

    pub fn start_attack(&mut self) {
        self.moving = false;
    }

    /// Advances the attack animation one tick. A cycle spans `cycle_len` ticks; on the tick
    /// that would run past it the counter resets, the being returns to moving, and this
    /// returns true.
    pub fn advance_attack(&mut self, cycle_len: usize) -> bool {
        if self.attack_count + 1 >= cycle_len {
            self.attack_count = 0;
            self.moving = true;
            true
        } else {
            self.attack_count += 1;
            false
        }
    }

    /// Applies incoming damage. Returns true if the being is dead afterwards.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        if self.health <= 0 {
            self.dead = true;
        }
        self.dead
    }

    /// Accumulates time spent dead. Returns true once `threshold_ms` has been reached.
    pub fn tick_dead_timer(&mut self, elapsed_ms: u64, threshold_ms: u64) -> bool {
        self.dead_timer_ms = self.dead_timer_ms.saturating_add(elapsed_ms);
        self.dead_timer_ms >= threshold_ms
    }
}
