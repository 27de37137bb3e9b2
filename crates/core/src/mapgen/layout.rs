//! Room placement and corridor carving for a fresh grid.

use log::trace;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::grid::Grid;
use crate::random::{choose, random_range};
use crate::types::Pos;

use super::params::DungeonParams;
use super::room::{Room, RoomRect};

/// Candidate rectangles sampled before placement gives up on reaching two rooms.
pub(super) const MAX_ROOM_CANDIDATES: usize = 4096;

/// Places rooms until `max_rooms + 1` candidates have been tried and at least two rooms exist.
///
/// Each accepted room after the first is tunnelled to an earlier one: the first room when the
/// new room is the third, otherwise a random earlier room.
pub(super) fn place_rooms(
    grid: &mut Grid,
    params: &DungeonParams,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Room>, GenerationError> {
    let (x_min, x_max) = params.x_range();
    let (y_min, y_max) = params.y_range();
    let mut rooms: Vec<Room> = Vec::new();
    let mut candidates = 0_usize;

    while candidates <= params.max_rooms || rooms.len() < 2 {
        if candidates >= MAX_ROOM_CANDIDATES {
            return Err(GenerationError::RoomPlacementExhausted {
                placed: rooms.len(),
                attempts: candidates,
            });
        }
        candidates += 1;

        let x = random_range(rng, x_min, x_max);
        let y = random_range(rng, y_min, y_max);
        let width = random_range(rng, params.min_room_width as i32, params.max_room_width as i32);
        let height =
            random_range(rng, params.min_room_height as i32, params.max_room_height as i32);
        let rect = RoomRect { x, y, width, height };

        if region_has_floor(grid, rect) {
            trace!("room candidate {rect:?} rejected: too close to an existing room");
            continue;
        }

        let room = Room::new(rect);
        grid.set_room(room.tiles());
        if let Some(target) = tunnel_target(&rooms, rng) {
            grid.carve_tunnel(room.centre(), target);
        }
        rooms.push(room);
    }

    Ok(rooms)
}

fn tunnel_target(rooms: &[Room], rng: &mut ChaCha8Rng) -> Option<Pos> {
    if rooms.len() == 2 {
        return rooms.first().map(Room::centre);
    }
    choose(rng, rooms).map(Room::centre)
}

/// Checks the candidate plus one tile above and left and two tiles below and right.
fn region_has_floor(grid: &Grid, rect: RoomRect) -> bool {
    ((rect.x - 1)..=(rect.x + rect.width + 1)).any(|x| {
        ((rect.y - 1)..=(rect.y + rect.height + 1))
            .any(|y| grid.tile(Pos { y, x }).is_some_and(|tile| tile.is_floor))
    })
}
