use thiserror::Error;

use crate::types::{Occupant, Pos};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("invalid dungeon configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("placed only {placed} room(s) after {attempts} candidates; at least two are required")]
    RoomPlacementExhausted { placed: usize, attempts: usize },
}

impl GenerationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GenerationError::InvalidConfiguration { reason: reason.into() }
    }
}

/// Disagreement between tile occupancy and the entity collections of a level.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyError {
    #[error("tile {pos:?} refers to {occupant:?}, which does not stand there")]
    Dangling { pos: Pos, occupant: Occupant },

    #[error("{entity} at {pos:?} is not recorded on its tile")]
    Unmarked { pos: Pos, entity: &'static str },
}
