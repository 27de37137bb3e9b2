//! Generation parameters and their up-front validation.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Margin kept between a room's top-left sampling range and the grid edge.
pub(super) const EDGE_MARGIN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonParams {
    pub max_rooms: usize,
    pub width: usize,
    pub height: usize,
    pub min_room_width: usize,
    pub max_room_width: usize,
    pub min_room_height: usize,
    pub max_room_height: usize,
}

impl DungeonParams {
    /// Rejects parameters that would leave an empty sampling range. Runs before any grid exists.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.min_room_width == 0 || self.min_room_height == 0 {
            return Err(GenerationError::invalid("room dimensions must be at least 1"));
        }
        if self.min_room_width > self.max_room_width {
            return Err(GenerationError::invalid(format!(
                "min room width {} exceeds max room width {}",
                self.min_room_width, self.max_room_width
            )));
        }
        if self.min_room_height > self.max_room_height {
            return Err(GenerationError::invalid(format!(
                "min room height {} exceeds max room height {}",
                self.min_room_height, self.max_room_height
            )));
        }
        if self.width < self.max_room_width + 2 * EDGE_MARGIN {
            return Err(GenerationError::invalid(format!(
                "width {} cannot hold rooms up to {} wide with a {EDGE_MARGIN}-tile margin",
                self.width, self.max_room_width
            )));
        }
        if self.height < self.max_room_height + 2 * EDGE_MARGIN {
            return Err(GenerationError::invalid(format!(
                "height {} cannot hold rooms up to {} tall with a {EDGE_MARGIN}-tile margin",
                self.height, self.max_room_height
            )));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(GenerationError::invalid("grid dimensions exceed coordinate range"));
        }
        Ok(())
    }

    /// Inclusive range for a room's left column.
    pub(super) fn x_range(&self) -> (i32, i32) {
        (EDGE_MARGIN as i32, (self.width - self.max_room_width - EDGE_MARGIN) as i32)
    }

    /// Inclusive range for a room's top row.
    pub(super) fn y_range(&self) -> (i32, i32) {
        (EDGE_MARGIN as i32, (self.height - self.max_room_height - EDGE_MARGIN) as i32)
    }
}
