#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use matching::*;
pub use motion::*;
pub use swap::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod matching;
mod motion;
mod swap;
mod tile;
mod types;

/// Board size used by the reference scene.
pub const DEFAULT_SIZE: Coord2 = (6, 6);

/// Upper bound on rerolls spent on a single tile while breaking up runs.
pub const DEFAULT_MAX_REROLLS: u32 = 256;

/// Ten seconds worth of frames at 60 fps.
pub const DEFAULT_MAX_TICKS_PER_PHASE: u32 = 600;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub size: Coord2,
    pub direction_mode: DirectionMode,
    pub match_policy: MatchPolicy,
    pub max_rerolls: u32,
    pub max_ticks_per_phase: u32,
    pub swap_speed: f32,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self {
            size,
            direction_mode: DirectionMode::Corrected,
            match_policy: MatchPolicy::AlwaysRevert,
            max_rerolls: DEFAULT_MAX_REROLLS,
            max_ticks_per_phase: DEFAULT_MAX_TICKS_PER_PHASE,
            swap_speed: DEFAULT_SWAP_SPEED,
        }
    }

    pub fn new((size_x, size_y): Coord2) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        Self::new_unchecked((size_x, size_y))
    }

    pub const fn with_direction_mode(mut self, direction_mode: DirectionMode) -> Self {
        self.direction_mode = direction_mode;
        self
    }

    pub const fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_tiles(&self) -> CellIndex {
        mult(self.size.0, self.size.1)
    }

    /// Rejects configs that would describe an empty grid.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            Err(GameError::InvalidBoardShape)
        } else {
            Ok(())
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE)
    }
}
