use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// How a [`Direction`] turns into a linear index offset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionMode {
    /// Reproduces the reference scene, where `Up`/`Down` both move one row towards
    /// index 0 and `Left`/`Right` both move one column towards index 0. Targets are
    /// only range checked, so a horizontal move may wrap into the previous row.
    Aliased,
    /// Every direction has its own offset and horizontal moves may not leave the row.
    #[default]
    Corrected,
}

impl DirectionMode {
    pub const fn delta(self, direction: Direction, width: Coord) -> i32 {
        use Direction::*;
        let row = width as i32;
        match (self, direction) {
            (Self::Aliased, Up | Down) => -row,
            (Self::Aliased, Left | Right) => -1,
            (Self::Corrected, Up) => -row,
            (Self::Corrected, Down) => row,
            (Self::Corrected, Left) => -1,
            (Self::Corrected, Right) => 1,
        }
    }
}

/// What happens once the swapped tiles have landed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPolicy {
    /// Always swap back, whatever the result. Matches the reference scene.
    #[default]
    AlwaysRevert,
    /// Keep the swap when it forms a run through either tile, otherwise swap back.
    /// Matched tiles are reported but not cleared.
    KeepMatches,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapPhase {
    SwappingOut,
    Validating,
    SwappingBack,
    Idle,
}

impl SwapPhase {
    pub const fn is_moving(self) -> bool {
        matches!(self, Self::SwappingOut | Self::SwappingBack)
    }
}

/// An accepted swap between the tile at `index` and the one at `target`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub index: CellIndex,
    pub target: CellIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// Both tiles are back where they started.
    Reverted,
    /// The swap stays applied; runs through the swapped tiles.
    Kept { runs: Vec<Run> },
}

/// What a single [`Board::tick`] did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SwapProgress {
    /// No swap in flight.
    Idle,
    /// Still animating or about to animate in the given phase.
    Moving(SwapPhase),
    /// The tiles landed and the logical swap was applied.
    Committed(SwapRequest),
    /// The sequence is over and the board is unlocked again.
    Finished(SwapOutcome),
}

impl SwapProgress {
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// State of an in-flight swap, re-entered once per tick until it reaches `Idle`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwapSequence {
    request: SwapRequest,
    phase: SwapPhase,
    applied: bool,
    ticks: u32,
    motions: Vec<Motion>,
}

impl SwapSequence {
    pub(crate) fn new(request: SwapRequest, motions: Vec<Motion>) -> Self {
        Self {
            request,
            phase: SwapPhase::SwappingOut,
            applied: false,
            ticks: 0,
            motions,
        }
    }

    pub fn request(&self) -> SwapRequest {
        self.request
    }

    pub fn phase(&self) -> SwapPhase {
        self.phase
    }

    /// Whether the logical swap is currently applied to the board.
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    pub(crate) fn enter(&mut self, phase: SwapPhase, motions: Vec<Motion>) {
        log::trace!("Swap {:?} enters {:?}", self.request, phase);
        self.phase = phase;
        self.ticks = 0;
        self.motions = motions;
    }

    pub(crate) fn toggle_applied(&mut self) {
        self.applied = !self.applied;
    }

    /// Advances the motions by one tick. Past `max_ticks` the motions are snapped to
    /// their targets so a stuck animation cannot hold the lock forever.
    pub(crate) fn animate(&mut self, animator: &mut impl Animator, dt: f32, max_ticks: u32) -> bool {
        self.ticks = self.ticks.saturating_add(1);
        if animator.step(&mut self.motions, dt) {
            return true;
        }
        if self.ticks >= max_ticks {
            log::warn!(
                "Swap {:?} did not converge after {} ticks in {:?}, snapping into place",
                self.request,
                self.ticks,
                self.phase
            );
            self.motions.iter_mut().for_each(Motion::settle);
            return true;
        }
        false
    }
}
