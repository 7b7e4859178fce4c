use thiserror::Error;

use crate::CellIndex;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board has not been generated yet")]
    NotGenerated,
    #[error("Tile index out of range")]
    OutOfRange,
    #[error("Swap target is not adjacent")]
    NotAdjacent,
    #[error("Board is locked while a swap is in progress")]
    Locked,
    #[error("Could not break up the run through tile {index}")]
    GenerationStalled { index: CellIndex },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown tile category {0:?}")]
    InvalidCategory(char),
    #[error("Ran out of tile ids")]
    IdsExhausted,
    #[error("Board snapshot is inconsistent")]
    InvalidSnapshot,
}

pub type Result<T> = core::result::Result<T, GameError>;
