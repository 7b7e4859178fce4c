use alloc::vec::Vec;
use core::ops::Range;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// Shortest run that counts as a match.
pub const MATCH_LENGTH: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];
}

/// Contiguous tiles of one category along a row or a column, in lane order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub orientation: Orientation,
    pub category: Category,
    pub indices: Vec<CellIndex>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_match(&self) -> bool {
        self.len() >= MATCH_LENGTH
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.indices.contains(&index)
    }
}

/// Scans every start position of `lane` and returns the longest block that covers
/// `position`. Each block extends from its start while the category of the start
/// tile repeats, so the tile itself is always a block of length one.
pub(crate) fn longest_block_through(lane: &[Category], position: usize) -> Range<usize> {
    let mut best = position..position + 1;
    for start in 0..lane.len() {
        let category = lane[start];
        let end = start + lane[start..].iter().take_while(|&&c| c == category).count();
        if (start..end).contains(&position) && end - start > best.len() {
            best = start..end;
        }
    }
    best
}

/// Splits `lane` into its maximal blocks of equal category.
pub(crate) fn maximal_blocks(lane: &[Category]) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut start = 0;
    while start < lane.len() {
        let category = lane[start];
        let end = start + lane[start..].iter().take_while(|&&c| c == category).count();
        blocks.push(start..end);
        start = end;
    }
    blocks
}

fn lane_of(tiles: &Array2<Tile>, (x, y): Coord2, orientation: Orientation) -> ArrayView1<'_, Tile> {
    match orientation {
        Orientation::Horizontal => tiles.row(y.into()),
        Orientation::Vertical => tiles.column(x.into()),
    }
}

fn run_from_lane(lane: &ArrayView1<'_, Tile>, block: Range<usize>, orientation: Orientation) -> Run {
    let indices: Vec<CellIndex> = lane
        .iter()
        .skip(block.start)
        .take(block.len())
        .map(Tile::index)
        .collect();
    Run {
        orientation,
        category: lane[block.start].category(),
        indices,
    }
}

/// Longest run through the tile at `coords` along `orientation`.
pub(crate) fn run_through(tiles: &Array2<Tile>, coords: Coord2, orientation: Orientation) -> Run {
    let lane = lane_of(tiles, coords, orientation);
    let position = match orientation {
        Orientation::Horizontal => coords.0,
        Orientation::Vertical => coords.1,
    };
    let categories: Vec<Category> = lane.iter().map(Tile::category).collect();
    let block = longest_block_through(&categories, position.into());
    run_from_lane(&lane, block, orientation)
}

/// Every maximal run of at least [`MATCH_LENGTH`] tiles, rows first, then columns.
pub(crate) fn all_matches(tiles: &Array2<Tile>) -> Vec<Run> {
    let mut runs = Vec::new();
    let lanes = tiles
        .rows()
        .into_iter()
        .map(|lane| (lane, Orientation::Horizontal))
        .chain(
            tiles
                .columns()
                .into_iter()
                .map(|lane| (lane, Orientation::Vertical)),
        );
    for (lane, orientation) in lanes {
        let categories: Vec<Category> = lane.iter().map(Tile::category).collect();
        runs.extend(
            maximal_blocks(&categories)
                .into_iter()
                .filter(|block| block.len() >= MATCH_LENGTH)
                .map(|block| run_from_lane(&lane, block, orientation)),
        );
    }
    runs
}
