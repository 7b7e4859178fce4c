use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Kind of animal shown on a tile. Runs are formed by tiles of equal category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Monkey,
    Panda,
    Penguin,
    Pig,
    Rabbit,
    Snake,
    Giraffe,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Monkey,
        Category::Panda,
        Category::Penguin,
        Category::Pig,
        Category::Rabbit,
        Category::Snake,
        Category::Giraffe,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in declaration order, which is also the sprite slot used by renderers.
    pub const fn sprite_index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        use Category::*;
        match self {
            Monkey => 'M',
            Panda => 'A',
            Penguin => 'N',
            Pig => 'I',
            Rabbit => 'R',
            Snake => 'S',
            Giraffe => 'G',
        }
    }

    pub fn from_char(c: char) -> Result<Self> {
        use Category::*;
        match c.to_ascii_uppercase() {
            'M' => Ok(Monkey),
            'A' => Ok(Panda),
            'N' => Ok(Penguin),
            'I' => Ok(Pig),
            'R' => Ok(Rabbit),
            'S' => Ok(Snake),
            'G' => Ok(Giraffe),
            _ => Err(GameError::InvalidCategory(c)),
        }
    }
}

/// Identity of a tile. Stays with the tile while it moves around the board, so a
/// renderer can keep its sprite bound to the same logical tile across swaps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    category: Category,
    index: CellIndex,
    x: Coord,
    y: Coord,
}

impl Tile {
    /// Places a tile and draws its initial category from `source`.
    pub fn new<S>(id: TileId, index: CellIndex, coords: Coord2, source: &mut S) -> Self
    where
        S: CategorySource + ?Sized,
    {
        Self::with_category(id, index, coords, source.next_category())
    }

    pub const fn with_category(
        id: TileId,
        index: CellIndex,
        (x, y): Coord2,
        category: Category,
    ) -> Self {
        Self {
            id,
            category,
            index,
            x,
            y,
        }
    }

    pub const fn id(&self) -> TileId {
        self.id
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    pub const fn index(&self) -> CellIndex {
        self.index
    }

    pub const fn x(&self) -> Coord {
        self.x
    }

    pub const fn y(&self) -> Coord {
        self.y
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Draws a fresh category; the current one may come up again.
    pub fn reroll_category<S>(&mut self, source: &mut S) -> Category
    where
        S: CategorySource + ?Sized,
    {
        self.category = source.next_category();
        self.category
    }

    /// Exchanges board positions with `other`. Category and identity stay put, so
    /// calling this twice restores both tiles.
    pub fn swap_position_with(&mut self, other: &mut Tile) {
        core::mem::swap(&mut self.index, &mut other.index);
        core::mem::swap(&mut self.x, &mut other.x);
        core::mem::swap(&mut self.y, &mut other.y);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile_{} (x:{},y:{})", self.index, self.x, self.y)
    }
}
