/// Single coordinate axis used for board width, height, and tile positions.
pub type Coord = u8;

/// Linear tile index in row-major order, also used for tile counts.
pub type CellIndex = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Tiles are stored with shape `(height, width)` so the flat slice order matches the
/// linear index, hence `(x, y)` maps to `[y, x]`.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellIndex {
    let a = a as CellIndex;
    let b = b as CellIndex;
    a.saturating_mul(b)
}

/// `x = index % width`, `y = index / width`.
pub const fn coords_of(index: CellIndex, width: Coord) -> Coord2 {
    let width = width as CellIndex;
    ((index % width) as Coord, (index / width) as Coord)
}

pub const fn index_of((x, y): Coord2, width: Coord) -> CellIndex {
    (y as CellIndex) * (width as CellIndex) + (x as CellIndex)
}
