/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag counts, and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row/column displacements of the 8-neighborhood.
pub(crate) const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bounds 8-neighborhood of `center` inside a `bounds.0 x bounds.1` grid.
///
/// Out-of-bounds positions are dropped silently, so corners yield 3 items and
/// edges 5.
pub(crate) fn neighbors_of(bounds: Coord2, center: Coord2) -> impl Iterator<Item = Coord2> {
    let (rows, cols) = bounds;
    let (row, col) = (i16::from(center.0), i16::from(center.1));

    DISPLACEMENTS.iter().filter_map(move |&(dr, dc)| {
        let (nr, nc) = (row + dr, col + dc);
        if nr < 0 || nc < 0 || nr >= i16::from(rows) || nc >= i16::from(cols) {
            None
        } else {
            Some((nr as Coord, nc as Coord))
        }
    })
}
