use std::collections::{BTreeSet, VecDeque};
use std::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{neighbors_of, Cell, CellCount, Coord, Coord2, ToNdIndex};

/// A `rows x cols` grid of [`Cell`]s.
///
/// The board is owned wholesale by a game session and replaced, never
/// resized, on reset or difficulty change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Fresh all-safe board: no mines, zero adjacency, nothing revealed or
    /// flagged.
    pub fn empty(rows: Coord, cols: Coord) -> Self {
        Self {
            cells: Array2::default((rows as usize, cols as usize)),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine).count() as CellCount
    }

    pub fn neighbors(&self, center: Coord2) -> impl Iterator<Item = Coord2> {
        neighbors_of(self.size(), center)
    }

    /// Linear index of `coords` in row-major order.
    pub fn linear_index(&self, coords: Coord2) -> CellCount {
        let cols = self.size().1 as CellCount;
        (coords.0 as CellCount) * cols + (coords.1 as CellCount)
    }

    /// Inverse of [`Board::linear_index`].
    pub fn coords_at(&self, index: CellCount) -> Coord2 {
        let cols = self.size().1 as CellCount;
        ((index / cols) as Coord, (index % cols) as Coord)
    }

    /// Linear indices of `center` plus its in-bounds neighbors, the cells
    /// that must stay mine-free around a first click.
    pub fn forbidden_around(&self, center: Coord2) -> BTreeSet<CellCount> {
        let mut forbidden = BTreeSet::from([self.linear_index(center)]);
        forbidden.extend(self.neighbors(center).map(|pos| self.linear_index(pos)));
        forbidden
    }

    /// Recomputes `adjacent_mines` for every non-mine cell from the current
    /// mine layout. Must run once after mines are placed.
    pub fn recount_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                if self[(row, col)].is_mine {
                    continue;
                }
                let count = self
                    .neighbors((row, col))
                    .filter(|&pos| self[pos].is_mine)
                    .count() as u8;
                self[(row, col)].adjacent_mines = count;
            }
        }
    }

    /// Breadth-first reveal starting at `start`.
    ///
    /// Flagged cells are skipped and block propagation. Expansion continues
    /// only through zero-adjacency non-mine cells, so the revealed region is
    /// the contiguous zero area plus its numbered border.
    pub fn flood_reveal(&mut self, start: Coord2) {
        if self.cells.is_empty() || !self.in_bounds(start) {
            return;
        }

        let mut visited: Array2<bool> = Array2::default(self.cells.raw_dim());
        let mut queue = VecDeque::from([start]);
        log::trace!("flood reveal from {:?}", start);

        while let Some(coords) = queue.pop_front() {
            if visited[coords.to_nd_index()] {
                continue;
            }
            visited[coords.to_nd_index()] = true;

            if self[coords].is_flagged {
                log::trace!("flood blocked by flag at {:?}", coords);
                continue;
            }
            self[coords].is_revealed = true;

            if self[coords].adjacent_mines == 0 && !self[coords].is_mine {
                let next: Vec<Coord2> = self
                    .neighbors(coords)
                    .filter(|&pos| !visited[pos.to_nd_index()])
                    .collect();
                queue.extend(next);
            }
        }
    }

    /// Reveals every mine, and with `expose_misflags` also every flagged
    /// non-mine cell so the renderer can show the wrong guesses. Used on loss
    /// (with misflags) and cosmetically on win (without).
    pub fn reveal_all_mines(&mut self, expose_misflags: bool) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine || (expose_misflags && cell.is_flagged) {
                cell.is_revealed = true;
            }
        }
    }

    /// Win condition: every cell is a mine or revealed. An empty board is
    /// never won.
    pub fn is_cleared(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|cell| cell.is_cleared())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, col as usize)]
    }
}
