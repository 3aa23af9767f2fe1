use std::collections::BTreeSet;

use crate::{Board, CellCount};

pub use random::*;

mod random;

/// Mine placement strategy.
///
/// Placement runs against a freshly empty board and happens once per
/// session, deferred to the first click so the forbidden neighborhood is
/// known. Implementations must recount adjacency before returning.
pub trait MineGenerator {
    /// Places up to `mines` mines on `board`, never inside `forbidden`
    /// (linear indices).
    fn place(&mut self, board: &mut Board, mines: CellCount, forbidden: &BTreeSet<CellCount>);
}

/// Places mines at a fixed list of positions, ignoring the forbidden set.
/// Intended for deterministic replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<crate::Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: Vec<crate::Coord2>) -> Self {
        Self { mines }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place(&mut self, board: &mut Board, _mines: CellCount, _forbidden: &BTreeSet<CellCount>) {
        for &coords in &self.mines {
            if board.in_bounds(coords) {
                board[coords].is_mine = true;
            }
        }
        board.recount_adjacency();
    }
}
