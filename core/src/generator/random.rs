use std::collections::BTreeSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Board, CellCount, MineGenerator};

/// Uniform random placement over linear indices, excluding the forbidden
/// set, by rejection sampling.
///
/// Rejection is cheap here: the forbidden set is at most 9 cells, small
/// against every preset board.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place(&mut self, board: &mut Board, mines: CellCount, forbidden: &BTreeSet<CellCount>) {
        let total = board.total_cells();
        let available = total.saturating_sub(forbidden.len() as CellCount);
        let actual = mines.min(available);
        if actual < mines {
            log::warn!(
                "requested {} mines but only {} cells are available, clamped",
                mines,
                available
            );
        }

        let mut placed = 0;
        while placed < actual {
            let index = self.rng.gen_range(0..total);
            if forbidden.contains(&index) {
                continue;
            }
            let coords = board.coords_at(index);
            if board[coords].is_mine {
                continue;
            }
            board[coords].is_mine = true;
            placed += 1;
        }

        board.recount_adjacency();
        log::debug!("placed {} mines on a {:?} board", placed, board.size());
    }
}
