use serde::{Deserialize, Serialize};

/// One grid position as seen by the engine and the renderer.
///
/// A flagged cell cannot be revealed by direct interaction; the flag bit is
/// not cleared on reveal, so a cell revealed by the lose-all sweep may still
/// carry its (incorrect) flag for the renderer to expose.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub is_revealed: bool,
    pub is_flagged: bool,
}

impl Cell {
    /// Whether a left-click may open this cell.
    pub const fn can_reveal(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Whether this cell counts towards the win condition.
    pub const fn is_cleared(self) -> bool {
        self.is_mine || self.is_revealed
    }
}
