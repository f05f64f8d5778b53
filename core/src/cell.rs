use serde::{Deserialize, Serialize};

/// Full state of one board cell, owned by the [`Board`](crate::Board).
///
/// `adjacent_mines` is meaningless for mine cells and always zero there.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Whether a reveal may act on this cell.
    pub const fn is_revealable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}

/// What the presentation layer should draw for a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine shown once the game is over; `detonated` marks the one that was stepped on.
    Mine { detonated: bool },
}
