use serde::{Deserialize, Serialize};

/// One grid position as stored by the board.
///
/// Mine and adjacency data are only reachable through a seeded
/// [`Board`](crate::Board), so an unseeded board can never leak a bogus count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_opened: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_opened(self) -> bool {
        self.is_opened
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Closed and unflagged, the only state normal reveal and cascade act on.
    pub const fn is_openable(self) -> bool {
        !self.is_opened && !self.is_flagged
    }
}

/// Player-visible state of a cell, what a renderer draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Opened(u8),
    /// Unflagged mine shown after a loss.
    Mine,
    /// Mine opened by the player.
    TriggeredMine,
    /// Flag on a safe cell, shown after a loss.
    IncorrectFlag,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Opened(_) => false,
            Mine => false,
            TriggeredMine => false,
            IncorrectFlag => true,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
