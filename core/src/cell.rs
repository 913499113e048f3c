use serde::{Deserialize, Serialize};

use crate::*;

/// Largest adjacency count a cell can have in a Moore neighbourhood.
pub const MAX_ADJACENT: u8 = 8;

/// Secret contents of a cell, independent of whether the player has seen it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContents {
    Mine,
    Clear(u8),
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(CellContents),
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    revealed: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn new() -> Self {
        Self {
            has_mine: false,
            revealed: false,
            adjacent_mines: 0,
        }
    }

    /// Placement calls this once per cell; the board never places twice.
    pub fn place_mine(&mut self) {
        self.has_mine = true;
    }

    pub fn set_adjacent_count(&mut self, count: u8) -> Result<()> {
        if count > MAX_ADJACENT {
            return Err(GameError::InvalidArgument("adjacent count must be within 0..=8"));
        }
        if self.has_mine {
            return Err(GameError::InvalidArgument("mine cells carry no adjacent count"));
        }
        self.adjacent_mines = count;
        Ok(())
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub const fn is_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn adjacent_count(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn contents(&self) -> CellContents {
        if self.has_mine {
            CellContents::Mine
        } else {
            CellContents::Clear(self.adjacent_mines)
        }
    }

    pub const fn view(&self) -> CellView {
        if self.revealed {
            CellView::Revealed(self.contents())
        } else {
            CellView::Hidden
        }
    }

    /// Hidden, safe, and surrounded by no mines: the seed of a cascade.
    pub(crate) const fn is_hidden_zero(&self) -> bool {
        !self.revealed && !self.has_mine && self.adjacent_mines == 0
    }
}
