use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Bounds a board accepts for its dimensions and mine count.
///
/// The upper mine bound is not stored here: it is always derived from the
/// dimensions as `floor(height * width / 4)`, see [`GameConfig::max_mines`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLimits {
    pub min_height: Coord,
    pub max_height: Coord,
    pub min_width: Coord,
    pub max_width: Coord,
    pub min_mines: CellCount,
}

impl BoardLimits {
    pub const fn height_range(&self) -> RangeInclusive<Coord> {
        self.min_height..=self.max_height
    }

    pub const fn width_range(&self) -> RangeInclusive<Coord> {
        self.min_width..=self.max_width
    }

    /// Allowed mine counts for a board of the given dimensions.
    pub const fn mine_range(&self, (height, width): Coord2) -> RangeInclusive<CellCount> {
        self.min_mines..=GameConfig::new((height, width), 0).max_mines()
    }
}

impl Default for BoardLimits {
    fn default() -> Self {
        Self {
            min_height: 8,
            max_height: 26,
            min_width: 8,
            max_width: 60,
            min_mines: 10,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// At most a quarter of the board may hold mines.
    pub const fn max_mines(&self) -> CellCount {
        self.total_cells() / 4
    }

    /// Checks every bound in `limits`, reporting the first one broken.
    pub fn validate(self, limits: &BoardLimits) -> Result<Self> {
        let (height, width) = self.size;
        if !limits.width_range().contains(&width) {
            return Err(ConfigIssue::Width {
                value: width,
                min: limits.min_width,
                max: limits.max_width,
            }
            .into());
        }
        if !limits.height_range().contains(&height) {
            return Err(ConfigIssue::Height {
                value: height,
                min: limits.min_height,
                max: limits.max_height,
            }
            .into());
        }
        let mine_range = limits.mine_range(self.size);
        if !mine_range.contains(&self.mines) {
            return Err(ConfigIssue::Mines {
                value: self.mines,
                min: *mine_range.start(),
                max: *mine_range.end(),
            }
            .into());
        }
        Ok(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new((8, 8), 10)
    }
}

/// Result of a single guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The cell was already visible, nothing changed.
    AlreadyGuessed,
    /// A mine was correctly identified and the round continues.
    MineFound,
    /// Safe cells that became visible, including the guessed one.
    Revealed(BTreeSet<Coord2>),
    Won,
    Lost,
}

impl GuessOutcome {
    pub const fn has_update(&self) -> bool {
        use GuessOutcome::*;
        match self {
            AlreadyGuessed => false,
            MineFound => true,
            Revealed(_) => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn ends_round(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
