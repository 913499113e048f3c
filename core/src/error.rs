use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

/// Which configuration bound a rejected [`GameConfig`](crate::GameConfig) broke.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("width {value} is outside {min}..={max}")]
    Width { value: Coord, min: Coord, max: Coord },
    #[error("height {value} is outside {min}..={max}")]
    Height { value: Coord, min: Coord, max: Coord },
    #[error("mine count {value} is outside {min}..={max}")]
    Mines {
        value: CellCount,
        min: CellCount,
        max: CellCount,
    },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    #[error("Coordinates {coords:?} are outside a board of size {size:?}")]
    OutOfBounds { coords: Coord2, size: Coord2 },
    #[error("No game in progress")]
    NoActiveGame,
    #[error("No previous configuration to restart from")]
    NoPriorConfiguration,
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Generated mine layout does not match the configuration")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
