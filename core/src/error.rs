use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Too many mines: requested {requested}, board fits at most {max}")]
    TooManyMines {
        requested: CellCount,
        max: CellCount,
    },
    #[error("Coordinates {coords:?} are outside a board of size {size:?}")]
    OutOfBounds { coords: Coord2, size: Coord2 },
}

pub type Result<T> = core::result::Result<T, GameError>;
