use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {coords:?} are outside of the {size:?} board")]
    OutOfRange { coords: Coord2, size: Coord2 },
    #[error("Invalid game configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines, requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
