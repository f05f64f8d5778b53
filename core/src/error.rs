use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Board dimensions exceed {max} cells per axis")]
    BoardTooLarge { max: Coord },
    #[error("Invalid coordinates ({row}, {col})")]
    InvalidCoords { row: Coord, col: Coord },
    #[error("Mine layout does not match the requested configuration")]
    LayoutMismatch,
    #[error("Malformed game configuration: {0}")]
    MalformedConfig(#[from] serde_json::Error),
}

impl GameError {
    /// Whether this error comes from an invalid board configuration rather than
    /// from a move on an existing board.
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::InvalidCoords { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
