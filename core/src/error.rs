use alloc::string::String;
use thiserror::Error;

use crate::{Affiliation, CellRef};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cell {0} is outside the sheet")]
    InvalidCell(CellRef),
    #[error("Invalid cell name, expected A1 notation")]
    InvalidCellName,
    #[error("Invalid color, expected #rrggbb")]
    InvalidColor,
    #[error("Board size is not supported")]
    InvalidBoardShape,
    #[error("Palette gives {0:?} and {1:?} the same color")]
    InvalidPalette(Affiliation, Affiliation),
    #[error("Card step {0:?} makes cards overlap their reveal marks")]
    InvalidLayout((u32, u32)),
    #[error("Too many cards: {required} needed but the board only has {available}")]
    TooManyCards { required: usize, available: usize },
    #[error("Word pool too small: {required} words needed, {available} available")]
    PoolTooSmall { required: usize, available: usize },
    #[error("Missing resource: {0}")]
    MissingResource(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
