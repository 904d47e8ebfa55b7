use thiserror::Error;

use crate::{CardCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimension must be positive and even, got {0}")]
    InvalidDimension(Coord),
    #[error("Board needs {needed} distinct images but the pool only has {available}")]
    PoolTooSmall {
        needed: CardCount,
        available: CardCount,
    },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
