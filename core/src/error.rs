use thiserror::Error;

use crate::BuildIssue;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match 6x6")]
    InvalidBoardShape,
    #[error("Level needs a positive move limit and timer")]
    InvalidLevel,
    #[error("Please test and complete your level first!")]
    NotVerified,
    #[error("Please enter your name!")]
    EmptyPlayerName,
    #[error("Level has not been completed")]
    NotWon,
    #[error("Level cannot be tested yet: {0}")]
    NotPlayable(BuildIssue),
    #[error("A playtest is running")]
    Testing,
}

pub type Result<T> = core::result::Result<T, GameError>;
