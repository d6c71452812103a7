//! Error types for the engine.
//!
//! Every error is local and non-fatal: an operation that returns `Err` has
//! left the session exactly as it found it.

use thiserror::Error;

use super::color::Color;
use super::player::PlayerId;

/// Why a mark was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("marks are not accepted in the current stage")]
    WrongStage,

    #[error("only the active player may use the colored dice")]
    NotActivePlayer,

    #[error("{number} is not on the {color} row")]
    OutOfRange { color: Color, number: u8 },

    #[error("the {0} row is locked")]
    RowLocked(Color),

    #[error("the {0} row has been closed by another player")]
    ColorClosed(Color),

    #[error("{number} cannot be made from the current dice for the {color} row")]
    NotFromDice { color: Color, number: u8 },

    #[error("{number} is already marked in the {color} row")]
    AlreadyMarked { color: Color, number: u8 },

    #[error("{number} lies behind {boundary}, the furthest mark in the {color} row")]
    BehindLockout { color: Color, number: u8, boundary: u8 },

    #[error("the {color} row needs {needed} marks before its last number (has {have})")]
    LockTooEarly { color: Color, have: usize, needed: usize },

    #[error("this dice combination has already been used this turn")]
    StageAlreadyUsed,
}

/// Errors returned by the public session operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The operation is not permitted in the current state or turn.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The mark failed validation.
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    /// The game has ended; nothing else is accepted.
    #[error("the game is over")]
    GameOver,

    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
}

impl GameError {
    pub(crate) fn state(reason: impl Into<String>) -> Self {
        GameError::InvalidState(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
