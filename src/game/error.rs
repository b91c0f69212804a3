//! Game error types.
//!
//! All errors are recoverable at the session level: a rejected move leaves
//! the board, the turn, and the countdown timer untouched.

use thiserror::Error;

use crate::types::GamePhase;

/// Errors that can occur when applying a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The cell index is outside the 3x3 board.
    #[error("cell index out of range: {0}")]
    OutOfBounds(usize),

    /// The cell is already occupied.
    #[error("cell {0} is already taken")]
    CellTaken(usize),

    /// The round has already ended.
    #[error("the round is already over ({})", .0.as_str())]
    RoundOver(GamePhase),
}

impl GameError {
    /// Returns a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::OutOfBounds(_) => "マスは1-9で指定してください".to_string(),
            Self::CellTaken(_) => "そのマスは既に埋まっています".to_string(),
            Self::RoundOver(_) => {
                "このラウンドは終了しています。n で新しいゲームを始めてください".to_string()
            }
        }
    }
}
