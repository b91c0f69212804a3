//! Game module for the tic-tac-toe game.
//!
//! This module contains the round logic:
//! - `board`: the 3x3 board with win and draw detection
//! - `engine`: turn coordination between moves, timeouts and the timer
//! - `error`: move rejection errors

pub mod board;
pub mod engine;
pub mod error;

pub use board::{Board, WIN_LINES};
pub use engine::{GameEngine, GameEvent, TurnReason};
pub use error::GameError;
