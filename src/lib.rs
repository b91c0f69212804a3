//! Tic-Tac-Toe Library
//!
//! This library provides the core functionality for the tic-tac-toe CLI.
//! It includes:
//! - Countdown timer with pluggable clock sources and exactly-once expiry
//! - Game engine coordinating turns, timeouts and scores
//! - CLI command parsing and display utilities
//! - Type definitions for configuration and state

pub mod cli;
pub mod game;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{GameConfig, GamePhase, GameSnapshot, Player, Scoreboard, TimerConfig};

// Re-export timer types
pub use timer::{
    CountdownTimer, DurationCell, ManualSource, MonotonicSource, TickScheduler, TimeSource,
    WallSource,
};

// Re-export game types
pub use game::{Board, GameEngine, GameError, GameEvent, TurnReason};

// Re-export CLI types
pub use cli::{Cli, Commands, Display, PlayArgs, Session};
