//! Core data types for the tic-tac-toe game.
//!
//! This module defines the data structures used for:
//! - Player and game phase state
//! - Score tracking across rounds
//! - Game and countdown timer configuration with validation
//! - Snapshot serialization for JSON output

use serde::{Deserialize, Serialize};

// ============================================================================
// Player
// ============================================================================

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The X player (moves first)
    X,
    /// The O player
    O,
}

impl Player {
    /// Returns the string representation of the player.
    pub fn as_str(&self) -> &'static str {
        match self {
            Player::X => "x",
            Player::O => "o",
        }
    }

    /// Returns the board mark for this player.
    pub fn mark(&self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Returns the other player.
    pub fn other(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::X
    }
}

// ============================================================================
// GamePhase
// ============================================================================

/// Represents the current phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// The round is in progress
    Playing,
    /// The round ended with a winning line
    Won,
    /// The board filled up with no winning line
    Drawn,
}

impl GamePhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Playing => "playing",
            GamePhase::Won => "won",
            GamePhase::Drawn => "drawn",
        }
    }

    /// Returns true if the round has ended.
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Drawn)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        GamePhase::Playing
    }
}

// ============================================================================
// Scoreboard
// ============================================================================

/// Win and draw counts accumulated across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Rounds won by X
    pub x_wins: u32,
    /// Rounds won by O
    pub o_wins: u32,
    /// Drawn rounds
    pub draws: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a win for the given player.
    pub fn record_win(&mut self, player: Player) {
        match player {
            Player::X => self.x_wins += 1,
            Player::O => self.o_wins += 1,
        }
    }

    /// Records a drawn round.
    pub fn record_draw(&mut self) {
        self.draws += 1;
    }

    /// Returns the win count for the given player.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration for the countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Tick interval in milliseconds used by delay-based scheduling (10-1000)
    pub precision_ms: u64,
    /// Prefer frame-based scheduling and the monotonic clock when true
    pub use_high_precision: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            precision_ms: 100,
            use_high_precision: true,
        }
    }
}

impl TimerConfig {
    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.precision_ms < 10 || self.precision_ms > 1000 {
            return Err("精度は10-1000ミリ秒の範囲で指定してください".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// GameConfig
// ============================================================================

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds each player has per turn (1-60)
    pub turn_seconds: f64,
    /// Countdown timer configuration
    pub timer: TimerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            turn_seconds: 5.0,
            timer: TimerConfig::default(),
        }
    }
}

impl GameConfig {
    /// Creates a new configuration with the specified turn length.
    pub fn with_turn_seconds(mut self, seconds: f64) -> Self {
        self.turn_seconds = seconds;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if !(1.0..=60.0).contains(&self.turn_seconds) {
            return Err("1手の持ち時間は1-60秒の範囲で指定してください".to_string());
        }
        self.timer.validate()
    }
}

// ============================================================================
// GameSnapshot
// ============================================================================

/// A serializable snapshot of the full game state, used for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Current round phase
    pub phase: GamePhase,
    /// Player whose turn it is
    #[serde(rename = "activePlayer")]
    pub active_player: Player,
    /// Remaining turn time in whole seconds (ceiling-rounded)
    #[serde(rename = "timeLeft")]
    pub time_left: u32,
    /// Remaining turn time as a percentage of the turn length
    pub percentage: f64,
    /// Board cells in row-major order
    pub cells: [Option<Player>; 9],
    /// Accumulated scores
    pub scores: Scoreboard,
}

// ============================================================================
// Tests
// ============================================================================
