//! Command definitions for the tic-tac-toe CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::types::{GameConfig, TimerConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Tic-tac-toe CLI - a terminal game with a turn timer
#[derive(Parser, Debug)]
#[command(
    name = "tictactoe",
    version,
    about = "ターン制限時間つき三目並べCLI",
    long_about = "ターミナル上で動作するシンプルな三目並べ。\n\
                  各プレイヤーは1手ごとに制限時間があり、時間切れで手番が相手に移ります。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive game
    Play(PlayArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Play Command Arguments
// ============================================================================

/// Arguments for the play command
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Seconds each player has per turn (1-60)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = parse_turn_seconds
    )]
    pub turn_seconds: f64,

    /// Tick interval in milliseconds for delay-based scheduling (10-1000)
    #[arg(
        short,
        long,
        default_value = "100",
        value_parser = clap::value_parser!(u64).range(10..=1000)
    )]
    pub precision: u64,

    /// Use the wall clock and delay-based scheduling only
    #[arg(long)]
    pub low_precision: bool,

    /// Emit game events as JSON lines instead of the board display
    #[arg(long)]
    pub json: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            turn_seconds: 5.0,
            precision: 100,
            low_precision: false,
            json: false,
        }
    }
}

impl PlayArgs {
    /// Builds the game configuration from the parsed arguments.
    pub fn to_config(&self) -> GameConfig {
        GameConfig {
            turn_seconds: self.turn_seconds,
            timer: TimerConfig {
                precision_ms: self.precision,
                use_high_precision: !self.low_precision,
            },
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the turn length.
///
/// - Must parse as a number
/// - Must be within 1-60 seconds
fn parse_turn_seconds(s: &str) -> Result<f64, String> {
    let seconds: f64 = s
        .parse()
        .map_err(|_| "持ち時間は数値で指定してください".to_string())?;
    if !(1.0..=60.0).contains(&seconds) {
        return Err("持ち時間は1-60秒の範囲で指定してください".to_string());
    }
    Ok(seconds)
}

// ============================================================================
// Tests
// ============================================================================
