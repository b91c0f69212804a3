//! CLI module for the tic-tac-toe game.
//!
//! This module contains:
//! - `commands`: command and argument definitions (clap)
//! - `display`: formatted terminal output
//! - `session`: the interactive game loop

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, PlayArgs};
pub use display::Display;
pub use session::Session;
