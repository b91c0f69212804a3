//! Game engine for the tic-tac-toe game.
//!
//! This module glues the countdown timer to the game state machine:
//! - An accepted move restarts the turn timer
//! - Timer expiry while playing hands the turn to the other player
//! - A finished round pauses the timer; a new game restarts it
//! - Event firing for the session display and JSON output

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::timer::CountdownTimer;
use crate::types::{GameConfig, GamePhase, GameSnapshot, Player, Scoreboard};

use super::board::Board;
use super::error::GameError;

// ============================================================================
// GameEvent
// ============================================================================

/// Why the turn moved to the other player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnReason {
    /// The previous player made a move
    Move,
    /// The previous player ran out of time
    Timeout,
}

/// Game events for the session display and external observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A move was accepted
    MoveMade {
        /// Player who moved
        player: Player,
        /// Cell index (0-8)
        cell: usize,
    },
    /// The turn moved to the other player
    TurnSwitched {
        /// Player whose turn it now is
        player: Player,
        /// What caused the switch
        reason: TurnReason,
    },
    /// A move completed a line
    GameWon {
        /// The winner
        player: Player,
        /// The completed line
        line: [usize; 3],
    },
    /// The board filled with no winning line
    GameDrawn,
    /// The reported turn time changed
    CountdownTick {
        /// Remaining whole seconds
        #[serde(rename = "timeLeft")]
        time_left: u32,
    },
    /// A new round began
    NewGameStarted,
}

// ============================================================================
// GameEngine
// ============================================================================

/// Coordinates turns, the board, the scoreboard and the countdown timer.
pub struct GameEngine {
    board: Board,
    phase: GamePhase,
    active: Player,
    scores: Scoreboard,
    timer: CountdownTimer,
    /// Expiry notifications from the timer hook, drained by `poll()`.
    timeout_rx: mpsc::UnboundedReceiver<()>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl GameEngine {
    /// Creates an engine with a freshly started turn timer.
    pub fn new(config: GameConfig, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        let timer = CountdownTimer::new(config.turn_seconds, config.timer);
        Self::with_timer(timer, event_tx)
    }

    /// Creates an engine around an existing timer.
    ///
    /// Used by tests that inject a manual time source.
    pub fn with_timer(mut timer: CountdownTimer, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        let (timeout_tx, timeout_rx) = mpsc::unbounded_channel();
        timer.set_on_expire(move || {
            let _ = timeout_tx.send(());
        });

        Self {
            board: Board::new(),
            phase: GamePhase::Playing,
            active: Player::X,
            scores: Scoreboard::new(),
            timer,
            timeout_rx,
            event_tx,
        }
    }

    /// Applies a move by the active player to the given cell (0-8).
    ///
    /// A rejected move leaves the board, the turn, and the timer untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is over, the cell is out of range, or
    /// the cell is taken.
    pub fn play(&mut self, cell: usize) -> Result<(), GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::RoundOver(self.phase));
        }

        let player = self.active;
        self.board.place(cell, player)?;
        tracing::debug!(player = player.as_str(), cell, "move accepted");
        self.emit(GameEvent::MoveMade { player, cell });

        if let Some((winner, line)) = self.board.winning_line() {
            self.phase = GamePhase::Won;
            self.scores.record_win(winner);
            self.timer.pause();
            self.emit(GameEvent::GameWon {
                player: winner,
                line,
            });
        } else if self.board.is_full() {
            self.phase = GamePhase::Drawn;
            self.scores.record_draw();
            self.timer.pause();
            self.emit(GameEvent::GameDrawn);
        } else {
            self.active = player.other();
            self.timer.restart();
            self.emit(GameEvent::TurnSwitched {
                player: self.active,
                reason: TurnReason::Move,
            });
        }

        Ok(())
    }

    /// Clears the board and starts a new round. Scores persist.
    pub fn new_game(&mut self) {
        self.board.clear();
        self.phase = GamePhase::Playing;
        self.active = Player::X;
        self.timer.restart();
        self.emit(GameEvent::NewGameStarted);
    }

    /// Pumps the timer and applies any expiry that occurred.
    ///
    /// Called from the session loop on every interval tick.
    pub fn poll(&mut self) {
        if self.timer.poll() && !self.timer.is_expired() {
            self.emit(GameEvent::CountdownTick {
                time_left: self.timer.time_left(),
            });
        }

        while self.timeout_rx.try_recv().is_ok() {
            self.handle_timeout();
        }

        self.sync_timer();
    }

    /// Handles one timer expiry: the active player forfeits the turn.
    fn handle_timeout(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.active = self.active.other();
        self.timer.restart();
        tracing::debug!(player = self.active.as_str(), "turn timed out");
        self.emit(GameEvent::TurnSwitched {
            player: self.active,
            reason: TurnReason::Timeout,
        });
    }

    /// Keeps the timer aligned with the phase: paused outside of play,
    /// running during play unless a deferred start is already queued.
    fn sync_timer(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                if !self.timer.is_running()
                    && !self.timer.is_expired()
                    && !self.timer.is_scheduled()
                {
                    self.timer.start();
                }
            }
            GamePhase::Won | GamePhase::Drawn => self.timer.pause(),
        }
    }

    fn emit(&self, event: GameEvent) {
        // A dropped receiver only happens at session shutdown.
        let _ = self.event_tx.send(event);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current round phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the player whose turn it is.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Returns the accumulated scores.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Returns the countdown timer.
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    /// Returns a serializable snapshot of the full game state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            active_player: self.active,
            time_left: self.timer.time_left(),
            percentage: self.timer.percentage(),
            cells: self.board.cells(),
            scores: self.scores,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
