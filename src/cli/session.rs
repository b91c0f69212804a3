//! Interactive game session.
//!
//! The session owns the single logical event loop the timer core is built
//! around: a tokio `select!` over stdin input, a short pump interval that
//! drives the countdown, and Ctrl-C. Everything runs on one task; the timer
//! never sees concurrent ticks.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::game::{GameEngine, GameEvent, TurnReason};
use crate::types::{GameConfig, Player};

use super::display::Display;

/// Interval at which the session pumps the countdown timer.
const PUMP_INTERVAL_MS: u64 = 25;

// ============================================================================
// Session
// ============================================================================

/// An interactive game session on stdin/stdout.
pub struct Session {
    engine: GameEngine,
    event_rx: mpsc::UnboundedReceiver<GameEvent>,
    turn_seconds: f64,
    json: bool,
}

impl Session {
    /// Creates a session with a freshly started game.
    pub fn new(config: GameConfig, json: bool) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let turn_seconds = config.turn_seconds;
        let engine = GameEngine::new(config, event_tx);
        Self {
            engine,
            event_rx,
            turn_seconds,
            json,
        }
    }

    /// Runs the session until the player quits or stdin closes.
    pub async fn run(&mut self) -> Result<()> {
        if !self.json {
            Display::show_intro(self.turn_seconds);
            Display::show_board(self.engine.board());
            Display::show_turn(Player::X, self.engine.timer().time_left());
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = interval(Duration::from_millis(PUMP_INTERVAL_MS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.engine.poll();
                    self.flush_events();
                }
                line = lines.next_line() => {
                    match line.context("標準入力の読み取りに失敗しました")? {
                        Some(input) => {
                            if !self.handle_input(input.trim()) {
                                break;
                            }
                            self.flush_events();
                        }
                        None => break,
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("received ctrl-c");
                    break;
                }
            }
        }

        if !self.json {
            Display::show_scores(&self.engine.scores());
        }
        Ok(())
    }

    /// Handles one line of input. Returns false when the session should end.
    fn handle_input(&mut self, input: &str) -> bool {
        match input {
            "" => true,
            "q" | "quit" | "exit" => false,
            "n" | "new" => {
                if !self.json {
                    Display::show_new_game();
                }
                self.engine.new_game();
                true
            }
            _ => {
                match input.parse::<usize>() {
                    Ok(cell @ 1..=9) => {
                        if let Err(err) = self.engine.play(cell - 1) {
                            self.report_input_error(&err.user_message());
                        }
                    }
                    _ => {
                        self.report_input_error("マスは1-9で入力してください（n: 新規 / q: 終了）");
                    }
                }
                true
            }
        }
    }

    /// Reports a rejected input on the surface the session was asked to use:
    /// a JSON event line in `--json` mode, stderr otherwise.
    fn report_input_error(&self, message: &str) {
        if self.json {
            let line = serde_json::json!({
                "event": "input_rejected",
                "message": message,
            });
            println!("{line}");
        } else {
            Display::show_error(message);
        }
    }

    /// Drains and renders pending game events.
    fn flush_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if self.json {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(err) => tracing::warn!(%err, "failed to serialize event"),
                }
            } else {
                self.render_event(&event);
            }
        }
    }

    fn render_event(&self, event: &GameEvent) {
        match event {
            GameEvent::MoveMade { .. } => {
                Display::show_board(self.engine.board());
            }
            GameEvent::TurnSwitched { player, reason } => {
                if *reason == TurnReason::Timeout {
                    Display::show_timeout(*player);
                } else {
                    Display::show_turn(*player, self.engine.timer().time_left());
                }
            }
            GameEvent::GameWon { player, .. } => {
                Display::show_win(*player, &self.engine.scores());
            }
            GameEvent::GameDrawn => {
                Display::show_draw(&self.engine.scores());
            }
            GameEvent::CountdownTick { time_left } => {
                Display::show_time_left(*time_left);
            }
            GameEvent::NewGameStarted => {
                Display::show_board(self.engine.board());
                Display::show_turn(Player::X, self.engine.timer().time_left());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
