//! Display utilities for the tic-tac-toe CLI.
//!
//! This module provides formatted output for:
//! - The board grid
//! - Turn and countdown messages
//! - Round results and the scoreboard

use crate::game::Board;
use crate::types::{Player, Scoreboard};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the game intro with input hints.
    pub fn show_intro(turn_seconds: f64) {
        println!("三目並べを開始します（1手 {}秒）", turn_seconds);
        println!("マスは1-9で入力してください。n: 新しいゲーム / q: 終了");
    }

    /// Shows the board grid.
    pub fn show_board(board: &Board) {
        println!("{}", Self::render_board(board));
    }

    /// Shows whose turn it is.
    pub fn show_turn(player: Player, time_left: u32) {
        println!("{}の番です（残り{}秒）", player.mark(), time_left);
    }

    /// Shows the remaining turn time.
    pub fn show_time_left(time_left: u32) {
        println!("  残り{}秒", time_left);
    }

    /// Shows a timeout handover.
    pub fn show_timeout(player: Player) {
        println!("時間切れ！ {}の番になりました", player.mark());
    }

    /// Shows the round result for a win.
    pub fn show_win(player: Player, scores: &Scoreboard) {
        println!("{}の勝ち！", player.mark());
        Self::show_scores(scores);
    }

    /// Shows the round result for a draw.
    pub fn show_draw(scores: &Scoreboard) {
        println!("引き分けです");
        Self::show_scores(scores);
    }

    /// Shows the scoreboard.
    pub fn show_scores(scores: &Scoreboard) {
        println!("{}", Self::format_scores(scores));
    }

    /// Shows a new-game separator.
    pub fn show_new_game() {
        println!("─────────────────────────────");
        println!("新しいゲームを開始します");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Renders the board grid with 1-9 hints in empty cells.
    fn render_board(board: &Board) -> String {
        let cell = |index: usize| match board.get(index) {
            Some(player) => player.mark(),
            None => char::from_digit(index as u32 + 1, 10).unwrap_or(' '),
        };

        let mut out = String::new();
        for row in 0..3 {
            let base = row * 3;
            out.push_str(&format!(
                " {} | {} | {}\n",
                cell(base),
                cell(base + 1),
                cell(base + 2)
            ));
            if row < 2 {
                out.push_str("---+---+---\n");
            }
        }
        out
    }

    /// Formats the scoreboard as a single line.
    fn format_scores(scores: &Scoreboard) -> String {
        format!(
            "スコア: X {} - O {}（引き分け {}）",
            scores.x_wins, scores.o_wins, scores.draws
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
