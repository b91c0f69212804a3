//! CLI binary tests.
//!
//! These run the compiled `tictactoe` binary and check argument handling,
//! help output, completions, and a short scripted session over stdin.

use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

fn tictactoe() -> Command {
    let mut cmd = Command::cargo_bin("tictactoe").unwrap();
    cmd.timeout(Duration::from_secs(10));
    cmd
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn help_lists_the_subcommands() {
    tictactoe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn no_arguments_prints_help() {
    tictactoe()
        .assert()
        .success()
        .stdout(predicate::str::contains("play"));
}

#[test]
fn version_flag_reports_the_version() {
    tictactoe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Argument Validation
// ============================================================================

#[test]
fn unknown_subcommand_fails() {
    tictactoe().arg("bogus").assert().failure();
}

#[test]
fn turn_seconds_out_of_range_is_rejected() {
    tictactoe()
        .args(["play", "--turn-seconds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1-60"));

    tictactoe()
        .args(["play", "--turn-seconds", "61"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1-60"));
}

#[test]
fn turn_seconds_must_be_a_number() {
    tictactoe()
        .args(["play", "--turn-seconds", "abc"])
        .assert()
        .failure();
}

#[test]
fn precision_out_of_range_is_rejected() {
    tictactoe()
        .args(["play", "--precision", "5"])
        .assert()
        .failure();

    tictactoe()
        .args(["play", "--precision", "5000"])
        .assert()
        .failure();
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_generates_a_bash_script() {
    tictactoe()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tictactoe"));
}

#[test]
fn completions_rejects_an_unknown_shell() {
    tictactoe().args(["completions", "tcsh"]).assert().failure();
}

// ============================================================================
// Scripted Sessions
// ============================================================================

#[test]
fn quit_ends_the_session_with_the_scores() {
    tictactoe()
        .arg("play")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("スコア"));
}

#[test]
fn closing_stdin_ends_the_session() {
    tictactoe()
        .arg("play")
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn a_move_is_reflected_on_the_board() {
    tictactoe()
        .arg("play")
        .write_stdin("5\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(" X "));
}

#[test]
fn json_mode_emits_one_event_per_line() {
    tictactoe()
        .args(["play", "--json"])
        .write_stdin("5\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event\":\"move_made\""))
        .stdout(predicate::str::contains("\"event\":\"turn_switched\""));
}

#[test]
fn json_mode_reports_rejected_input_as_an_event() {
    tictactoe()
        .args(["play", "--json"])
        .write_stdin("0\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event\":\"input_rejected\""));
}

#[test]
fn invalid_cell_input_reports_an_error_and_continues() {
    tictactoe()
        .arg("play")
        .write_stdin("0\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("エラー"));
}
