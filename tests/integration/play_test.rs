//! Integration tests for the play and demo commands (CLI)

use std::process::Command;

use crate::helpers::{fixtures_dir, temp_script};

/// Helper to run typeline CLI and capture output
fn run_typeline(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_typeline"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute typeline");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn play_help_exits_0_and_shows_usage() {
    let (stdout, _stderr, exit_code) = run_typeline(&["play", "--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Play a typing script"));
    assert!(stdout.contains("<FILE>"));
    assert!(stdout.contains("--plain"));
    assert!(stdout.contains("--type-delay"));
}

#[test]
fn help_lists_all_subcommands() {
    let (stdout, _stderr, exit_code) = run_typeline(&["--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("typewriter-style text animations"));
    assert!(stdout.contains("play"));
    assert!(stdout.contains("demo"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("completions"));
}

#[test]
fn version_prints_package_version() {
    assert_cmd::Command::cargo_bin("typeline")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn play_no_arguments_shows_error() {
    let (_stdout, stderr, exit_code) = run_typeline(&["play"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("required arguments"));
    assert!(stderr.contains("<FILE>"));
}

#[test]
fn play_nonexistent_file_exits_nonzero_with_helpful_error() {
    let (_stdout, stderr, exit_code) = run_typeline(&["play", "nonexistent.twl"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to open script"));
    assert!(stderr.contains("nonexistent.twl"));
}

#[test]
fn play_rejects_script_with_bad_header() {
    let (_temp_dir, path) = temp_script("not json\n[0,\"w\",\"x\"]\n");
    let (_stdout, stderr, exit_code) = run_typeline(&["play", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to parse script header"));
}

#[test]
fn play_rejects_unsupported_version() {
    let (_temp_dir, path) = temp_script("{\"version\":2}\n");
    let (_stdout, stderr, exit_code) = run_typeline(&["play", path.to_str().unwrap()]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("version 1"));
}

#[test]
fn plain_refuses_looping_scripts() {
    let (_stdout, stderr, exit_code) =
        run_typeline(&["play", &fixture("looping.twl"), "--plain"]);

    assert_eq!(exit_code, 1);
    assert!(
        stderr.contains("--no-loop"),
        "Error should point at --no-loop, got: {}",
        stderr
    );
}

// ============================================================================
// Plain Playback Tests
// ============================================================================

#[test]
fn plain_prints_final_text() {
    let (stdout, stderr, exit_code) = run_typeline(&["play", &fixture("quick.twl"), "--plain"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "Help!\n");
}

#[test]
fn plain_preserves_seeded_text_and_line_breaks() {
    let (stdout, _stderr, exit_code) = run_typeline(&["play", &fixture("seeded.twl"), "--plain"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "> hi\nbye\n");
}

#[test]
fn play_without_tty_falls_back_to_plain() {
    // stdout is a pipe here, so the interactive player must step aside
    // even without --plain.
    let (stdout, _stderr, exit_code) = run_typeline(&["play", &fixture("quick.twl")]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "Help!\n");
}

#[test]
fn no_loop_flag_plays_looping_script_once() {
    let (stdout, _stderr, exit_code) =
        run_typeline(&["play", &fixture("looping.twl"), "--plain", "--no-loop"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "spin\n");
}

#[test]
fn erase_steps_blank_typed_characters() {
    let (stdout, _stderr, exit_code) = run_typeline(&["play", &fixture("erase.twl"), "--plain"]);

    assert_eq!(exit_code, 0);
    // Normally the erase lands as a backspace-blank-backspace between the
    // writes; on a badly stalled machine all three steps can land in one
    // frame and only the final text goes out.
    assert!(
        stdout == "abc\u{8} \u{8}d\n" || stdout == "abd\n",
        "Unexpected stream: {:?}",
        stdout
    );
}

#[test]
fn speed_flag_warns_in_plain_mode() {
    let (stdout, stderr, exit_code) =
        run_typeline(&["play", &fixture("quick.twl"), "--plain", "--speed", "2"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "Help!\n");
    assert!(stderr.contains("--speed only applies to the interactive player"));
}

// ============================================================================
// Demo Tests
// ============================================================================

#[test]
fn demo_plain_plays_builtin_script() {
    let (stdout, stderr, exit_code) = run_typeline(&["demo", "--plain", "--type-delay", "0"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Hello, world."));
    assert!(stdout.ends_with("bye.\n"));
}

// ============================================================================
// CLI Parsing Tests
// ============================================================================

#[test]
fn loop_conflicts_with_no_loop() {
    let (_stdout, stderr, exit_code) =
        run_typeline(&["play", "a.twl", "--loop", "--no-loop"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("cannot be used with"));
}
