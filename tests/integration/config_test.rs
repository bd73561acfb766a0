//! Integration tests for the config command and shell completions (CLI)

use std::process::Command;

#[cfg(target_os = "linux")]
use tempfile::TempDir;

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

/// Same, with the config directory redirected into a sandbox.
///
/// `dirs::config_dir` follows `XDG_CONFIG_HOME`, so this only isolates
/// the config on Linux; callers are gated accordingly.
#[cfg(target_os = "linux")]
fn run_typeline_sandboxed(args: &[&str], config_home: &std::path::Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_typeline"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", config_home)
        .env("EDITOR", "true")
        .output()
        .expect("Failed to execute typeline");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

// ============================================================================
// Config Path Tests
// ============================================================================

#[test]
fn config_path_prints_toml_location() {
    let (stdout, _stderr, exit_code) = run_typeline(&["config", "path"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.trim_end().ends_with("config.toml"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_path_follows_xdg_config_home() {
    let temp_dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_typeline_sandboxed(&["config", "path"], temp_dir.path());

    assert_eq!(exit_code, 0);
    let expected = temp_dir.path().join("typeline").join("config.toml");
    assert_eq!(stdout.trim_end(), expected.to_str().unwrap());
}

// ============================================================================
// Config Show Tests
// ============================================================================

#[test]
#[cfg(target_os = "linux")]
fn config_show_prints_defaults_without_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_typeline_sandboxed(&["config", "show"], temp_dir.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[playback]"));
    assert!(stdout.contains("type_delay = 150"));
    assert!(stdout.contains("[player]"));
    assert!(stdout.contains("cursor_blink = 500"));
    assert!(stdout.contains("theme = \"ink\""));
}

#[test]
#[cfg(target_os = "linux")]
fn config_show_reflects_saved_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("typeline");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[playback]\ntype_delay = 80\nloop = true\n\n[player]\ntheme = \"classic\"\n",
    )
    .unwrap();

    let (stdout, _stderr, exit_code) = run_typeline_sandboxed(&["config", "show"], temp_dir.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("type_delay = 80"));
    assert!(stdout.contains("loop = true"));
    assert!(stdout.contains("theme = \"classic\""));
    // Fields the file left out still show their defaults.
    assert!(stdout.contains("cursor_blink = 500"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_show_rejects_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("typeline");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[playback\ntype_delay = 80").unwrap();

    let (_stdout, stderr, exit_code) = run_typeline_sandboxed(&["config", "show"], temp_dir.path());

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to parse config"));
}

// ============================================================================
// Config Edit Tests
// ============================================================================

#[test]
#[cfg(target_os = "linux")]
fn config_edit_creates_file_before_opening_editor() {
    let temp_dir = TempDir::new().unwrap();
    // EDITOR is pinned to `true` in the sandboxed helper, so this opens
    // and closes without interaction.
    let (stdout, _stderr, exit_code) = run_typeline_sandboxed(&["config", "edit"], temp_dir.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("created"));
    assert!(stdout.contains("Opening"));
    assert!(temp_dir
        .path()
        .join("typeline")
        .join("config.toml")
        .exists());
}

// ============================================================================
// Shell Completion Tests
// ============================================================================

#[test]
fn completions_bash_covers_subcommands() {
    let (stdout, _stderr, exit_code) = run_typeline(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("_typeline"));
    assert!(stdout.contains("play"));
    assert!(stdout.contains("demo"));
}

#[test]
fn completions_zsh_names_the_command() {
    let (stdout, _stderr, exit_code) = run_typeline(&["completions", "zsh"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("#compdef typeline"));
}

#[test]
fn completions_rejects_unknown_shell() {
    let (_stdout, stderr, exit_code) = run_typeline(&["completions", "tcsh"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("invalid value"));
}
