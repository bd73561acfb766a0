//! Shared helpers for integration tests

use std::path::PathBuf;

use tempfile::TempDir;

/// Directory holding the checked-in test scripts.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Read a fixture file to a string.
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("Failed to read fixture {}: {}", path.display(), err))
}

/// Write a script with the given content into a fresh temp directory.
///
/// Returns the directory guard along with the file path; the file lives
/// as long as the guard does.
pub fn temp_script(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("script.twl");
    std::fs::write(&path, content).expect("Failed to write temp script");
    (temp_dir, path)
}
