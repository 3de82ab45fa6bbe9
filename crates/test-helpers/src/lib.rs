//! Shared fixture helpers for the integration tests.
//!
//! Fixtures live in `tests/fixtures/` of the crate under test and are
//! addressed by file name. Paths are relative to the package root, which is
//! the working directory `cargo test` runs integration tests from.

/// Directory holding the program fixtures.
pub const FIXTURE_DIR: &str = "tests/fixtures";

/// Returns the source identifier a fixture is loaded under, e.g.
/// `tests/fixtures/add.proof`.
#[must_use]
pub fn fixture_source(name: &str) -> String {
    format!("{FIXTURE_DIR}/{name}")
}

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
#[must_use]
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_source(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Lists the fixtures whose names start with `prefix`, sorted by name.
///
/// # Panics
///
/// Panics if the fixture directory cannot be read.
#[must_use]
pub fn fixtures_with_prefix(prefix: &str) -> Vec<String> {
    let entries = std::fs::read_dir(FIXTURE_DIR)
        .unwrap_or_else(|e| panic!("failed to list {FIXTURE_DIR}: {e}"));
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(prefix) && name.ends_with(".proof"))
        .collect();
    names.sort();
    names
}
