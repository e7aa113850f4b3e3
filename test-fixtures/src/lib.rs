//! Shared fixture files for workspace tests: golden scoring and
//! fingerprint cases, end-to-end collection scenarios, and alternative
//! category tables.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Files every test run expects to find.
pub const KNOWN_FIXTURES: [&str; 5] = [
    "golden/scoring/value_cases.json",
    "golden/scoring/blocklist_cases.json",
    "golden/merge/fingerprint_pairs.json",
    "scenarios/mos_burger_tenjin.json",
    "tables/minimal_categories.json",
];

/// The `test-fixtures` directory, found by walking up from the calling
/// crate's manifest directory.
fn root() -> PathBuf {
    let start = std::env::var("CARGO_MANIFEST_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from);
    if start.ends_with("test-fixtures") {
        return start;
    }
    start
        .ancestors()
        .map(|dir| dir.join("test-fixtures"))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| panic!("no test-fixtures directory above {}", start.display()))
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()))
}

/// Absolute path of a fixture, relative to the fixtures root.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    root().join(relative_path)
}

/// Whether a fixture file is present.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).is_file()
}

/// Deserialize a JSON fixture.
///
/// # Panics
/// If the file is missing or does not match `T`.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    serde_json::from_str(&read(&path))
        .unwrap_or_else(|e| panic!("fixture {} does not parse: {e}", path.display()))
}

/// Raw fixture text, for tables handed to a loader under test.
pub fn load_fixture_text(relative_path: &str) -> String {
    read(&fixture_path(relative_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fixtures_are_present() {
        for f in KNOWN_FIXTURES {
            assert!(fixture_exists(f), "missing fixture: {f}");
        }
    }

    #[test]
    fn json_fixtures_parse() {
        for f in KNOWN_FIXTURES {
            let _: serde_json::Value = load_fixture(f);
        }
    }
}
