use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::discovery::TEST_PREFIX;
use crate::error::IoError;

/// Extension of suite source files.
pub const SUITE_EXTENSION: &str = "cpp";

/// Appended to a suite path to name its generated runner source.
pub const RUNNER_SUFFIX: &str = "_runner.cpp";

/// List the suite files directly inside `test_dir`, sorted by path.
///
/// Suites are named `test_*.cpp`. Runner sources left behind by an
/// interrupted run are skipped. A missing directory yields no suites.
pub fn find_suites(test_dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !test_dir.is_dir() {
        warn!(dir = %test_dir.display(), "test directory not found");
        return Ok(Vec::new());
    }

    let extension = format!(".{SUITE_EXTENSION}");
    list_files(test_dir, |name| {
        name.starts_with(TEST_PREFIX) && name.ends_with(&extension) && !name.ends_with(RUNNER_SUFFIX)
    })
}

/// List the `*.o` files directly inside `object_dir`, sorted by path.
/// A missing directory yields no objects.
pub fn find_objects(object_dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !object_dir.is_dir() {
        return Ok(Vec::new());
    }
    list_files(object_dir, |name| name.ends_with(".o"))
}

fn list_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>, IoError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| IoError::directory_scan_error(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if keep(&name) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
