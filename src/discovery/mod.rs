//! Test discovery.
//!
//! Discovery is line oriented: each line is checked for the `void test_<word>`
//! marker and the first match on a line yields one [`TestIdentifier`]. There
//! is no parsing of the surrounding C++; comments and string literals that
//! happen to contain the marker are picked up as well.

pub mod matcher;
pub mod suites;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{DiscoveryError, IoError};
pub use matcher::{match_test_line, MARKER, TEST_PREFIX};
pub use suites::{find_objects, find_suites, RUNNER_SUFFIX, SUITE_EXTENSION};

/// Longest line accepted by [`discover`]. Longer lines are rejected rather
/// than split or truncated.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Name of one discovered test function, always starting with `test_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestIdentifier(String);

impl TestIdentifier {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for TestIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The unmodified text of one suite file.
#[derive(Debug, Clone)]
pub struct SuiteSource {
    path: PathBuf,
    text: String,
}

impl SuiteSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a suite file fully into memory.
    pub fn read(path: &Path) -> Result<Self, IoError> {
        let bytes = fs::read(path).map_err(|e| IoError::read_error(path, e))?;
        let text = String::from_utf8(bytes).map_err(|_| IoError::invalid_utf8(path))?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn discover(&self) -> Result<Vec<TestIdentifier>, DiscoveryError> {
        let tests = discover(&self.text)?;
        debug!(
            suite = %self.path.display(),
            count = tests.len(),
            "discovered tests"
        );
        Ok(tests)
    }
}

/// Collect test identifiers in line order.
///
/// Duplicates are kept; a test declared twice is listed twice.
pub fn discover(text: &str) -> Result<Vec<TestIdentifier>, DiscoveryError> {
    let mut tests = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.len() > MAX_LINE_LEN {
            return Err(DiscoveryError::line_too_long(index + 1, line.len()));
        }
        if let Some(name) = match_test_line(line) {
            trace!(line = index + 1, name, "matched test");
            tests.push(TestIdentifier::new(name));
        }
    }

    Ok(tests)
}
