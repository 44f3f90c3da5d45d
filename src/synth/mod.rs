//! Runner synthesis.
//!
//! A [`GeneratedProgram`] is assembled from four sections: the fixed preamble,
//! the suite text verbatim, a table pairing each test name with a pointer to
//! the function of the same name, and the `main` that walks the table.
//!
//! The table is the only place discovered names meet the suite's code.
//! Synthesis trusts that every name denotes a `void(TestContext &)` function;
//! when it does not, the C++ compiler reports it, not this module.

pub mod template;

use std::fmt::{self, Write};

use crate::discovery::{SuiteSource, TestIdentifier};

/// A complete runner program for one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    source: String,
    tests: Vec<TestIdentifier>,
}

impl GeneratedProgram {
    pub fn tests(&self) -> &[TestIdentifier] {
        &self.tests
    }

    pub fn suite_text(&self) -> &str {
        &self.source
    }

    /// Serialize the program to C++ source text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_table(&self, out: &mut impl Write) -> fmt::Result {
        out.write_str(template::TABLE_OPEN)?;
        for test in &self.tests {
            writeln!(out, "\t{{\"{test}\", &{test}}},")?;
        }
        out.write_str(template::TABLE_CLOSE)
    }
}

impl fmt::Display for GeneratedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(template::PREAMBLE)?;
        f.write_str("\n")?;
        f.write_str(&self.source)?;
        if !self.source.ends_with('\n') {
            f.write_str("\n")?;
        }
        f.write_str("\n")?;
        self.write_table(f)?;
        f.write_str("\n")?;
        f.write_str(template::ENTRY_POINT)
    }
}

/// Weave a suite and its discovered tests into a runner program.
///
/// Pure: the same inputs always render to the same text.
pub fn synthesize(suite: &SuiteSource, tests: &[TestIdentifier]) -> GeneratedProgram {
    GeneratedProgram {
        source: suite.text().to_string(),
        tests: tests.to_vec(),
    }
}
