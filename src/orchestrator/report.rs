use std::path::Path;

use super::process::CommandLine;
use super::{RunSummary, SuiteResult};
use crate::discovery::TestIdentifier;

/// Receives progress from the orchestrator.
///
/// Output of the compiler and runners is not routed through here; it goes
/// to the terminal directly.
pub trait SuiteReporter {
    fn on_suite_start(&mut self, suite: &Path);

    fn on_tests_discovered(&mut self, _suite: &Path, _tests: &[TestIdentifier]) {}

    /// Called before each external command is launched.
    fn on_command(&mut self, _command: &CommandLine) {}

    fn on_suite_complete(&mut self, result: &SuiteResult);

    fn on_run_complete(&mut self, summary: &RunSummary);
}

/// Plain text reporter for terminals and CI logs.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub echo_commands: bool,
}

impl ConsoleReporter {
    pub fn new(echo_commands: bool) -> Self {
        Self { echo_commands }
    }
}

impl SuiteReporter for ConsoleReporter {
    fn on_suite_start(&mut self, suite: &Path) {
        println!("Running {}", suite.display());
    }

    fn on_tests_discovered(&mut self, suite: &Path, tests: &[TestIdentifier]) {
        if tests.is_empty() {
            eprintln!("warning: no tests found in {}", suite.display());
        }
    }

    fn on_command(&mut self, command: &CommandLine) {
        if self.echo_commands {
            println!("{command}");
        }
    }

    fn on_suite_complete(&mut self, result: &SuiteResult) {
        if let Err(failure) = &result.outcome {
            eprintln!("Suite failed: {}: {}", result.path.display(), failure);
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        match (summary.total(), summary.failed()) {
            (0, _) => println!("No test suites found"),
            (total, 0) => println!("All {total} suites passed"),
            (total, failed) => eprintln!("{failed} of {total} suites failed"),
        }
    }
}
