//! Suite orchestration.
//!
//! Each suite goes through read, discover, synthesize, write, compile and
//! run, strictly one suite at a time. The generated source and the runner
//! executable are held as [`TempArtifact`]s so they are removed on every
//! path out of [`Orchestrator::run_suite`]. A suite that fails at any stage
//! counts once towards the failure tally and the next suite still runs.

pub mod artifact;
pub mod process;
pub mod report;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{runner_source_path, Config};
use crate::discovery::SuiteSource;
use crate::error::{self, Error, ProcessError};
use crate::synth::synthesize;
pub use artifact::TempArtifact;
pub use process::{CommandLine, ProcessExit, ProcessRunner, SystemRunner};
pub use report::{ConsoleReporter, SuiteReporter};

/// Highest exit code the process can report without wrapping.
pub const MAX_EXIT_CODE: usize = 255;

/// Where in the pipeline a suite failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the suite, discovering tests or writing the runner source.
    Prepare,
    Compile,
    Run,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Prepare => "prepare",
            Stage::Compile => "compile",
            Stage::Run => "run",
        })
    }
}

#[derive(Debug, Error)]
#[error("{source}")]
pub struct SuiteFailure {
    pub stage: Stage,
    pub source: Error,
}

impl SuiteFailure {
    pub fn new(stage: Stage, source: impl Into<Error>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// True when the runner ran and reported failing checks.
    pub fn is_test_failure(&self) -> bool {
        matches!(
            self.source,
            Error::Process(ProcessError::TestsFailed { .. })
        )
    }
}

#[derive(Debug)]
pub struct SuiteResult {
    pub path: PathBuf,
    pub outcome: Result<(), SuiteFailure>,
}

impl SuiteResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        self.outcome.as_ref().err().map(|f| f.stage)
    }
}

/// Results of one invocation, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<SuiteResult>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// The failure tally: suites that did not fully succeed.
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }

    pub fn passed(&self) -> usize {
        self.total() - self.failed()
    }

    /// The failure tally as a process exit code, saturating at 255.
    pub fn exit_code(&self) -> i32 {
        self.failed().min(MAX_EXIT_CODE) as i32
    }
}

pub struct Orchestrator<'a, R: ProcessRunner> {
    config: &'a Config,
    runner: R,
}

impl<'a, R: ProcessRunner> Orchestrator<'a, R> {
    pub fn new(config: &'a Config, runner: R) -> Self {
        Self { config, runner }
    }

    /// Process every suite in order and collect their results.
    pub fn run_all(&self, suites: &[PathBuf], reporter: &mut dyn SuiteReporter) -> RunSummary {
        let mut summary = RunSummary::default();

        for path in suites {
            reporter.on_suite_start(path);
            let outcome = self.run_suite(path, reporter);
            let result = SuiteResult {
                path: path.clone(),
                outcome,
            };
            reporter.on_suite_complete(&result);
            summary.results.push(result);
        }

        info!(
            total = summary.total(),
            failed = summary.failed(),
            "all suites processed"
        );
        reporter.on_run_complete(&summary);
        summary
    }

    /// Build and run one suite.
    pub fn run_suite(
        &self,
        path: &Path,
        reporter: &mut dyn SuiteReporter,
    ) -> Result<(), SuiteFailure> {
        let (source, test_count) = self
            .prepare(path, reporter)
            .map_err(|e| SuiteFailure::new(Stage::Prepare, e))?;
        let _executable = TempArtifact::claim(&self.config.runner_path);

        let compile = CommandLine::compile(self.config, source.path());
        let built = self
            .execute(&compile, reporter)
            .map_err(|e| SuiteFailure::new(Stage::Compile, e))?;
        if !built.success() {
            return Err(SuiteFailure::new(
                Stage::Compile,
                ProcessError::compile_failed(built.code),
            ));
        }

        let run = CommandLine::runner(self.config);
        let ran = self
            .execute(&run, reporter)
            .map_err(|e| SuiteFailure::new(Stage::Run, e))?;
        match ran.code {
            Some(0) => {
                info!(suite = %path.display(), tests = test_count, "suite passed");
                Ok(())
            }
            Some(code) => Err(SuiteFailure::new(
                Stage::Run,
                ProcessError::tests_failed(code),
            )),
            None => Err(SuiteFailure::new(Stage::Run, ProcessError::RunnerTerminated)),
        }
    }

    /// Read and discover the suite, then write its runner source.
    fn prepare(
        &self,
        path: &Path,
        reporter: &mut dyn SuiteReporter,
    ) -> error::Result<(TempArtifact, usize)> {
        let suite = SuiteSource::read(path)?;
        let tests = suite.discover()?;
        reporter.on_tests_discovered(path, &tests);

        let program = synthesize(&suite, &tests);
        let source = TempArtifact::create(runner_source_path(path), &program.render())?;
        Ok((source, tests.len()))
    }

    fn execute(
        &self,
        command: &CommandLine,
        reporter: &mut dyn SuiteReporter,
    ) -> Result<ProcessExit, ProcessError> {
        reporter.on_command(command);
        debug!(command = %command, "launching");
        let exit = self
            .runner
            .run(command)
            .map_err(|e| ProcessError::spawn_failed(&command.program, e))?;
        debug!(program = %command.program.display(), code = ?exit.code, "exited");
        Ok(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::TestIdentifier;
    use crate::error::{DiscoveryError, IoError};
    use std::io;
    use tempfile::TempDir;

    struct NoProcesses;

    impl ProcessRunner for NoProcesses {
        fn run(&self, _command: &CommandLine) -> io::Result<ProcessExit> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no processes"))
        }
    }

    #[derive(Default)]
    struct DiscoveredNames(Vec<String>);

    impl SuiteReporter for DiscoveredNames {
        fn on_suite_start(&mut self, _suite: &Path) {}

        fn on_tests_discovered(&mut self, _suite: &Path, tests: &[TestIdentifier]) {
            self.0.extend(tests.iter().map(|t| t.to_string()));
        }

        fn on_suite_complete(&mut self, _result: &SuiteResult) {}

        fn on_run_complete(&mut self, _summary: &RunSummary) {}
    }

    #[test]
    fn test_prepare_writes_runner_source() {
        let dir = TempDir::new().unwrap();
        let suite = dir.path().join("test_prep.cpp");
        std::fs::write(&suite, "void test_one(TestContext &t) {}\nvoid test_two(TestContext &t) {}\n")
            .unwrap();
        let config = Config::default();
        let orchestrator = Orchestrator::new(&config, NoProcesses);
        let mut reporter = DiscoveredNames::default();

        let (source, count) = orchestrator.prepare(&suite, &mut reporter).unwrap();

        assert_eq!(count, 2);
        assert_eq!(reporter.0, vec!["test_one", "test_two"]);
        assert_eq!(source.path(), runner_source_path(&suite));
        let text = std::fs::read_to_string(source.path()).unwrap();
        assert!(text.contains("{\"test_two\", &test_two},"));
        drop(source);
        assert!(!runner_source_path(&suite).exists());
    }

    #[test]
    fn test_prepare_errors_keep_their_kind() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let orchestrator = Orchestrator::new(&config, NoProcesses);

        let missing = orchestrator
            .prepare(&dir.path().join("test_missing.cpp"), &mut DiscoveredNames::default())
            .unwrap_err();
        assert!(matches!(missing, Error::Io(IoError::ReadError { .. })));

        let wide = dir.path().join("test_wide.cpp");
        std::fs::write(&wide, "x".repeat(crate::discovery::MAX_LINE_LEN + 1)).unwrap();
        let too_long = orchestrator
            .prepare(&wide, &mut DiscoveredNames::default())
            .unwrap_err();
        assert!(matches!(
            too_long,
            Error::Discovery(DiscoveryError::LineTooLong { line: 1, .. })
        ));
        assert!(!runner_source_path(&wide).exists());
    }

    fn result(path: &str, outcome: Result<(), SuiteFailure>) -> SuiteResult {
        SuiteResult {
            path: PathBuf::from(path),
            outcome,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            results: vec![
                result("a", Ok(())),
                result(
                    "b",
                    Err(SuiteFailure::new(
                        Stage::Compile,
                        ProcessError::compile_failed(Some(1)),
                    )),
                ),
                result("c", Ok(())),
            ],
        };
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_empty_summary_is_clean() {
        assert_eq!(RunSummary::default().exit_code(), 0);
    }

    #[test]
    fn test_exit_code_saturates() {
        let results = (0..300)
            .map(|i| {
                result(
                    &format!("suite{i}"),
                    Err(SuiteFailure::new(Stage::Run, ProcessError::tests_failed(1))),
                )
            })
            .collect();
        let summary = RunSummary { results };
        assert_eq!(summary.failed(), 300);
        assert_eq!(summary.exit_code(), 255);
    }

    #[test]
    fn test_failure_display_and_stage() {
        let failure = SuiteFailure::new(
            Stage::Prepare,
            IoError::invalid_utf8("test/test_bad.cpp"),
        );
        assert_eq!(failure.to_string(), "file 'test/test_bad.cpp' is not valid UTF-8");
        assert!(!failure.is_test_failure());

        let r = result("test/test_bad.cpp", Err(failure));
        assert_eq!(r.failed_stage(), Some(Stage::Prepare));
        assert!(!r.passed());
    }

    #[test]
    fn test_tests_failed_classification() {
        let failure = SuiteFailure::new(Stage::Run, ProcessError::tests_failed(1));
        assert!(failure.is_test_failure());
        assert_eq!(Stage::Run.to_string(), "run");
    }
}
