#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use testweave::orchestrator::{
    CommandLine, ProcessExit, ProcessRunner, RunSummary, SuiteReporter, SuiteResult,
};
use testweave::TestIdentifier;

pub fn get_test_fixture_path(fixture_name: Option<&str>) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("cpp");
    match fixture_name {
        Some(name) => dir.join(name),
        None => dir,
    }
}

pub fn read_fixture(fixture_name: &str) -> String {
    fs::read_to_string(get_test_fixture_path(Some(fixture_name))).unwrap()
}

/// Copy a fixture suite into `dir` so runner sources are written there.
pub fn copy_fixture(fixture_name: &str, dir: &Path) -> PathBuf {
    let target = dir.join(fixture_name);
    fs::copy(get_test_fixture_path(Some(fixture_name)), &target).unwrap();
    target
}

/// Write an inline suite into `dir`.
pub fn write_suite(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// First C++ compiler on `PATH` that answers `--version`.
pub fn find_cxx() -> Option<PathBuf> {
    ["c++", "clang++", "g++"].into_iter().find_map(|cxx| {
        Command::new(cxx)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .ok()
            .filter(|s| s.success())
            .map(|_| PathBuf::from(cxx))
    })
}

/// Stand-in toolchain.
///
/// "Compiling" copies the generated source to the `-o` path, or exits 1 if
/// the source contains `#error`. "Running" exits 1 if that copy contains
/// `Assert(false`, 0 otherwise.
#[derive(Default)]
pub struct FakeToolchain {
    pub commands: RefCell<Vec<CommandLine>>,
    pub compiled_sources: RefCell<Vec<String>>,
    pub spawn_error: bool,
    pub kill_runner: bool,
}

impl FakeToolchain {
    pub fn compile_count(&self) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c.output_path().is_some())
            .count()
    }

    pub fn run_count(&self) -> usize {
        self.commands.borrow().len() - self.compile_count()
    }
}

impl ProcessRunner for FakeToolchain {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit> {
        self.commands.borrow_mut().push(command.clone());
        if self.spawn_error {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such compiler"));
        }

        if let Some(output) = command.output_path() {
            let position = command.args.iter().position(|a| a == "-o").unwrap();
            let source = fs::read_to_string(&command.args[position + 2])?;
            self.compiled_sources.borrow_mut().push(source.clone());
            if source.contains("#error") {
                return Ok(ProcessExit::with_code(1));
            }
            fs::write(output, source)?;
            return Ok(ProcessExit::with_code(0));
        }

        if self.kill_runner {
            return Ok(ProcessExit::signaled());
        }
        let binary = fs::read_to_string(&command.program)?;
        if binary.contains("Assert(false") {
            Ok(ProcessExit::with_code(1))
        } else {
            Ok(ProcessExit::with_code(0))
        }
    }
}

/// Real processes, with the runner's stdout captured for inspection.
#[derive(Default)]
pub struct CapturingRunner {
    pub runner_stdout: RefCell<Vec<String>>,
}

impl ProcessRunner for CapturingRunner {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()?;
        if command.output_path().is_none() {
            self.runner_stdout
                .borrow_mut()
                .push(String::from_utf8_lossy(&output.stdout).into_owned());
        } else if !output.status.success() {
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        }
        Ok(ProcessExit {
            code: output.status.code(),
        })
    }
}

/// Records every callback as a short line.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl SuiteReporter for RecordingReporter {
    fn on_suite_start(&mut self, suite: &Path) {
        self.events.push(format!("start {}", file_name(suite)));
    }

    fn on_tests_discovered(&mut self, _suite: &Path, tests: &[TestIdentifier]) {
        let names: Vec<&str> = tests.iter().map(TestIdentifier::as_str).collect();
        self.events.push(format!("tests [{}]", names.join(", ")));
    }

    fn on_command(&mut self, command: &CommandLine) {
        let kind = if command.output_path().is_some() {
            "compile"
        } else {
            "run"
        };
        self.events.push(kind.to_string());
    }

    fn on_suite_complete(&mut self, result: &SuiteResult) {
        let status = match result.failed_stage() {
            None => "passed".to_string(),
            Some(stage) => format!("failed at {stage}"),
        };
        self.events
            .push(format!("done {} {status}", file_name(&result.path)));
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        self.events
            .push(format!("summary {}/{}", summary.failed(), summary.total()));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}
