use std::path::PathBuf;
use thiserror::Error;

/// Failures of the external compiler or of the built runner.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to launch '{program}': {source}")]
    SpawnFailed {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("compilation failed ({}). Please fix that.", describe_code(.code))]
    CompileFailed { code: Option<i32> },

    #[error("tests failed (exit status {code}). Please fix that.")]
    TestsFailed { code: i32 },

    #[error("test runner terminated without an exit code")]
    RunnerTerminated,
}

impl ProcessError {
    pub fn spawn_failed(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            program: program.into(),
            source,
        }
    }

    pub fn compile_failed(code: Option<i32>) -> Self {
        Self::CompileFailed { code }
    }

    pub fn tests_failed(code: i32) -> Self {
        Self::TestsFailed { code }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}
