use std::path::{Path, PathBuf};

use crate::discovery::RUNNER_SUFFIX;

/// Everything a run needs to know, built once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Compiler and linker executable.
    pub compiler: PathBuf,
    pub compile_flags: Vec<String>,
    pub link_flags: Vec<String>,
    /// Pre-built objects linked into every runner, in link order.
    pub objects: Vec<PathBuf>,
    pub test_dir: PathBuf,
    /// Where each suite's runner executable is written. Reused per suite.
    pub runner_path: PathBuf,
    /// Print each command before running it.
    pub echo_commands: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("clang++"),
            compile_flags: Vec::new(),
            link_flags: Vec::new(),
            objects: Vec::new(),
            test_dir: PathBuf::from("test"),
            runner_path: PathBuf::from("test_runner"),
            echo_commands: false,
        }
    }
}

impl Config {
    /// Path used to launch the runner. A bare file name is anchored to the
    /// current directory so it is never looked up on `PATH`.
    pub fn runner_command(&self) -> PathBuf {
        let has_dir = self
            .runner_path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty());
        if has_dir || self.runner_path.is_absolute() {
            self.runner_path.clone()
        } else {
            Path::new(".").join(&self.runner_path)
        }
    }
}

/// Split a space-separated flag string, dropping empty fields.
pub fn split_flags(flags: &str) -> Vec<String> {
    flags.split_whitespace().map(str::to_string).collect()
}

/// Generated runner source for `suite`, placed next to it.
pub fn runner_source_path(suite: &Path) -> PathBuf {
    let mut name = suite.as_os_str().to_os_string();
    name.push(RUNNER_SUFFIX);
    PathBuf::from(name)
}
