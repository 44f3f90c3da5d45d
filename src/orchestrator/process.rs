use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::Config;

/// A program and its arguments, kept as data so it can be echoed, logged
/// and handed to any [`ProcessRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandLine {
    /// `<compiler> <compile flags> -o <runner> <source> <objects...> <link flags>`
    pub fn compile(config: &Config, generated_source: &Path) -> Self {
        let mut args: Vec<OsString> = Vec::with_capacity(
            config.compile_flags.len() + 3 + config.objects.len() + config.link_flags.len(),
        );
        args.extend(config.compile_flags.iter().map(OsString::from));
        args.push("-o".into());
        args.push(config.runner_path.clone().into());
        args.push(generated_source.into());
        args.extend(config.objects.iter().map(OsString::from));
        args.extend(config.link_flags.iter().map(OsString::from));

        Self {
            program: config.compiler.clone(),
            args,
        }
    }

    /// The built runner takes no arguments.
    pub fn runner(config: &Config) -> Self {
        Self {
            program: config.runner_command(),
            args: Vec::new(),
        }
    }

    /// Value following `-o`, if present.
    pub fn output_path(&self) -> Option<&Path> {
        self.args
            .iter()
            .position(|a| a == "-o")
            .and_then(|i| self.args.get(i + 1))
            .map(Path::new)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a child process ended. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signaled() -> Self {
        Self { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs to completion.
///
/// The orchestrator only needs the exit status; output goes straight to the
/// caller's terminal.
pub trait ProcessRunner {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit> {
        (**self).run(command)
    }
}

/// Spawns real processes with stdout and stderr inherited.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessExit> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(ProcessExit {
            code: status.code(),
        })
    }
}
