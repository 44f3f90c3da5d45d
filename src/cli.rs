use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{split_flags, Config};
use crate::discovery::find_objects;
use crate::error::IoError;

#[derive(Parser, Debug)]
#[command(name = "testweave")]
#[command(
    about = "Build and run C++ test suites - finds `void test_*` functions and weaves them into a runner",
    long_about = None
)]
pub struct Args {
    /// The C++ compiler/linker
    #[arg(long, value_name = "PROGRAM", default_value = "clang++")]
    pub cxx: PathBuf,

    /// Space-separated flags for compilation
    #[arg(long, value_name = "FLAGS", default_value = "", allow_hyphen_values = true)]
    pub cxxflags: String,

    /// Space-separated flags for linking
    #[arg(long, value_name = "FLAGS", default_value = "", allow_hyphen_values = true)]
    pub ldflags: String,

    /// Location of test files
    #[arg(long, value_name = "DIR", default_value = "test")]
    pub testdir: PathBuf,

    /// Location of object files (every *.o in it is linked)
    #[arg(long, value_name = "DIR", default_value = "build")]
    pub objdir: PathBuf,

    /// Path of the runner executable built for each suite
    #[arg(long, value_name = "PATH", default_value = "test_runner")]
    pub runner: PathBuf,

    /// Increase verbosity (-v echoes commands, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Additional object files to link into every runner
    #[arg(value_name = "OBJECT")]
    pub objects: Vec<PathBuf>,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.cxx.as_os_str().is_empty() {
            anyhow::bail!("Compiler must not be empty");
        }
        for object in &self.objects {
            if !object.is_file() {
                anyhow::bail!("Object file does not exist: {}", object.display());
            }
        }
        Ok(())
    }

    /// Build the run configuration, adding every object found in `--objdir`
    /// after the ones given on the command line.
    pub fn to_config(&self) -> Result<Config, IoError> {
        let mut objects = self.objects.clone();
        objects.extend(find_objects(&self.objdir)?);

        Ok(Config {
            compiler: self.cxx.clone(),
            compile_flags: split_flags(&self.cxxflags),
            link_flags: split_flags(&self.ldflags),
            objects,
            test_dir: self.testdir.clone(),
            runner_path: self.runner.clone(),
            echo_commands: self.verbose > 0 && !self.quiet,
        })
    }
}
