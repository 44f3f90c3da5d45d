//! testweave
//!
//! Finds `void test_*` functions in C++ suite files, weaves each suite into a
//! self-contained runner program, builds it with an external compiler, runs
//! it, and reports how many suites failed.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod synth;

pub use config::Config;
pub use discovery::{discover, SuiteSource, TestIdentifier};
pub use orchestrator::{Orchestrator, RunSummary, SuiteResult};
pub use synth::{synthesize, GeneratedProgram};
