use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use testweave::cli;
use testweave::discovery::find_suites;
use testweave::logging::{self, Verbosity};
use testweave::orchestrator::{ConsoleReporter, Orchestrator, SystemRunner};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let config = args.to_config().context("Failed to find object files")?;
    tracing::debug!(objdir = %args.objdir.display(), objects = ?config.objects, "linking objects");
    let suites = find_suites(&config.test_dir).context("Failed to find tests")?;
    tracing::debug!(count = suites.len(), dir = %config.test_dir.display(), "found suites");

    let mut reporter = ConsoleReporter::new(config.echo_commands);
    let summary = Orchestrator::new(&config, SystemRunner).run_all(&suites, &mut reporter);

    std::process::exit(summary.exit_code());
}
