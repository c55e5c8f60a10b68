//! patlab CLI entry point.
//!
//! Parses arguments, initializes logging, and runs the selected command.
//! Failures are printed in color and exit with status 1; a build that
//! completes with skipped records still exits 0 and enumerates the
//! skips in its report.

use clap::Parser;
use colored::Colorize;
use patlab_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = cli.execute() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
