//! Command-line interface for patlab.
//!
//! One subcommand today: `build`, which runs a full build pass over a
//! registry snapshot. Global flags control output verbosity.
//!
//! ```bash
//! # Build with defaults (patlab.toml + pattern-data.json in cwd)
//! patlab build
//!
//! # Explicit inputs, debug logging
//! patlab build --config site/patlab.toml --registry site/pattern-data.json --verbose
//! ```

mod build;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Root command with global options shared by all subcommands.
#[derive(Parser)]
#[command(name = "patlab", version, about = "Pattern library builder")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the pattern registry into the public output tree
    Build(build::BuildCommand),
}

impl Cli {
    /// The default tracing directive implied by the verbosity flags,
    /// used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Dispatches the selected subcommand.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Build(cmd) => cmd.execute(),
        }
    }
}
