//! Crate-level error types and the build report.
//!
//! Two propagation classes exist, and they are deliberately different:
//!
//! - **Fatal**: configuration errors, registry inconsistencies (duplicate
//!   partials, aggregate output-path collisions), and filesystem write
//!   failures. These abort the build; already-written artifacts from
//!   completed steps stay in place, there is no rollback.
//! - **Local**: identifier-resolution failures and a missing style-guide
//!   scaffold. These are accumulated as [`Diagnostic`]s on the
//!   [`BuildReport`] and the build continues with the next record or
//!   step.

use colored::Colorize;
use thiserror::Error;

/// Fatal errors for patlab operations.
#[derive(Debug, Error)]
pub enum PatlabError {
    /// Configuration file problems (missing file, bad values).
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error.
        message: String,
    },

    /// Two registry records share a partial key.
    #[error("Duplicate pattern partial \"{partial}\" in registry")]
    DuplicatePartial {
        /// The partial key registered more than once.
        partial: String,
    },

    /// Two aggregation nodes would emit the same view-all page.
    ///
    /// A collision means the registry snapshot is inconsistent; letting
    /// the later node win would make output depend on registry order, so
    /// the build fails before anything is overwritten.
    #[error("View-all output path collision: \"{path}\" is produced by more than one aggregation node")]
    OutputPathCollision {
        /// The contested dash path.
        path: String,
    },
}

/// A recoverable, user-visible problem recorded during a build.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The pattern identifier or build step the problem applies to.
    pub subject: String,
    /// What went wrong.
    pub message: String,
}

/// Outcome of one build pass: what was written, and which records or
/// steps were skipped and why.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Leaf patterns whose three artifacts were written.
    pub patterns_written: usize,
    /// View-all pages written (type and subtype scopes).
    pub view_all_written: usize,
    /// Whether the style-guide page was written.
    pub styleguide_written: bool,
    /// Skipped records and steps, in occurrence order.
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skip and logs it; the build continues.
    pub fn skip(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            subject: subject.into(),
            message: message.into(),
        };
        tracing::warn!("skipping {}: {}", diagnostic.subject, diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Prints the report to stderr/stdout with terminal colors.
    pub fn display(&self) {
        println!(
            "{} {} patterns, {} view-all pages{}",
            "Built".green().bold(),
            self.patterns_written,
            self.view_all_written,
            if self.styleguide_written { ", style guide" } else { "" }
        );

        if self.has_diagnostics() {
            eprintln!("{}", "Skipped:".yellow().bold());
            for diagnostic in &self.diagnostics {
                eprintln!("  {} {} - {}", "!".yellow(), diagnostic.subject, diagnostic.message);
            }
        }
    }
}
