//! Template loader error types.
//!
//! Resolution failures are always recoverable by the caller: `exists`
//! swallows them to `false` and the build orchestrator logs and skips the
//! offending record. Only registration-time failures (`InvalidRoot`)
//! surface before a build begins.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the template loader.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A configured search root does not exist or is not a directory.
    ///
    /// Raised at `add_path`/`prepend_path`/`set_paths` time, fatal to that
    /// registration call only.
    #[error("The \"{}\" directory does not exist", path.display())]
    InvalidRoot {
        /// The root path that failed validation.
        path: PathBuf,
    },

    /// The identifier cannot be interpreted as a template name.
    ///
    /// Covers null bytes, a namespaced name with no `/` after the
    /// namespace marker, and `..` traversal that would walk above the
    /// namespace's logical root.
    #[error("Malformed template name \"{name}\": {reason}")]
    MalformedIdentifier {
        /// The identifier as supplied by the caller.
        name: String,
        /// Why the identifier was rejected.
        reason: String,
    },

    /// No configured root contains the template.
    ///
    /// Also raised when the identifier names an unregistered namespace;
    /// the two cases differ only in message, not kind.
    #[error("Unable to find template \"{name}\" ({searched})")]
    TemplateNotFound {
        /// The normalized identifier that failed to resolve.
        name: String,
        /// Human-readable description of where the loader looked.
        searched: String,
    },

    /// Reading a resolved template from disk failed.
    #[error("Failed to read template \"{}\"", path.display())]
    Io {
        /// The resolved path that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoaderError {
    pub(crate) fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(name: impl Into<String>, searched: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            name: name.into(),
            searched: searched.into(),
        }
    }
}
