//! Core types shared across the crate: the fatal error enum and the
//! per-build diagnostic report.

pub mod error;

pub use error::{BuildReport, Diagnostic, PatlabError};
