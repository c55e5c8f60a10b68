//! Filesystem utilities shared by the loader and the build orchestrator.
//!
//! Everything here is synchronous: a build pass is a single-threaded
//! sequence of blocking filesystem calls, so these helpers only add
//! error context.

pub mod fs;

pub use fs::{ensure_dir, read_to_string, write_file};
