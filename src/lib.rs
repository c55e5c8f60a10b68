//! patlab - a pattern library builder.
//!
//! patlab renders a registry of UI component patterns (reusable markup
//! fragments organized by type and subtype) into standalone HTML
//! artifacts, per-category "view all" pages, a full style guide, and
//! the JSON data files consumed by a companion browser UI.
//!
//! # Architecture
//!
//! A build pass flows through four collaborators, initialized in this
//! order and passed down explicitly (no ambient global state):
//!
//! 1. [`registry`] - the ordered, read-only snapshot of pattern records
//!    for this build, including each pattern's already-rendered body.
//! 2. [`loader`] - resolves logical pattern identifiers to source files
//!    across namespaced search-path roots, with a memoizing cache and
//!    path-traversal protection.
//! 3. [`render`] - the rendering boundary: a Tera-backed engine for the
//!    `viewall` page template and the header/footer chrome wrappers.
//! 4. [`builder`] - the orchestrator that walks the registry and emits
//!    every artifact, accumulating diagnostics for skipped records.
//!
//! Builds are single-threaded and synchronous; every step is idempotent
//! and a rerun with unchanged inputs produces byte-identical output.
//!
//! # Modules
//!
//! - [`builder`] - build orchestration, partial aggregation, exporters
//! - [`cli`] - command-line interface (`patlab build`)
//! - [`config`] - TOML build configuration
//! - [`core`] - error types and the build report
//! - [`loader`] - template resolution and identifier parsing
//! - [`registry`] - pattern records and the registry snapshot
//! - [`render`] - rendering engine boundary and page chrome
//! - [`utils`] - filesystem helpers

pub mod builder;
pub mod cli;
pub mod config;
pub mod core;
pub mod loader;
pub mod registry;
pub mod render;
pub mod utils;
