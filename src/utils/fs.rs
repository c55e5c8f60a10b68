//! File system helpers with contextual errors.
//!
//! Thin wrappers over [`std::fs`] that attach the offending path to every
//! failure. Build output writes are full-file overwrites; there is no
//! partial-write recovery, so a write failure is fatal to the whole build
//! and is propagated as-is by callers.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all parents if necessary.
///
/// Returns an error if the path exists but is not a directory, or if
/// creation fails.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!(
            "Path exists but is not a directory: {}",
            path.display()
        ));
    }
    Ok(())
}

/// Reads a file to a string with the path attached to any failure.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Writes a string to a file, overwriting any existing content.
///
/// The parent directory must already exist; the orchestrator creates
/// output directories explicitly before writing into them.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write file: {}", path.display()))
}
