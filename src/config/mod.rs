//! Build configuration.
//!
//! patlab reads a single TOML file (`patlab.toml` by convention) that
//! names the source and public trees and the knobs consumed by the data
//! file exporters. Relative paths are resolved against the directory
//! containing the config file, so a build can be launched from anywhere.
//!
//! ```toml
//! source_dir = "source"
//! public_dir = "public"
//! pattern_extension = "mustache"
//! cache_buster = true
//! ish_minimum = 240
//! ish_maximum = 2600
//! ish_controls_hide = ["hay", "random"]
//! ```
//!
//! Derived locations (pattern source/public subdirectories, the
//! styleguide scaffold, the meta chrome directory) hang off the two
//! configured roots and are exposed as methods rather than stored.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::PatlabError;

/// Parsed build configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Root of the authored source tree.
    pub source_dir: PathBuf,
    /// Root of the generated public tree.
    pub public_dir: PathBuf,
    /// Template file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub pattern_extension: String,
    /// Directory holding the four chrome templates; defaults to
    /// `<source_dir>/_meta`.
    #[serde(default)]
    pub meta_dir: Option<PathBuf>,
    /// Directory holding the named page templates (`viewall`); defaults
    /// to `<source_dir>/_styleguide`.
    #[serde(default)]
    pub styleguide_templates_dir: Option<PathBuf>,
    /// When true, data files and chrome get a unix-timestamp cache
    /// buster; when false the buster is `0`.
    #[serde(default = "default_true")]
    pub cache_buster: bool,
    /// Minimum viewport width for the ish viewport resizer.
    #[serde(default = "default_ish_minimum")]
    pub ish_minimum: u32,
    /// Maximum viewport width for the ish viewport resizer.
    #[serde(default = "default_ish_maximum")]
    pub ish_maximum: u32,
    /// Viewport controls hidden in the browser UI.
    #[serde(default)]
    pub ish_controls_hide: Vec<String>,
}

fn default_extension() -> String {
    "mustache".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ish_minimum() -> u32 {
    240
}

fn default_ish_maximum() -> u32 {
    2600
}

impl BuildConfig {
    /// Loads and validates a configuration file, anchoring relative
    /// paths to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.anchor(base);
        }
        config.validate()?;
        Ok(config)
    }

    fn anchor(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        rebase(&mut self.source_dir);
        rebase(&mut self.public_dir);
        if let Some(dir) = self.meta_dir.as_mut() {
            rebase(dir);
        }
        if let Some(dir) = self.styleguide_templates_dir.as_mut() {
            rebase(dir);
        }
    }

    fn validate(&self) -> Result<(), PatlabError> {
        if !self.source_dir.is_dir() {
            return Err(PatlabError::ConfigError {
                message: format!("source_dir does not exist: {}", self.source_dir.display()),
            });
        }
        if self.pattern_extension.is_empty() || self.pattern_extension.starts_with('.') {
            return Err(PatlabError::ConfigError {
                message: "pattern_extension must be a bare extension like \"mustache\"".to_string(),
            });
        }
        if self.ish_minimum >= self.ish_maximum {
            return Err(PatlabError::ConfigError {
                message: format!(
                    "ish_minimum ({}) must be below ish_maximum ({})",
                    self.ish_minimum, self.ish_maximum
                ),
            });
        }
        Ok(())
    }

    /// Where pattern source files live: `<source_dir>/_patterns`.
    pub fn pattern_source_dir(&self) -> PathBuf {
        self.source_dir.join("_patterns")
    }

    /// Where per-pattern artifacts are written: `<public_dir>/patterns`.
    pub fn pattern_public_dir(&self) -> PathBuf {
        self.public_dir.join("patterns")
    }

    /// The style-guide scaffold: `<public_dir>/styleguide/html`.
    pub fn styleguide_html_dir(&self) -> PathBuf {
        self.public_dir.join("styleguide").join("html")
    }

    /// Where the data files are written: `<public_dir>/styleguide/data`.
    pub fn styleguide_data_dir(&self) -> PathBuf {
        self.public_dir.join("styleguide").join("data")
    }

    /// Chrome template directory.
    pub fn meta_dir(&self) -> PathBuf {
        self.meta_dir
            .clone()
            .unwrap_or_else(|| self.source_dir.join("_meta"))
    }

    /// Named page template directory.
    pub fn styleguide_templates_dir(&self) -> PathBuf {
        self.styleguide_templates_dir
            .clone()
            .unwrap_or_else(|| self.source_dir.join("_styleguide"))
    }

    /// The cache-buster value stamped into chrome contexts and the
    /// config data file for this build pass.
    pub fn cache_buster_stamp(&self) -> u64 {
        if !self.cache_buster {
            return 0;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
