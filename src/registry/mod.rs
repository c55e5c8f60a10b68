//! The pattern registry: an ordered, read-only snapshot of every pattern
//! record known to a build.
//!
//! Records are produced once per build cycle (how the snapshot is
//! populated is out of scope here; the CLI loads a prebuilt JSON
//! snapshot, library callers construct one programmatically) and stay
//! immutable for the duration of the build. Registry order is the
//! iteration order everywhere: it decides the stacking order of partials
//! in view-all pages and the first-match winner for dash-shorthand
//! lookups.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::PatlabError;

/// The category of a registry entry.
///
/// `Pattern` is a leaf renderable unit; `PatternType` and
/// `PatternSubtype` are aggregation nodes that denote a scope for a
/// "view all" page and have no body of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternCategory {
    Pattern,
    PatternType,
    PatternSubtype,
}

/// A single entry in the pattern registry.
///
/// Field names mirror the JSON snapshot format (camelCase). The three
/// path-shaped fields are: `pathDash`, the dash-joined output directory
/// name; `pathName`, the engine-relative source path; and `pathOrig`,
/// the original source path used when the record is a generated
/// pseudo-pattern variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    /// Canonical identifier used as the lookup key, e.g. `atoms-button`.
    /// Unique within the registry.
    pub partial: String,
    pub category: PatternCategory,
    pub path_dash: String,
    pub path_name: String,
    #[serde(default)]
    pub path_orig: String,
    /// Hidden leaf patterns are excluded from individual emission and
    /// from aggregation.
    #[serde(default)]
    pub hidden: bool,
    /// Pseudo-patterns resolve their source through `pathOrig`.
    #[serde(default)]
    pub is_pseudo: bool,
    /// The already-rendered pattern body.
    #[serde(default)]
    pub code: String,
    /// Wrapper markup placed before the body in the full artifact.
    #[serde(default)]
    pub header: String,
    /// Wrapper markup placed after the body in the full artifact.
    #[serde(default)]
    pub footer: String,
    /// Pattern type this record belongs to (e.g. `atoms`).
    #[serde(rename = "type")]
    pub pattern_type: String,
    #[serde(default)]
    pub type_dash: String,
    /// Subtype a leaf pattern belongs to; empty for patterns directly
    /// under a type and for aggregation nodes.
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub subtype_dash: String,
    /// Display name of the pattern, type, or subtype.
    pub name: String,
    #[serde(default)]
    pub name_dash: String,
}

impl PatternRecord {
    /// The engine-relative source path used for file resolution:
    /// `pathOrig` for pseudo-patterns, `pathName` otherwise.
    pub fn source_path(&self) -> &str {
        if self.is_pseudo { &self.path_orig } else { &self.path_name }
    }

    /// Whether this record is a leaf pattern that takes part in emission
    /// and aggregation.
    pub fn is_renderable(&self) -> bool {
        self.category == PatternCategory::Pattern && !self.hidden
    }
}

/// Ordered collection of [`PatternRecord`]s for one build.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    records: Vec<PatternRecord>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from records, rejecting duplicate partial keys.
    pub fn from_records(records: Vec<PatternRecord>) -> Result<Self, PatlabError> {
        let mut registry = Self::new();
        for record in records {
            registry.insert(record)?;
        }
        Ok(registry)
    }

    /// Loads a registry snapshot from a JSON file (an array of records).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = crate::utils::read_to_string(path)?;
        let records: Vec<PatternRecord> = serde_json::from_str(&text)
            .with_context(|| format!("Invalid registry snapshot: {}", path.display()))?;
        Ok(Self::from_records(records)?)
    }

    /// Appends a record, preserving insertion order.
    ///
    /// # Errors
    ///
    /// [`PatlabError::DuplicatePartial`] when the partial key is already
    /// registered.
    pub fn insert(&mut self, record: PatternRecord) -> Result<(), PatlabError> {
        if self.records.iter().any(|r| r.partial == record.partial) {
            return Err(PatlabError::DuplicatePartial {
                partial: record.partial,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Iterates records in registry (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the given type (by dash name) has at least one registered
    /// subtype. Type-level view-all pages are emitted only when it does.
    pub fn has_pattern_subtype(&self, type_dash: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.category == PatternCategory::PatternSubtype && r.type_dash == type_dash)
    }

    /// The dash-shorthand lookup table consumed by the template loader:
    /// `(partial, source path)` pairs for every leaf pattern, in registry
    /// order.
    pub fn pattern_path_lookup(&self) -> Vec<(String, String)> {
        self.records
            .iter()
            .filter(|r| r.category == PatternCategory::Pattern)
            .map(|r| (r.partial.clone(), r.source_path().to_string()))
            .collect()
    }

    /// The distinct pattern types, in first-seen order.
    pub fn pattern_types(&self) -> Vec<&PatternRecord> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| r.category == PatternCategory::PatternType)
            .filter(|r| seen.insert(r.name_dash.as_str()))
            .collect()
    }
}
