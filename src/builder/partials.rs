//! Partial aggregation: collecting the rendered bodies of every leaf
//! pattern in a scope, in registry order.
//!
//! A scope is the whole library (no arguments), a single type, or an
//! exact (type, subtype) pair. Aggregation only ever yields non-hidden
//! leaf patterns; aggregation nodes are never included. An empty result
//! is not an error: callers skip page emission for empty scopes.

use serde::Serialize;

use crate::registry::PatternRegistry;

/// One aggregated pattern entry, ready for the `viewall` page template.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPartial {
    /// Partial key, used for DOM hooks in the view-all markup.
    pub pattern_partial: String,
    /// Display name of the pattern.
    pub pattern_name: String,
    /// Link to the pattern's standalone page, relative to the pattern
    /// output root.
    pub pattern_link: String,
    /// The pattern's already-rendered body.
    pub pattern_partial_code: String,
}

/// Aggregation scope: whole library, one type, or one (type, subtype).
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope<'a> {
    pub pattern_type: Option<&'a str>,
    pub pattern_subtype: Option<&'a str>,
}

impl<'a> Scope<'a> {
    /// The full-library scope.
    pub fn all() -> Self {
        Self::default()
    }

    /// Every subtype of one type.
    pub fn of_type(pattern_type: &'a str) -> Self {
        Self {
            pattern_type: Some(pattern_type),
            pattern_subtype: None,
        }
    }

    /// One exact (type, subtype) pair.
    pub fn of_subtype(pattern_type: &'a str, pattern_subtype: &'a str) -> Self {
        Self {
            pattern_type: Some(pattern_type),
            pattern_subtype: Some(pattern_subtype),
        }
    }
}

/// Collects the rendered partials of every matching, non-hidden leaf
/// pattern, in registry order.
pub fn collect(registry: &PatternRegistry, scope: Scope<'_>) -> Vec<RenderedPartial> {
    registry
        .iter()
        .filter(|record| record.is_renderable())
        .filter(|record| scope.pattern_type.is_none_or(|t| record.pattern_type == t))
        .filter(|record| scope.pattern_subtype.is_none_or(|s| record.subtype == s))
        .map(|record| RenderedPartial {
            pattern_partial: record.partial.clone(),
            pattern_name: record.name.clone(),
            pattern_link: format!("{0}/{0}.html", record.path_dash),
            pattern_partial_code: record.code.clone(),
        })
        .collect()
}
