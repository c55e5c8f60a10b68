//! Exporters for the browser-UI data files.
//!
//! These produce the JSON payloads written under
//! `styleguide/data/*.js`: navigation items, pattern and view-all path
//! lookups, the partial-to-source lookup, and the media queries
//! harvested from the source stylesheets. They are queries over the
//! registry snapshot and the source tree; none of them depend on
//! rendering.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

use crate::registry::{PatternCategory, PatternRegistry};

/// A leaf entry in the navigation tree.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub pattern_partial: String,
    pub pattern_name: String,
    pub pattern_path: String,
}

/// A subtype bucket in the navigation tree.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSubtype {
    pub pattern_subtype_lc: String,
    pub pattern_subtype_uc: String,
    pub pattern_subtype_dash: String,
    pub pattern_subtype_items: Vec<NavItem>,
}

/// A top-level type bucket in the navigation tree.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavType {
    pub pattern_type_lc: String,
    pub pattern_type_uc: String,
    pub pattern_type_dash: String,
    pub pattern_type_items: Vec<NavSubtype>,
    pub pattern_items: Vec<NavItem>,
}

fn title_case(name: &str) -> String {
    name.split(['-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn nav_item(partial: &str, name: &str, path_dash: &str) -> NavItem {
    NavItem {
        pattern_partial: partial.to_string(),
        pattern_name: title_case(name),
        pattern_path: format!("{path_dash}/{path_dash}.html"),
    }
}

/// Builds the navigation tree: one bucket per pattern type, with its
/// subtypes and any patterns that sit directly under the type.
pub fn nav_items(registry: &PatternRegistry) -> Vec<NavType> {
    registry
        .pattern_types()
        .into_iter()
        .map(|type_record| {
            let subtypes = registry
                .iter()
                .filter(|r| {
                    r.category == PatternCategory::PatternSubtype
                        && r.type_dash == type_record.name_dash
                })
                .map(|subtype_record| NavSubtype {
                    pattern_subtype_lc: subtype_record.name.to_lowercase(),
                    pattern_subtype_uc: title_case(&subtype_record.name),
                    pattern_subtype_dash: subtype_record.name_dash.clone(),
                    pattern_subtype_items: registry
                        .iter()
                        .filter(|r| {
                            r.is_renderable()
                                && r.type_dash == type_record.name_dash
                                && r.subtype_dash == subtype_record.name_dash
                        })
                        .map(|r| nav_item(&r.partial, &r.name, &r.path_dash))
                        .collect(),
                })
                .collect();

            let direct_items = registry
                .iter()
                .filter(|r| {
                    r.is_renderable() && r.type_dash == type_record.name_dash && r.subtype.is_empty()
                })
                .map(|r| nav_item(&r.partial, &r.name, &r.path_dash))
                .collect();

            NavType {
                pattern_type_lc: type_record.name.to_lowercase(),
                pattern_type_uc: title_case(&type_record.name),
                pattern_type_dash: type_record.name_dash.clone(),
                pattern_type_items: subtypes,
                pattern_items: direct_items,
            }
        })
        .collect()
}

/// Maps each pattern type to its patterns' output directories:
/// `{ typeDash: { nameDash: pathDash } }`.
pub fn pattern_paths(registry: &PatternRegistry) -> Value {
    let mut by_type = Map::new();
    for record in registry.iter().filter(|r| r.is_renderable()) {
        let entry = by_type
            .entry(record.type_dash.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(names) = entry {
            names.insert(record.name_dash.clone(), Value::String(record.path_dash.clone()));
        }
    }
    Value::Object(by_type)
}

/// Maps each type with subtypes to its view-all pages:
/// `{ typeDash: { "all": typePathDash, subtypeDash: subtypePathDash } }`.
pub fn view_all_paths(registry: &PatternRegistry) -> Value {
    let mut by_type = Map::new();

    for record in registry.iter() {
        match record.category {
            PatternCategory::PatternType => {
                if registry.has_pattern_subtype(&record.name_dash) {
                    let entry = by_type
                        .entry(record.name_dash.clone())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(paths) = entry {
                        paths.insert("all".to_string(), Value::String(record.path_dash.clone()));
                    }
                }
            }
            PatternCategory::PatternSubtype => {
                let entry = by_type
                    .entry(record.type_dash.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(paths) = entry {
                    paths.insert(record.name_dash.clone(), Value::String(record.path_dash.clone()));
                }
            }
            PatternCategory::Pattern => {}
        }
    }

    Value::Object(by_type)
}

/// Maps each partial key to its engine-relative source path.
pub fn lookup_partials(registry: &PatternRegistry) -> Value {
    let mut lookup = Map::new();
    for record in registry.iter() {
        if record.category == PatternCategory::Pattern {
            lookup.insert(record.partial.clone(), Value::String(record.path_name.clone()));
        }
    }
    Value::Object(lookup)
}

/// The ish viewport-control payload: hidden controls plus the media
/// queries found in the source stylesheets.
pub fn ish_controls(hide: &[String], media_queries: Vec<String>) -> Value {
    json!({
        "ishControlsHide": hide,
        "mqs": media_queries,
    })
}

/// Harvests `min-width`/`max-width` values (px or em) from every `.css`
/// file under the source tree, deduplicated and natural-sorted.
pub fn gather_media_queries(source_dir: &Path) -> Result<Vec<String>> {
    let re = Regex::new(r"(?:min|max)-width:\s*([0-9]{1,5}(?:\.[0-9]{1,20})?(?:px|em))")?;

    let mut queries: Vec<String> = Vec::new();
    for entry in WalkDir::new(source_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "css") {
            continue;
        }
        let data = crate::utils::read_to_string(path)?;
        for capture in re.captures_iter(&data) {
            let value = capture[1].to_string();
            if !queries.contains(&value) {
                trace!("found media query {value} in {}", path.display());
                queries.push(value);
            }
        }
    }

    queries.sort_by(|a, b| natural_compare(a, b));
    Ok(queries)
}

/// Orders media-query strings by numeric value first, then textually,
/// so `1024px` sorts after `768px` instead of before it.
fn natural_compare(a: &str, b: &str) -> std::cmp::Ordering {
    let numeric = |s: &str| -> f64 {
        let end = s
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(s.len());
        s[..end].parse().unwrap_or(0.0)
    };
    numeric(a)
        .partial_cmp(&numeric(b))
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.cmp(b))
}
