//! Pattern identifier parsing.
//!
//! A raw pattern identifier can carry two optional trailing qualifiers:
//! a style modifier after `:` (e.g. a pseudo-state such as `hover`) and a
//! parameter list in trailing parentheses. Both are stripped before path
//! resolution and are opaque to the loader.
//!
//! The remaining identifier is either an engine-relative file name
//! (contains a path separator), a dash-joined shorthand like
//! `atoms-button` that is resolved through the registry-supplied lookup
//! table, or a bare file name used as-is. The configured template
//! extension is appended when missing.
//!
//! These functions are pure: the only external state they consult is the
//! dash-to-path lookup table passed in by the caller.

/// The structural parts of a raw pattern identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialInfo {
    /// The identifier with any style modifier and parameter suffix removed.
    pub partial: String,
    /// Optional trailing style modifier (`partial:modifier`).
    pub style_modifier: Option<String>,
    /// Optional trailing parameter list (`partial(key: value, ...)`).
    pub parameters: Vec<(String, String)>,
}

/// Decomposes a raw identifier into `(partial, styleModifier, parameters)`.
///
/// The parameter suffix is stripped first (everything from the first `(`
/// up to the last `)`), then the style modifier (everything after the
/// first `:` in what remains). Neither qualifier is interpreted here.
pub fn parse_partial(raw: &str) -> PartialInfo {
    let mut partial = raw;
    let mut parameters = Vec::new();

    if let Some(open) = partial.find('(') {
        let rest = &partial[open + 1..];
        let params_str = match rest.rfind(')') {
            Some(close) => &rest[..close],
            None => rest,
        };
        parameters = parse_parameters(params_str);
        partial = partial[..open].trim_end();
    }

    let style_modifier = match partial.split_once(':') {
        Some((name, modifier)) => {
            partial = name;
            Some(modifier.to_string())
        }
        None => None,
    };

    PartialInfo {
        partial: partial.to_string(),
        style_modifier,
        parameters,
    }
}

/// Parses a `key: value, key: value` parameter string.
///
/// Values may be single- or double-quoted; quotes are stripped. A bare
/// key with no `:` maps to an empty value.
fn parse_parameters(params: &str) -> Vec<(String, String)> {
    params
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once(':') {
            Some((key, value)) => (key.trim().to_string(), unquote(value.trim()).to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value)
}

/// Looks up the engine-relative path for a dash-joined shorthand.
///
/// The lookup table is an ordered list of `(dashedName, path)` pairs in
/// registry order; the first entry with a matching dashed name wins.
pub fn pattern_file_name<'a>(dashed: &str, pattern_paths: &'a [(String, String)]) -> Option<&'a str> {
    pattern_paths
        .iter()
        .find(|(name, _)| name == dashed)
        .map(|(_, path)| path.as_str())
}

/// Turns a logical identifier into a template file name.
///
/// A shorthand with no path separator but at least one dash is resolved
/// through the lookup table; anything else is already a file name. The
/// template extension is appended when not already present. An unresolved
/// shorthand falls through unchanged so the loader reports it as a
/// missing template rather than an empty name.
pub fn file_name(name: &str, extension: &str, pattern_paths: &[(String, String)]) -> String {
    let has_separator = name.contains('/') || name.contains('\\');
    let has_dash = name.contains('-');

    let mut file_name = if !has_separator && has_dash {
        pattern_file_name(name, pattern_paths)
            .unwrap_or(name)
            .to_string()
    } else {
        name.to_string()
    };

    if !file_name.ends_with(extension) {
        file_name.push_str(extension);
    }

    file_name
}
