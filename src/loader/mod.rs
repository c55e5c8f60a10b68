//! Template resolution across namespaced search paths.
//!
//! The [`TemplateLoader`] maps a logical pattern identifier to a concrete
//! source file on disk. Identifiers are first stripped of their style
//! modifier and parameter qualifiers, then turned into an engine-relative
//! file name (see [`identifier`]), and finally resolved against the
//! ordered search roots of their namespace. The default namespace is
//! [`MAIN_NAMESPACE`]; additional namespaces are addressed with a leading
//! `@` marker (`@widgets/button`).
//!
//! # Resolution semantics
//!
//! - Separators are normalized to `/` and repeated separators collapsed
//!   before anything else.
//! - Validation (null-byte check, traversal-depth check) happens before
//!   the filesystem walk, so malformed identifiers never touch disk.
//! - Roots are walked in registration order; the first root containing
//!   the shortname wins.
//! - Successful resolutions are memoized under the normalized identifier.
//!   The cache is cleared by every search-path mutation, so a cache hit
//!   always reflects the current path table.
//!
//! The loader is single-threaded; parallelizing callers would need to
//! put the resolution cache behind a lock.

pub mod error;
pub mod identifier;

pub use error::LoaderError;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use tracing::debug;

/// Identifier of the main namespace.
pub const MAIN_NAMESPACE: &str = "__main__";

/// Resolves logical template identifiers to files under namespaced
/// search-path roots, with a memoizing resolution cache.
pub struct TemplateLoader {
    /// Ordered search roots per namespace. Order is significant: the
    /// first root containing a template wins.
    paths: HashMap<String, Vec<PathBuf>>,
    /// Memoized resolutions, keyed by normalized identifier. Never a
    /// source of truth; cleared on every path-table mutation.
    cache: RefCell<HashMap<String, PathBuf>>,
    /// Registry-supplied `(dashedName, path)` pairs for shorthand lookup.
    pattern_paths: Vec<(String, String)>,
    /// Template file extension, including the leading dot.
    extension: String,
}

impl TemplateLoader {
    /// Creates a loader with no search roots registered.
    ///
    /// `extension` is the template file extension (a missing leading dot
    /// is added); `pattern_paths` is the registry-order lookup table used
    /// to resolve dash-joined shorthand identifiers.
    pub fn new(extension: &str, pattern_paths: Vec<(String, String)>) -> Self {
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };
        Self {
            paths: HashMap::new(),
            cache: RefCell::new(HashMap::new()),
            pattern_paths,
            extension,
        }
    }

    /// Returns the search roots registered for a namespace.
    pub fn get_paths(&self, namespace: &str) -> &[PathBuf] {
        self.paths.get(namespace).map_or(&[], Vec::as_slice)
    }

    /// Returns the registered namespace names.
    pub fn namespaces(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    /// Replaces the whole root list for a namespace.
    ///
    /// Invalidates the resolution cache. Fails with
    /// [`LoaderError::InvalidRoot`] on the first root that is not an
    /// existing directory; earlier roots in the list stay registered.
    pub fn set_paths(
        &mut self,
        roots: Vec<PathBuf>,
        namespace: &str,
    ) -> Result<(), LoaderError> {
        self.cache.borrow_mut().clear();
        self.paths.insert(namespace.to_string(), Vec::new());
        for root in roots {
            self.add_path(root, namespace)?;
        }
        Ok(())
    }

    /// Appends a search root to a namespace, registering the namespace if
    /// needed.
    ///
    /// The cache is invalidated even when registration fails, matching
    /// the invariant that any path-table mutation attempt clears it.
    pub fn add_path(&mut self, root: PathBuf, namespace: &str) -> Result<(), LoaderError> {
        self.cache.borrow_mut().clear();

        if !root.is_dir() {
            return Err(LoaderError::InvalidRoot { path: root });
        }

        self.paths.entry(namespace.to_string()).or_default().push(root);
        Ok(())
    }

    /// Prepends a search root so it is searched before existing roots.
    pub fn prepend_path(&mut self, root: PathBuf, namespace: &str) -> Result<(), LoaderError> {
        self.cache.borrow_mut().clear();

        if !root.is_dir() {
            return Err(LoaderError::InvalidRoot { path: root });
        }

        self.paths.entry(namespace.to_string()).or_default().insert(0, root);
        Ok(())
    }

    /// Resolves an identifier to an absolute template path.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::MalformedIdentifier`] for null bytes, a
    ///   namespaced name with no `/`, or `..` traversal below the root.
    /// - [`LoaderError::TemplateNotFound`] when the namespace is
    ///   unregistered or no root contains the shortname.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, LoaderError> {
        let info = identifier::parse_partial(name);
        let file_name = identifier::file_name(&info.partial, &self.extension, &self.pattern_paths);
        let normalized = normalize_name(&file_name);

        if let Some(hit) = self.cache.borrow().get(&normalized) {
            return Ok(hit.clone());
        }

        validate_name(&normalized)?;

        let (namespace, shortname) = split_namespace(&normalized)?;

        let Some(roots) = self.paths.get(namespace) else {
            return Err(LoaderError::not_found(
                &normalized,
                format!("there are no registered paths for namespace \"{namespace}\""),
            ));
        };

        for root in roots {
            let candidate = root.join(shortname);
            if candidate.is_file() {
                debug!("resolved template {normalized} -> {}", candidate.display());
                self.cache.borrow_mut().insert(normalized, candidate.clone());
                return Ok(candidate);
            }
        }

        let searched = roots
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(LoaderError::not_found(&normalized, format!("looked into: {searched}")))
    }

    /// Whether an identifier resolves to an existing template.
    ///
    /// Resolution errors are converted to `false`; this is the cheap
    /// existence check, not an error path.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Resolves an identifier and reads the template source.
    pub fn get_source(&self, name: &str) -> Result<String, LoaderError> {
        let path = self.resolve(name)?;
        fs::read_to_string(&path).map_err(|source| LoaderError::Io { path, source })
    }

    /// Whether the resolved template was last modified at or before
    /// `since`.
    pub fn is_fresh(&self, name: &str, since: SystemTime) -> Result<bool, LoaderError> {
        let path = self.resolve(name)?;
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|source| LoaderError::Io { path, source })?;
        Ok(modified <= since)
    }

    /// Drops all memoized resolutions.
    ///
    /// Called between build passes in watch mode; resolution itself never
    /// mutates the path table, only adds cache entries.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

/// Normalizes separators to `/` and collapses repeated separators.
fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut prev_sep = false;
    for ch in name.chars() {
        let sep = ch == '/' || ch == '\\';
        if sep {
            if !prev_sep {
                normalized.push('/');
            }
        } else {
            normalized.push(ch);
        }
        prev_sep = sep;
    }
    normalized
}

/// Rejects null bytes and `..` traversal that would walk above the root.
///
/// Depth runs across segments: `..` decrements, `.` is neutral, anything
/// else increments. Depth must never go negative, so `a/../b` passes and
/// `a/../../b` fails.
fn validate_name(name: &str) -> Result<(), LoaderError> {
    if name.contains('\0') {
        return Err(LoaderError::malformed(name.replace('\0', "\\0"), "template names cannot contain NUL bytes"));
    }

    let mut level: i32 = 0;
    for part in name.trim_start_matches('/').split('/') {
        match part {
            ".." => level -= 1,
            "." => {}
            _ => level += 1,
        }
        if level < 0 {
            return Err(LoaderError::malformed(
                name,
                "the name points outside the configured directories",
            ));
        }
    }
    Ok(())
}

/// Splits a normalized name into `(namespace, shortname)`.
fn split_namespace(name: &str) -> Result<(&str, &str), LoaderError> {
    if let Some(rest) = name.strip_prefix('@') {
        let Some(pos) = rest.find('/') else {
            return Err(LoaderError::malformed(
                name,
                "expected \"@namespace/template_name\"",
            ));
        };
        Ok((&rest[..pos], &rest[pos + 1..]))
    } else {
        Ok((MAIN_NAMESPACE, name))
    }
}
