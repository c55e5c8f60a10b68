//! Rendering collaborators for the build orchestrator.
//!
//! The orchestrator only ever sees the [`RenderEngine`] trait: a named
//! page template (`viewall`) rendered with a data context, plus one-off
//! rendering of inline chrome templates. [`TeraRenderer`] is the Tera
//! backed implementation; tests substitute their own stub engines.
//!
//! [`PageChrome`] bundles the four wrapper templates that surround both
//! individual patterns and aggregate pages: the outer html head/foot and
//! the pattern head/foot.

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tera::{Context as TeraContext, Tera};
use tracing::debug;

/// Produces final HTML given a template and a data context.
pub trait RenderEngine {
    /// Renders a named page template (e.g. `viewall`).
    fn render(&self, template: &str, context: &TeraContext) -> Result<String>;

    /// Renders an inline template source, used for header/footer chrome.
    fn render_str(&self, source: &str, context: &TeraContext) -> Result<String>;
}

/// Renders the header wrapper for a pattern or aggregate page.
pub fn render_header(engine: &dyn RenderEngine, source: &str, context: &TeraContext) -> Result<String> {
    engine.render_str(source, context)
}

/// Renders the footer wrapper for a pattern or aggregate page.
pub fn render_footer(engine: &dyn RenderEngine, source: &str, context: &TeraContext) -> Result<String> {
    engine.render_str(source, context)
}

/// HTML-entity-encodes markup for the code-display artifact variants.
pub fn escape_html(markup: &str) -> String {
    tera::escape_html(markup)
}

/// Tera-backed [`RenderEngine`].
///
/// Page templates are registered under their file stem, so the template
/// file `viewall.html` is rendered as `viewall`. Autoescaping is off:
/// every value placed in a context here is markup that was already
/// rendered or explicitly escaped upstream.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Loads every file directly under `dir` as a named page template.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut templates = Vec::new();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template: {}", path.display()))?;
            debug!("registered page template {stem} from {}", path.display());
            templates.push((stem.to_string(), source));
        }
        Self::from_templates(templates)
    }

    /// Builds a renderer from `(name, source)` pairs.
    pub fn from_templates(templates: Vec<(String, String)>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        for (name, source) in &templates {
            tera.add_raw_template(name, source)
                .map_err(|e| anyhow!("Invalid template \"{name}\": {}", format_tera_error(&e)))?;
        }
        Ok(Self { tera })
    }
}

impl RenderEngine for TeraRenderer {
    fn render(&self, template: &str, context: &TeraContext) -> Result<String> {
        self.tera
            .render(template, context)
            .map_err(|e| anyhow!("Failed to render \"{template}\": {}", format_tera_error(&e)))
    }

    fn render_str(&self, source: &str, context: &TeraContext) -> Result<String> {
        Tera::one_off(source, context, false)
            .map_err(|e| anyhow!("Failed to render inline template: {}", format_tera_error(&e)))
    }
}

/// Walks a Tera error chain into one message, dropping the unhelpful
/// internal `__tera_one_off` template name.
fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = Vec::new();
    let mut current: Option<&dyn Error> = Some(error);
    while let Some(err) = current {
        let cleaned = err
            .to_string()
            .replace("'__tera_one_off'", "template")
            .trim()
            .to_string();
        if !cleaned.is_empty() {
            messages.push(cleaned);
        }
        current = err.source();
    }
    messages.join(": ")
}

/// The four wrapper templates surrounding pattern and aggregate pages.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    /// Outer `<head>` markup for the browser shell.
    pub html_head: String,
    /// Outer closing markup for the browser shell.
    pub html_foot: String,
    /// Header wrapper rendered above pattern/aggregate bodies.
    pub pattern_head: String,
    /// Footer wrapper rendered below pattern/aggregate bodies.
    pub pattern_foot: String,
}

impl PageChrome {
    /// Loads the chrome templates from the configured meta directory.
    ///
    /// Expects `html-head.html`, `html-foot.html`, `pattern-head.html`
    /// and `pattern-foot.html` to exist there.
    pub fn load(meta_dir: &Path) -> Result<Self> {
        let read = |file: &str| -> Result<String> {
            let path = meta_dir.join(file);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read chrome template: {}", path.display()))
        };
        Ok(Self {
            html_head: read("html-head.html")?,
            html_foot: read("html-foot.html")?,
            pattern_head: read("pattern-head.html")?,
            pattern_foot: read("pattern-foot.html")?,
        })
    }
}
