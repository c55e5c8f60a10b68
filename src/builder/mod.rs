//! The build orchestrator.
//!
//! Drives one full build pass over the registry snapshot:
//!
//! 1. **Per-pattern emission** - every non-hidden leaf pattern gets three
//!    artifacts under its dash path: the full page (header + body +
//!    footer), the escaped body for code display, and the escaped raw
//!    engine source resolved through the template loader.
//! 2. **Aggregate emission** - a view-all `index.html` for every subtype
//!    and for every type that has at least one subtype, composed from
//!    the partials in scope. Empty scopes emit nothing; two nodes
//!    claiming the same output path abort the build.
//! 3. **Style-guide emission** - the full-library aggregate page,
//!    skipped with a diagnostic when the output scaffold is missing.
//! 4. **Index/data emission** - the `styleguide/data/*.js` files from
//!    the exporters and process configuration.
//!
//! The pass is single-threaded and best-effort: a resolution failure for
//! one record is recorded on the [`BuildReport`] and the pass moves on,
//! while write failures abort the build with completed artifacts left in
//! place. Aggregation reads each pattern's body from the registry
//! snapshot, never from the just-written files, so step ordering only
//! affects what lands on disk, not what aggregate pages contain.
//!
//! Note that the orchestrator holds its collaborators by reference; it
//! has no state of its own beyond the report it returns, and a pass can
//! be rerun at any time (reruns are idempotent given unchanged inputs).

pub mod exporters;
pub mod partials;

use anyhow::{Context, Result};
use serde_json::json;
use std::collections::HashSet;
use std::path::Path;
use tera::Context as TeraContext;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::core::{BuildReport, PatlabError};
use crate::loader::TemplateLoader;
use crate::registry::{PatternCategory, PatternRegistry};
use crate::render::{PageChrome, RenderEngine, escape_html, render_footer, render_header};

use partials::{RenderedPartial, Scope};

/// Name of the page template used for view-all pages and the style
/// guide.
const VIEWALL_TEMPLATE: &str = "viewall";

/// Orchestrates one build pass. All collaborators are injected; the
/// builder owns nothing but the pass itself.
pub struct Builder<'a> {
    config: &'a BuildConfig,
    registry: &'a PatternRegistry,
    loader: &'a TemplateLoader,
    engine: &'a dyn RenderEngine,
    chrome: &'a PageChrome,
}

impl<'a> Builder<'a> {
    pub fn new(
        config: &'a BuildConfig,
        registry: &'a PatternRegistry,
        loader: &'a TemplateLoader,
        engine: &'a dyn RenderEngine,
        chrome: &'a PageChrome,
    ) -> Self {
        Self {
            config,
            registry,
            loader,
            engine,
            chrome,
        }
    }

    /// Runs the four build steps in order and returns the report.
    ///
    /// # Errors
    ///
    /// Filesystem write failures and aggregate path collisions are
    /// fatal; everything written before the failure stays in place.
    pub fn build(&self) -> Result<BuildReport> {
        let mut report = BuildReport::new();
        let cache_buster = self.config.cache_buster_stamp();

        self.generate_patterns(&mut report)?;
        self.generate_view_all_pages(cache_buster, &mut report)?;
        self.generate_styleguide(cache_buster, &mut report)?;
        self.generate_index(cache_buster)?;

        info!(
            patterns = report.patterns_written,
            view_all = report.view_all_written,
            skipped = report.diagnostics.len(),
            "build pass complete"
        );
        Ok(report)
    }

    /// Step 1: write the three artifacts for every renderable pattern.
    fn generate_patterns(&self, report: &mut BuildReport) -> Result<()> {
        let public_dir = self.config.pattern_public_dir();
        crate::utils::ensure_dir(&public_dir)?;

        for record in self.registry.iter().filter(|r| r.is_renderable()) {
            // The raw engine source is the only part that needs disk; a
            // resolution failure is local to this record.
            let source = match self.loader.get_source(record.source_path()) {
                Ok(source) => source,
                Err(err) => {
                    report.skip(&record.partial, err.to_string());
                    continue;
                }
            };

            let markup_full = format!("{}{}{}", record.header, record.code, record.footer);
            let markup_escaped = escape_html(&record.code);
            let source_escaped = escape_html(&source);

            let path = &record.path_dash;
            let pattern_dir = public_dir.join(path);
            crate::utils::ensure_dir(&pattern_dir)?;

            crate::utils::write_file(&pattern_dir.join(format!("{path}.html")), &markup_full)?;
            crate::utils::write_file(
                &pattern_dir.join(format!("{path}.escaped.html")),
                &markup_escaped,
            )?;
            crate::utils::write_file(
                &pattern_dir.join(format!("{path}.{}", self.config.pattern_extension)),
                &source_escaped,
            )?;

            debug!("wrote pattern artifacts for {}", record.partial);
            report.patterns_written += 1;
        }
        Ok(())
    }

    /// Step 2: write a view-all page per subtype, and per type with at
    /// least one subtype.
    fn generate_view_all_pages(&self, cache_buster: u64, report: &mut BuildReport) -> Result<()> {
        let public_dir = self.config.pattern_public_dir();
        let mut claimed_paths: HashSet<String> = HashSet::new();

        for record in self.registry.iter() {
            let (scope, partial_id) = match record.category {
                PatternCategory::PatternSubtype => (
                    Scope::of_subtype(&record.pattern_type, &record.name),
                    format!("viewall-{}-{}", record.type_dash, record.name_dash),
                ),
                PatternCategory::PatternType
                    if self.registry.has_pattern_subtype(&record.name_dash) =>
                {
                    (
                        Scope::of_type(&record.name),
                        format!("viewall-{}-all", record.name_dash),
                    )
                }
                _ => continue,
            };

            let collected = partials::collect(self.registry, scope);
            if collected.is_empty() {
                continue;
            }

            if !claimed_paths.insert(record.path_dash.clone()) {
                return Err(PatlabError::OutputPathCollision {
                    path: record.path_dash.clone(),
                }
                .into());
            }

            let page = self.render_aggregate(&collected, Some(&partial_id), cache_buster)?;
            let dir = public_dir.join(&record.path_dash);
            crate::utils::ensure_dir(&dir)?;
            crate::utils::write_file(&dir.join("index.html"), &page)?;

            debug!("wrote view-all page {partial_id}");
            report.view_all_written += 1;
        }
        Ok(())
    }

    /// Step 3: write the full-library style guide, or skip with a
    /// diagnostic when the scaffold is absent.
    fn generate_styleguide(&self, cache_buster: u64, report: &mut BuildReport) -> Result<()> {
        let html_dir = self.config.styleguide_html_dir();
        if !html_dir.is_dir() {
            report.skip(
                "styleguide",
                format!(
                    "the style guide wasn't written out; make sure {} exists",
                    html_dir.display()
                ),
            );
            return Ok(());
        }

        let collected = partials::collect(self.registry, Scope::all());
        let page = self.render_aggregate(&collected, None, cache_buster)?;
        crate::utils::write_file(&html_dir.join("styleguide.html"), &page)?;

        report.styleguide_written = true;
        Ok(())
    }

    /// Step 4: write the data files consumed by the browser UI. This
    /// step has no render dependency.
    fn generate_index(&self, cache_buster: u64) -> Result<()> {
        let data_dir = self.config.styleguide_data_dir();
        crate::utils::ensure_dir(&data_dir)?;

        let config_data = json!({
            "cacheBuster": cache_buster,
            "ishMinimum": self.config.ish_minimum,
            "ishMaximum": self.config.ish_maximum,
        });
        write_data_file(&data_dir, "config.js", "config", &config_data)?;

        let media_queries = exporters::gather_media_queries(&self.config.source_dir)?;
        let ish = exporters::ish_controls(&self.config.ish_controls_hide, media_queries);
        write_data_file(&data_dir, "ish-controls.js", "ishControls", &ish)?;

        let nav = serde_json::to_value(exporters::nav_items(self.registry))
            .context("Failed to serialize nav items")?;
        write_data_file(&data_dir, "nav-items.js", "navItems", &nav)?;

        write_data_file(
            &data_dir,
            "pattern-paths.js",
            "patternPaths",
            &exporters::pattern_paths(self.registry),
        )?;
        write_data_file(
            &data_dir,
            "viewall-paths.js",
            "viewAllPaths",
            &exporters::view_all_paths(self.registry),
        )?;
        write_data_file(
            &data_dir,
            "lookup-partials.js",
            "lookupPartials",
            &exporters::lookup_partials(self.registry),
        )?;
        Ok(())
    }

    /// Composes an aggregate page: chrome header, the `viewall` template
    /// over the collected partials, chrome footer.
    ///
    /// `partial_id` identifies the aggregate in the injected pattern
    /// data (`viewall-<type>[-<subtype>|-all]`); the style guide passes
    /// `None` and gets empty pattern data.
    fn render_aggregate(
        &self,
        collected: &[RenderedPartial],
        partial_id: Option<&str>,
        cache_buster: u64,
    ) -> Result<String> {
        let pattern_data = match partial_id {
            Some(id) => json!({ "patternPartial": id }),
            None => json!({}),
        };

        let mut shell_ctx = TeraContext::new();
        shell_ctx.insert("cacheBuster", &cache_buster);
        let lab_head = render_header(self.engine, &self.chrome.html_head, &shell_ctx)?;
        shell_ctx.insert("patternData", &pattern_data.to_string());
        let lab_foot = render_footer(self.engine, &self.chrome.html_foot, &shell_ctx)?;

        let mut page_ctx = TeraContext::new();
        page_ctx.insert("partials", collected);
        page_ctx.insert("cacheBuster", &cache_buster);
        if let Some(id) = partial_id {
            page_ctx.insert("patternPartial", id);
        }
        page_ctx.insert("patternLabHead", &lab_head);
        page_ctx.insert("patternLabFoot", &lab_foot);

        let header = render_header(self.engine, &self.chrome.pattern_head, &page_ctx)?;
        let code = self.engine.render(VIEWALL_TEMPLATE, &page_ctx)?;
        let footer = render_footer(self.engine, &self.chrome.pattern_foot, &page_ctx)?;

        Ok(format!("{header}{code}{footer}"))
    }
}

/// Writes a `var <name> = <json>;` data file for the browser UI.
fn write_data_file(
    dir: &Path,
    file: &str,
    var_name: &str,
    value: &serde_json::Value,
) -> Result<()> {
    let payload = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize data file {file}"))?;
    crate::utils::write_file(&dir.join(file), &format!("var {var_name} = {payload};"))
}
