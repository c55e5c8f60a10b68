//! The `build` subcommand: wire the collaborators together and run one
//! build pass.
//!
//! Initialization order matters and is explicit here: the registry
//! snapshot supplies the dash-shorthand lookup table the loader needs,
//! the loader gets the pattern source tree as its main search root, and
//! the orchestrator receives everything by reference.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::builder::Builder;
use crate::config::BuildConfig;
use crate::loader::{MAIN_NAMESPACE, TemplateLoader};
use crate::registry::PatternRegistry;
use crate::render::{PageChrome, TeraRenderer};

/// Arguments for `patlab build`.
#[derive(Args)]
pub struct BuildCommand {
    /// Path to the build configuration file
    #[arg(long, short, default_value = "patlab.toml")]
    config: PathBuf,

    /// Path to the registry snapshot (a JSON array of pattern records)
    #[arg(long, short, default_value = "pattern-data.json")]
    registry: PathBuf,
}

impl BuildCommand {
    pub fn execute(self) -> Result<()> {
        let config = BuildConfig::load(&self.config)?;
        let registry = PatternRegistry::from_json_file(&self.registry)?;

        let mut loader =
            TemplateLoader::new(&config.pattern_extension, registry.pattern_path_lookup());
        loader.add_path(config.pattern_source_dir(), MAIN_NAMESPACE)?;

        let engine = TeraRenderer::from_dir(&config.styleguide_templates_dir())?;
        let chrome = PageChrome::load(&config.meta_dir())?;

        let builder = Builder::new(&config, &registry, &loader, &engine, &chrome);
        let report = builder.build()?;
        report.display();
        Ok(())
    }
}
