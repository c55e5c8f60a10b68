//! End-to-end build passes through the library API with the real Tera
//! renderer.

use std::fs;

use patlab_cli::builder::Builder;
use patlab_cli::config::BuildConfig;
use patlab_cli::loader::{MAIN_NAMESPACE, TemplateLoader};
use patlab_cli::registry::PatternRegistry;
use patlab_cli::render::{PageChrome, TeraRenderer};

use crate::common;

struct BuildEnv {
    config: BuildConfig,
    registry: PatternRegistry,
}

fn build_env(root: &std::path::Path) -> BuildEnv {
    let fixture = common::scaffold(root);
    let config = BuildConfig::load(&fixture.config_path).unwrap();
    let registry = PatternRegistry::from_json_file(&fixture.registry_path).unwrap();
    BuildEnv { config, registry }
}

fn run_build(env: &BuildEnv) -> patlab_cli::core::BuildReport {
    let mut loader = TemplateLoader::new(
        &env.config.pattern_extension,
        env.registry.pattern_path_lookup(),
    );
    loader
        .add_path(env.config.pattern_source_dir(), MAIN_NAMESPACE)
        .unwrap();
    let engine = TeraRenderer::from_dir(&env.config.styleguide_templates_dir()).unwrap();
    let chrome = PageChrome::load(&env.config.meta_dir()).unwrap();

    Builder::new(&env.config, &env.registry, &loader, &engine, &chrome)
        .build()
        .unwrap()
}

#[test]
fn full_build_emits_every_artifact() {
    let temp = tempfile::tempdir().unwrap();
    let env = build_env(temp.path());
    let report = run_build(&env);

    // Three visible patterns (button, logo, pseudo hover); link is hidden
    assert_eq!(report.patterns_written, 3);
    assert_eq!(report.view_all_written, 3); // type + two subtypes
    assert!(report.styleguide_written);
    assert!(!report.has_diagnostics());

    let patterns = env.config.pattern_public_dir();

    // Per-pattern artifacts
    let dash = "00-atoms-05-buttons-00-button";
    let full = fs::read_to_string(patterns.join(dash).join(format!("{dash}.html"))).unwrap();
    assert_eq!(
        full,
        "<!doctype html><div class=\"atoms-button\"></div><!-- /atoms-button -->"
    );
    let escaped =
        fs::read_to_string(patterns.join(dash).join(format!("{dash}.escaped.html"))).unwrap();
    assert_eq!(escaped, "&lt;div class=&quot;atoms-button&quot;&gt;&lt;&#x2F;div&gt;");
    let engine_src =
        fs::read_to_string(patterns.join(dash).join(format!("{dash}.mustache"))).unwrap();
    assert!(engine_src.contains("&lt;button&gt;"));

    // Hidden pattern emitted nothing
    assert!(!patterns.join("00-atoms-05-buttons-01-link").exists());

    // The pseudo-pattern's engine artifact comes from its original path
    let pseudo_dash = "00-atoms-05-buttons-00-button-hover";
    let pseudo_src =
        fs::read_to_string(patterns.join(pseudo_dash).join(format!("{pseudo_dash}.mustache")))
            .unwrap();
    assert!(pseudo_src.contains("&lt;button&gt;"));
}

#[test]
fn view_all_pages_compose_scoped_partials() {
    let temp = tempfile::tempdir().unwrap();
    let env = build_env(temp.path());
    run_build(&env);

    let patterns = env.config.pattern_public_dir();

    // Subtype page: buttons only (hidden link excluded, pseudo included)
    let buttons =
        fs::read_to_string(patterns.join("00-atoms-05-buttons").join("index.html")).unwrap();
    assert!(buttons.contains("id=\"atoms-button\""));
    assert!(buttons.contains("id=\"atoms-button-hover\""));
    assert!(!buttons.contains("id=\"atoms-link\""));
    assert!(!buttons.contains("id=\"atoms-logo\""));

    // The chrome wraps the page and carries the aggregate's identity
    assert!(buttons.starts_with("<head data-cb=\"0\"><body>"));
    assert!(buttons.contains("var patternData = {\"patternPartial\":\"viewall-atoms-buttons\"}"));
    assert!(buttons.ends_with("</script>"));

    // Type page spans both subtypes
    let atoms = fs::read_to_string(patterns.join("00-atoms").join("index.html")).unwrap();
    assert!(atoms.contains("id=\"atoms-button\""));
    assert!(atoms.contains("id=\"atoms-logo\""));
    assert!(atoms.contains("viewall-atoms-all"));
}

#[test]
fn styleguide_aggregates_whole_library() {
    let temp = tempfile::tempdir().unwrap();
    let env = build_env(temp.path());
    run_build(&env);

    let styleguide = fs::read_to_string(
        env.config.styleguide_html_dir().join("styleguide.html"),
    )
    .unwrap();
    assert!(styleguide.contains("id=\"atoms-button\""));
    assert!(styleguide.contains("id=\"atoms-logo\""));
    assert!(!styleguide.contains("id=\"atoms-link\""));
    // The style guide has no aggregate identity
    assert!(styleguide.contains("var patternData = {}"));
}

#[test]
fn missing_scaffold_skips_styleguide_only() {
    let temp = tempfile::tempdir().unwrap();
    let env = build_env(temp.path());
    fs::remove_dir_all(env.config.styleguide_html_dir()).unwrap();

    let report = run_build(&env);

    assert!(!report.styleguide_written);
    assert!(report.diagnostics.iter().any(|d| d.subject == "styleguide"));
    // The rest of the build proceeded
    assert_eq!(report.patterns_written, 3);
    assert_eq!(report.view_all_written, 3);
}

#[test]
fn data_files_are_wellformed() {
    let temp = tempfile::tempdir().unwrap();
    let env = build_env(temp.path());
    run_build(&env);

    let data_dir = env.config.styleguide_data_dir();
    for (file, var) in [
        ("config.js", "config"),
        ("ish-controls.js", "ishControls"),
        ("nav-items.js", "navItems"),
        ("pattern-paths.js", "patternPaths"),
        ("viewall-paths.js", "viewAllPaths"),
        ("lookup-partials.js", "lookupPartials"),
    ] {
        let text = fs::read_to_string(data_dir.join(file)).unwrap();
        let prefix = format!("var {var} = ");
        assert!(text.starts_with(&prefix), "{file} missing assignment prefix");
        assert!(text.ends_with(';'), "{file} missing trailing semicolon");

        // The payload between assignment and semicolon is valid JSON
        let payload = &text[prefix.len()..text.len() - 1];
        serde_json::from_str::<serde_json::Value>(payload)
            .unwrap_or_else(|e| panic!("{file} payload is not JSON: {e}"));
    }

    let ish = fs::read_to_string(data_dir.join("ish-controls.js")).unwrap();
    assert!(ish.contains("480px"));
    assert!(ish.contains("1024px"));

    let viewall = fs::read_to_string(data_dir.join("viewall-paths.js")).unwrap();
    assert!(viewall.contains("\"all\":\"00-atoms\""));
}

#[test]
fn rebuild_is_byte_identical() {
    let temp = tempfile::tempdir().unwrap();
    let env = build_env(temp.path());
    run_build(&env);

    let patterns = env.config.pattern_public_dir();
    let read_all = || {
        let mut contents = Vec::new();
        for path in [
            patterns.join("00-atoms-05-buttons-00-button/00-atoms-05-buttons-00-button.html"),
            patterns.join("00-atoms-05-buttons/index.html"),
            env.config.styleguide_html_dir().join("styleguide.html"),
            env.config.styleguide_data_dir().join("nav-items.js"),
        ] {
            contents.push(fs::read_to_string(path).unwrap());
        }
        contents
    };

    let first = read_all();
    run_build(&env);
    assert_eq!(read_all(), first);
}
