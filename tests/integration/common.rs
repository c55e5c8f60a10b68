//! Shared fixture: a minimal but complete source tree, config file, and
//! registry snapshot for end-to-end builds.

use std::fs;
use std::path::{Path, PathBuf};

/// Paths to the fixture's two CLI inputs.
pub struct Fixture {
    pub config_path: PathBuf,
    pub registry_path: PathBuf,
    pub public_dir: PathBuf,
}

/// Lays out a source tree, chrome, page templates, public scaffold,
/// config file, and registry snapshot under `root`.
pub fn scaffold(root: &Path) -> Fixture {
    let source = root.join("source");
    let public = root.join("public");

    // Pattern sources
    for (rel, body) in [
        ("00-atoms/05-buttons/00-button", "<button>{{ label }}</button>"),
        ("00-atoms/05-buttons/01-link", "<a href=\"#\">link</a>"),
        ("00-atoms/06-images/00-logo", "<img alt=\"logo\">"),
    ] {
        let path = source.join("_patterns").join(format!("{rel}.mustache"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    // Stylesheets for media-query gathering
    fs::create_dir_all(source.join("css")).unwrap();
    fs::write(
        source.join("css/style.css"),
        "@media (min-width: 480px) {} @media (max-width: 1024px) {}",
    )
    .unwrap();

    // Chrome templates
    let meta = source.join("_meta");
    fs::create_dir_all(&meta).unwrap();
    fs::write(meta.join("html-head.html"), "<head data-cb=\"{{ cacheBuster }}\">").unwrap();
    fs::write(
        meta.join("html-foot.html"),
        "<script>var patternData = {{ patternData }};</script>",
    )
    .unwrap();
    fs::write(meta.join("pattern-head.html"), "{{ patternLabHead }}<body>").unwrap();
    fs::write(meta.join("pattern-foot.html"), "</body>{{ patternLabFoot }}").unwrap();

    // The viewall page template
    let styleguide_templates = source.join("_styleguide");
    fs::create_dir_all(&styleguide_templates).unwrap();
    fs::write(
        styleguide_templates.join("viewall.html"),
        "{% for p in partials %}<section id=\"{{ p.patternPartial }}\">{{ p.patternPartialCode }}</section>{% endfor %}",
    )
    .unwrap();

    // Output scaffold for the style guide
    fs::create_dir_all(public.join("styleguide").join("html")).unwrap();

    let config_path = root.join("patlab.toml");
    fs::write(
        &config_path,
        "source_dir = \"source\"\npublic_dir = \"public\"\ncache_buster = false\n",
    )
    .unwrap();

    let registry_path = root.join("pattern-data.json");
    fs::write(&registry_path, registry_json()).unwrap();

    Fixture {
        config_path,
        registry_path,
        public_dir: public,
    }
}

fn record(
    partial: &str,
    category: &str,
    path_dash: &str,
    path_name: &str,
    ty: &str,
    subtype: &str,
    name: &str,
    extra: &str,
) -> String {
    format!(
        r#"{{"partial":"{partial}","category":"{category}","pathDash":"{path_dash}","pathName":"{path_name}","type":"{ty}","typeDash":"{ty}","subtype":"{subtype}","subtypeDash":"{subtype}","name":"{name}","nameDash":"{name}","code":"<div class=\"{partial}\"></div>","header":"<!doctype html>","footer":"<!-- /{partial} -->"{extra}}}"#
    )
}

/// A registry snapshot with a type, two subtypes, three visible
/// patterns, one hidden pattern, and one pseudo-pattern.
pub fn registry_json() -> String {
    let records = [
        record("atoms", "patternType", "00-atoms", "00-atoms", "atoms", "", "atoms", ""),
        record(
            "atoms-buttons",
            "patternSubtype",
            "00-atoms-05-buttons",
            "00-atoms/05-buttons",
            "atoms",
            "",
            "buttons",
            "",
        ),
        record(
            "atoms-button",
            "pattern",
            "00-atoms-05-buttons-00-button",
            "00-atoms/05-buttons/00-button",
            "atoms",
            "buttons",
            "button",
            "",
        ),
        record(
            "atoms-link",
            "pattern",
            "00-atoms-05-buttons-01-link",
            "00-atoms/05-buttons/01-link",
            "atoms",
            "buttons",
            "link",
            r#","hidden":true"#,
        ),
        record(
            "atoms-images",
            "patternSubtype",
            "00-atoms-06-images",
            "00-atoms/06-images",
            "atoms",
            "",
            "images",
            "",
        ),
        record(
            "atoms-logo",
            "pattern",
            "00-atoms-06-images-00-logo",
            "00-atoms/06-images/00-logo",
            "atoms",
            "images",
            "logo",
            "",
        ),
        record(
            "atoms-button-hover",
            "pattern",
            "00-atoms-05-buttons-00-button-hover",
            "00-atoms/05-buttons/00-button~hover",
            "atoms",
            "buttons",
            "button-hover",
            r#","isPseudo":true,"pathOrig":"00-atoms/05-buttons/00-button""#,
        ),
    ];
    format!("[{}]", records.join(","))
}
