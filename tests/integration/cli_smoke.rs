//! Smoke tests for the `patlab` binary.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common;

fn patlab() -> Command {
    Command::cargo_bin("patlab").unwrap()
}

#[test]
fn build_command_succeeds_on_fixture() {
    let temp = tempfile::tempdir().unwrap();
    let fixture = common::scaffold(temp.path());

    patlab()
        .current_dir(temp.path())
        .arg("build")
        .arg("--config")
        .arg(&fixture.config_path)
        .arg("--registry")
        .arg(&fixture.registry_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 patterns"));

    assert!(
        fixture
            .public_dir
            .join("patterns/00-atoms-05-buttons-00-button/00-atoms-05-buttons-00-button.html")
            .exists()
    );
    assert!(
        fixture
            .public_dir
            .join("styleguide/html/styleguide.html")
            .exists()
    );
    assert!(
        fixture
            .public_dir
            .join("styleguide/data/pattern-paths.js")
            .exists()
    );
}

#[test]
fn missing_config_fails_with_error() {
    let temp = tempfile::tempdir().unwrap();

    patlab()
        .current_dir(temp.path())
        .arg("build")
        .arg("--config")
        .arg("no-such-file.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn malformed_registry_fails_with_error() {
    let temp = tempfile::tempdir().unwrap();
    let fixture = common::scaffold(temp.path());
    std::fs::write(&fixture.registry_path, "{ not json ]").unwrap();

    patlab()
        .arg("build")
        .arg("--config")
        .arg(&fixture.config_path)
        .arg("--registry")
        .arg(&fixture.registry_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry"));
}
