use predicates::prelude::*;

use crate::common::{deparse, stdout_of};
use deparse_cli::test_utils::SourceTree;

fn mjs_tree() -> SourceTree {
    let tree = SourceTree::new();
    tree.write("app.mjs", "var _ = require('lodash');\n");
    tree.write("lib/js/lodash-4.17.js", "");
    tree
}

#[test]
fn test_unknown_extension_without_mapping() {
    let tree = mjs_tree();
    deparse(&tree)
        .arg("app.mjs")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No parser registered for extension 'mjs'"));
}

#[test]
fn test_extension_mapping_from_working_directory() {
    let tree = mjs_tree();
    tree.write("deparse.toml", "[extensions]\nmjs = \"js\"\n");

    let out = stdout_of(deparse(&tree).args(["-r", "app.mjs"]));
    assert_eq!(out, "js:module\tlodash\njs:module\tapp\n");
}

#[test]
fn test_explicit_config_file() {
    let tree = mjs_tree();
    tree.write("conf/ci.toml", "[extensions]\nmjs = \"js\"\n");

    let out = stdout_of(deparse(&tree).args(["--config", "conf/ci.toml", "app.mjs"]));
    assert_eq!(out, "js:module\tlodash\njs:module\tapp\n");
}

#[test]
fn test_environment_config_file() {
    let tree = mjs_tree();
    tree.write("env.toml", "[extensions]\nmjs = \"js\"\n");

    let out = stdout_of(deparse(&tree).env("DEPARSE_CONFIG", tree.path("env.toml")).arg("app.mjs"));
    assert_eq!(out, "js:module\tlodash\njs:module\tapp\n");
}

#[test]
fn test_extra_search_paths() {
    let tree = SourceTree::new();
    tree.write("app.sjs", "@module app\n@import widgets\n");
    let vendored = tree.write("vendor/widgets.sjs", "@module widgets\n");
    tree.write("deparse.toml", "[search]\npaths = [\"vendor\"]\n");

    let out = stdout_of(deparse(&tree).args(["-P", "app.sjs"]));
    assert_eq!(out, format!("{}\n{}\n", vendored.display(), tree.path("app.sjs").display()));
}

#[test]
fn test_missing_explicit_config_fails() {
    let tree = mjs_tree();
    deparse(&tree)
        .args(["--config", "missing.toml", "app.mjs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_invalid_config_fails() {
    let tree = mjs_tree();
    tree.write("deparse.toml", "[extensions\nmjs = ");
    deparse(&tree)
        .arg("app.mjs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("deparse.toml"));
}
