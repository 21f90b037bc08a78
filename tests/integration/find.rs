use predicates::prelude::*;

use crate::common::{deparse, module_chain, stdout_of};

#[test]
fn test_find_lists_name_path_and_kinds() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-f", "widgets"]));
    let expected = format!("widgets\t{}\t", tree.path("lib/sjs/widgets.sjs").display());
    assert!(out.starts_with(&expected), "unexpected listing: {out}");
    assert!(out.contains("sjs:module"));
}

#[test]
fn test_find_with_relative_paths() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-f", "-p", "dom"]));
    assert!(out.lines().any(|line| line == "lib/sjs/dom.sjs"), "unexpected listing: {out}");
}

#[test]
fn test_find_then_track() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-fr", "widgets"]));
    assert_eq!(out, "js:module\tdom\njs:module\twidgets\n");
}

#[test]
fn test_find_then_list_without_recursion() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-fl", "app"]));
    // app.sjs sits in the working directory, which is a search root too
    assert_eq!(out, "js:module\twidgets\njs:module\tapp\n");
}

#[test]
fn test_find_reports_unknown_names() {
    let tree = module_chain();
    deparse(&tree)
        .args(["-f", "nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Could not resolve: `nowhere`"));
}

#[test]
fn test_find_json() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-f", "--format", "json", "dom", "nowhere"]));
    let found: serde_json::Value = serde_json::from_str(&out).unwrap();
    let found = found.as_array().unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["item"]["name"], "dom");
    assert!(!found[0]["candidates"].as_array().unwrap().is_empty());
    assert!(found[1]["candidates"].as_array().unwrap().is_empty());
}
