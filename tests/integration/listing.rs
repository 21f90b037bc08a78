use predicates::prelude::*;
use serde_json::Value;

use crate::common::{deparse, module_chain, stdout_of};

#[test]
fn test_recursive_listing_in_load_order() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "app.sjs"]));
    assert_eq!(out, "js:module\tdom\njs:module\twidgets\njs:module\tapp\n");
}

#[test]
fn test_non_recursive_listing_stops_at_the_argument() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).arg("app.sjs"));
    assert_eq!(out, "js:module\twidgets\njs:module\tapp\n");
}

#[test]
fn test_relative_paths() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "-p", "app.sjs"]));
    assert_eq!(out, "lib/sjs/dom.sjs\nlib/sjs/widgets.sjs\napp.sjs\n");
}

#[test]
fn test_absolute_paths() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "-P", "app.sjs"]));
    let expected = format!(
        "{}\n{}\n{}\n",
        tree.path("lib/sjs/dom.sjs").display(),
        tree.path("lib/sjs/widgets.sjs").display(),
        tree.path("app.sjs").display()
    );
    assert_eq!(out, expected);
}

#[test]
fn test_kind_filter() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "-t", "css:*", "app.sjs"]));
    assert_eq!(out, "");

    let out = stdout_of(deparse(&tree).args(["-r", "--type", "css:*,js:*", "app.sjs"]));
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_invalid_kind_filter_is_rejected() {
    let tree = module_chain();
    deparse(&tree)
        .args(["-t", "js:[", "app.sjs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid kind pattern"));
}

#[test]
fn test_json_report() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).args(["-r", "--format", "json", "app.sjs"]));
    let report: Value = serde_json::from_str(&out).unwrap();

    let order: Vec<&str> = report["load_order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["dom", "widgets", "app"]);
    assert_eq!(report["provides"][0]["kind"], "js:module");
    assert!(report["issues"].as_array().unwrap().is_empty());
}

#[test]
fn test_output_file() {
    let tree = module_chain();
    deparse(&tree)
        .args(["-r", "-o", "deps.txt", "app.sjs"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(tree.path("deps.txt")).unwrap();
    assert_eq!(written, "js:module\tdom\njs:module\twidgets\njs:module\tapp\n");
}

#[test]
fn test_composite_argument() {
    let tree = module_chain();
    let out = stdout_of(deparse(&tree).arg("lib/sjs/dom.sjs+widgets.sjs"));
    assert!(out.contains("js:module\tdom\n"));
    assert!(out.contains("js:module\twidgets\n"));
    assert_eq!(out.lines().count(), 2);
}
