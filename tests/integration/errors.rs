use predicates::prelude::*;

use crate::common::{deparse, module_chain};

#[test]
fn test_missing_argument_fails_after_the_rest() {
    let tree = module_chain();
    deparse(&tree)
        .args(["-r", "missing.sjs", "app.sjs"])
        .assert()
        .code(1)
        .stdout("js:module\tdom\njs:module\twidgets\njs:module\tapp\n")
        .stderr(predicate::str::contains("missing.sjs"))
        .stderr(predicate::str::contains("1 of 2 argument(s) could not be read"));
}

#[test]
fn test_unresolved_dependency_is_not_fatal() {
    let tree = module_chain();
    tree.write("page.sjs", "@module page\n@import nowhere\n");
    deparse(&tree)
        .arg("page.sjs")
        .assert()
        .success()
        .stdout("js:module\tnowhere\njs:module\tpage\n")
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_quiet_hides_warnings() {
    let tree = module_chain();
    tree.write("page.sjs", "@module page\n@import nowhere\n");
    deparse(&tree)
        .args(["-q", "page.sjs"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_files_argument() {
    let tree = module_chain();
    deparse(&tree)
        .assert()
        .failure()
        .stderr(predicate::str::contains("FILE"));
}
