//! Shared helpers for the integration tests.

use assert_cmd::Command;
use deparse_cli::test_utils::SourceTree;

/// A `deparse` command running inside `tree`.
///
/// The user configuration directory points into the tree and the
/// environment overrides are cleared so a developer's own setup does not
/// leak into the results.
pub fn deparse(tree: &SourceTree) -> Command {
    let mut cmd = Command::cargo_bin("deparse").unwrap();
    cmd.current_dir(tree.root())
        .env("XDG_CONFIG_HOME", tree.path(".config"))
        .env("HOME", tree.root())
        .env_remove("DEPARSE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// `app.sjs` importing `widgets`, which imports `dom`.
pub fn module_chain() -> SourceTree {
    let tree = SourceTree::new();
    tree.write("app.sjs", "@module app\n@import widgets\n");
    tree.write("lib/sjs/widgets.sjs", "@module widgets\n@import dom\n");
    tree.write("lib/sjs/dom.sjs", "@module dom\n");
    tree
}

/// Standard output of a successful run.
pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}
