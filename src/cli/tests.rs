//! Argument parsing and output rendering tests.
//!
//! Command execution end to end is covered by the integration suite, which
//! runs the binary in a temporary working directory.

use clap::Parser;

use super::output::{Output, PathStyle};
use super::{Cli, OutputFormat};
use crate::core::{Candidate, Item, ResolutionCache, kinds};
use crate::graph::GraphFormat;
use crate::pattern::KindFilter;
use crate::test_utils::SourceTree;
use crate::tracker::Tracker;

#[test]
fn test_files_are_required() {
    assert!(Cli::try_parse_from(["deparse"]).is_err());
    assert!(Cli::try_parse_from(["deparse", "app.sjs"]).is_ok());
}

#[test]
fn test_flags() {
    let cli = Cli::try_parse_from([
        "deparse", "-r", "-P", "-t", "js:*,css:*", "-t", "*:file", "--format", "json", "-g", "plantuml",
        "a.sjs", "b.paml",
    ])
    .unwrap();
    assert!(cli.recursive);
    assert_eq!(cli.path_style(), PathStyle::Absolute);
    assert_eq!(cli.types, vec!["js:*", "css:*", "*:file"]);
    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.graph, Some(GraphFormat::PlantUml));
    assert_eq!(cli.files, vec!["a.sjs", "b.paml"]);
    assert_eq!(cli.output, "-");
}

#[test]
fn test_conflicting_flags() {
    assert!(Cli::try_parse_from(["deparse", "-p", "-P", "a.sjs"]).is_err());
    assert!(Cli::try_parse_from(["deparse", "-v", "-q", "a.sjs"]).is_err());
    // --list only makes sense after --find
    assert!(Cli::try_parse_from(["deparse", "-l", "a.sjs"]).is_err());
    assert!(Cli::try_parse_from(["deparse", "-fl", "widgets"]).is_ok());
}

#[test]
fn test_build_config_log_levels() {
    let cli = Cli::try_parse_from(["deparse", "a.sjs"]).unwrap();
    assert_eq!(cli.build_config().log_level, "warn");

    let cli = Cli::try_parse_from(["deparse", "--verbose", "a.sjs"]).unwrap();
    assert_eq!(cli.build_config().log_level, "debug");

    let cli = Cli::try_parse_from(["deparse", "-q", "--config", "ci.toml", "a.sjs"]).unwrap();
    let config = cli.build_config();
    assert_eq!(config.log_level, "error");
    assert_eq!(config.config_path.as_deref(), Some(std::path::Path::new("ci.toml")));
}

#[test]
fn test_requires_listing() {
    let tree = SourceTree::new();
    let app = tree.write("app.sjs", "@module app\n@import widgets\n");
    let widgets = tree.write("lib/sjs/widgets.sjs", "@module widgets\n");

    let mut tracker = Tracker::default();
    tracker.from_path(&app, true).unwrap();

    let mut out = Output::new();
    out.requires(&tracker, &KindFilter::any(), PathStyle::Name);
    assert_eq!(out.as_str(), "js:module\twidgets\njs:module\tapp\n");

    let mut out = Output::new();
    out.requires(&tracker, &KindFilter::any(), PathStyle::Absolute);
    assert_eq!(out.as_str(), format!("{}\n{}\n", widgets.display(), app.display()));

    let mut out = Output::new();
    out.requires(&tracker, &KindFilter::new(["css:*"]).unwrap(), PathStyle::Name);
    assert_eq!(out.as_str(), "");
}

#[test]
fn test_find_listing_groups_kinds_by_path() {
    let item = Item::any("widgets");
    let mut matches = ResolutionCache::new();
    matches.merge(
        &item,
        &[
            Candidate::new(kinds::SJS_MODULE, "/src/lib/sjs/widgets.sjs"),
            Candidate::new(kinds::SJS_GMODULE, "/src/lib/sjs/widgets.sjs"),
            Candidate::new(kinds::ANY_FILE, "/src/a/widgets"),
        ],
    );
    matches.entry(&Item::any("missing"));

    let mut out = Output::new();
    let paths = out.matches(&matches, Some(PathStyle::Name));
    assert_eq!(
        out.as_str(),
        "widgets\t/src/a/widgets\t*:file\nwidgets\t/src/lib/sjs/widgets.sjs\tsjs:module,sjs:gmodule\n"
    );
    assert_eq!(paths.len(), 2);

    let mut out = Output::new();
    let chained = out.matches(&matches, None);
    assert_eq!(out.as_str(), "");
    assert_eq!(chained, paths);
}

#[test]
fn test_urls_are_shown_verbatim() {
    let url = Candidate::new(kinds::CSS_URL, "https://cdn.example.com/reset.css");
    let cwd = std::path::Path::new("/work");
    assert_eq!(PathStyle::Relative.display(&url, cwd), "https://cdn.example.com/reset.css");

    let file = Candidate::new(kinds::ANY_FILE, "/work/lib/css/theme.css");
    assert_eq!(PathStyle::Relative.display(&file, cwd), "lib/css/theme.css");
}
