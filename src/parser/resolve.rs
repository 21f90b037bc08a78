//! Filesystem resolution heuristics.
//!
//! Every scanner resolves items the same way, except the component scanner
//! which looks inside component folders. The lookup runs over the candidate
//! directories of a [`SearchScope`]: the configured extra directories, then
//! the working directory, then the directory of the file that declared the
//! requirement.
//!
//! | Kind | Lookup |
//! |---|---|
//! | `js:module`, `sjs:module` | `<name>.sjs`, `<name>*-*.sjs`, else the newest `<name>-*.js` |
//! | `js:gmodule`, `sjs:gmodule` | `<name>*.sjs`, `<name>*-*.sjs`, else the newest `<name>-*.js` containing `.gmodule` |
//! | `css:module`, `pcss:module` | `<name>*.pcss`, else the newest `<name>.css` |
//! | `js:component`, `sjs:component` | the component folder convention |
//! | `*:file`, `<dialect>:file`, `c:header` | the literal name, `<name>.<dialect>`, `lib/<ext>/<name>` |
//! | `*:url` | the URL itself |
//! | `*` | all of the module, stylesheet and file lookups |
//!
//! Module names are dotted paths: `ui.widgets` is looked up as
//! `ui/widgets`. "Newest" means last in sorted order, which for
//! `name-<version>.js` files is the highest version.

use std::path::{Path, PathBuf};
use tracing::trace;

use crate::config::Config;
use crate::core::{Candidate, Item, kinds, merge_unique};
use crate::pattern::{glob_in, subdirs};
use crate::utils::{absolutize, context_dir, normalize_path};

/// Where a lookup happens.
#[derive(Debug, Clone, Copy)]
pub struct SearchScope<'a> {
    pub config: &'a Config,
    /// Extra directories, searched first.
    pub extra_dirs: &'a [PathBuf],
    /// File (or directory) that declared the requirement.
    pub context: &'a Path,
}

impl<'a> SearchScope<'a> {
    pub fn new(config: &'a Config, extra_dirs: &'a [PathBuf], context: &'a Path) -> Self {
        Self {
            config,
            extra_dirs,
            context,
        }
    }

    /// Extra directories, the working directory and the context directory,
    /// all absolute.
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> =
            self.extra_dirs.iter().map(|dir| normalize_path(&absolutize(dir))).collect();
        dirs.push(current_dir());
        dirs.push(context_dir(self.context));
        dirs
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| absolutize(Path::new(".")))
}

/// Sorted glob matches, optionally filtered on whether the path mentions
/// `.gmodule`.
fn find(dirs: &[PathBuf], expressions: &[String], gmodule: Option<bool>) -> Vec<PathBuf> {
    glob_in(dirs, expressions)
        .into_iter()
        .filter(|path| {
            gmodule.is_none_or(|wanted| path.to_string_lossy().contains(".gmodule") == wanted)
        })
        .collect()
}

/// The specific dialect's matches win outright; otherwise only the newest
/// generic match is kept.
fn prefer(
    found: &mut Vec<Candidate>,
    specific: Vec<PathBuf>,
    specific_kind: &str,
    generic: Vec<PathBuf>,
    generic_kind: &str,
) {
    if !specific.is_empty() {
        found.extend(specific.into_iter().map(|path| Candidate::new(specific_kind, path)));
    } else if let Some(newest) = generic.into_iter().next_back() {
        found.push(Candidate::new(generic_kind, newest));
    }
}

/// Shared resolution used by every scanner but the component scanner.
pub fn resolve_item(item: &Item, scope: &SearchScope<'_>) -> Vec<Candidate> {
    let kind = item.kind.as_str();
    let any = kind == kinds::WILDCARD;
    let config = scope.config;
    let dirs = scope.candidate_dirs();
    let module_path = item.name.replace('.', "/");
    let mut found = Vec::new();

    if any || matches!(kind, kinds::JS_MODULE | kinds::SJS_MODULE) {
        let js = find(
            &subdirs(&dirs, config.module_dirs("js")),
            &[format!("{module_path}-*.js")],
            Some(false),
        );
        let sjs = find(
            &subdirs(&dirs, config.module_dirs("sjs")),
            &[format!("{module_path}.sjs"), format!("{module_path}*-*.sjs")],
            None,
        );
        prefer(&mut found, sjs, kinds::SJS_MODULE, js, kinds::JS_MODULE);
    }

    if any || matches!(kind, kinds::JS_GMODULE | kinds::SJS_GMODULE) {
        let js = find(
            &subdirs(&dirs, config.module_dirs("js")),
            &[format!("{module_path}-*.js")],
            Some(true),
        );
        let sjs = find(
            &subdirs(&dirs, config.module_dirs("sjs")),
            &[format!("{module_path}*.sjs"), format!("{module_path}*-*.sjs")],
            None,
        );
        prefer(&mut found, sjs, kinds::SJS_GMODULE, js, kinds::JS_GMODULE);
    }

    if matches!(kind, kinds::JS_COMPONENT | kinds::SJS_COMPONENT) {
        found.extend(resolve_component(item, scope));
    }

    if any || matches!(kind, kinds::CSS_MODULE | kinds::PCSS_MODULE) {
        let mut css_dirs = vec![current_dir()];
        css_dirs.extend(subdirs(&dirs, config.module_dirs("css")));
        let css = find(&css_dirs, &[format!("{}.css", item.name)], None);

        let mut pcss_dirs = vec![current_dir()];
        pcss_dirs.extend(subdirs(&dirs, config.module_dirs("pcss")));
        let pcss = find(&pcss_dirs, &[format!("{}*.pcss", item.name)], None);

        prefer(&mut found, pcss, kinds::PCSS_MODULE, css, kinds::CSS_MODULE);
    }

    if any || item.is_file() || kind == kinds::C_HEADER {
        found.extend(resolve_file(item, &dirs));
    }

    if item.is_url() {
        found.push(Candidate::new(kind, &item.name));
    }

    let mut unique = Vec::with_capacity(found.len());
    merge_unique(&mut unique, &found);
    trace!("Resolved {} to {} candidate(s)", item, unique.len());
    unique
}

/// Literal file lookups: the name, the name with the kind's extension and
/// the conventional `lib/<ext>/` location, in every candidate directory.
fn resolve_file(item: &Item, dirs: &[PathBuf]) -> Vec<Candidate> {
    let name = item.name.as_str();
    let extension = name.rsplit_once('.').map_or(name, |(_, ext)| ext);
    let mut names = vec![name.to_string()];
    let dialect = item.dialect();
    if dialect != kinds::WILDCARD {
        names.push(format!("{name}.{dialect}"));
    }
    names.push(format!("lib/{extension}/{name}"));

    let mut seen: Vec<PathBuf> = Vec::new();
    let mut found = Vec::new();
    for candidate in &names {
        for dir in dirs {
            let path = normalize_path(&dir.join(candidate));
            if !seen.contains(&path) && path.exists() {
                found.push(Candidate::new(kinds::ANY_FILE, &path));
                seen.push(path);
            }
        }
    }
    found
}

/// Component folders: `<parent>/<components dir>/<name>/<convention file>`.
///
/// Parents are the extra directories, the working directory and the
/// context directory, each searched once.
pub fn resolve_component(item: &Item, scope: &SearchScope<'_>) -> Vec<Candidate> {
    let mut parents: Vec<PathBuf> = Vec::new();
    merge_unique(&mut parents, &scope.candidate_dirs());

    let mut found = Vec::new();
    for parent in &parents {
        for dir in &scope.config.components.dirs {
            let folder = parent.join(dir).join(&item.name);
            for convention in &scope.config.components.files {
                let path = folder.join(&convention.file);
                if path.exists() {
                    found.push(Candidate::new(&convention.kind, path));
                }
            }
        }
    }
    let mut unique = Vec::with_capacity(found.len());
    merge_unique(&mut unique, &found);
    unique
}
