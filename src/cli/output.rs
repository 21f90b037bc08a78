//! Rendering of command results.
//!
//! Everything is buffered and written once at the end, either to standard
//! output or atomically to the `--output` file.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::core::{Candidate, Item, ResolutionCache};
use crate::pattern::KindFilter;
use crate::tracker::{Resolution, Tracker, TrackerReport};
use crate::utils::{absolutize, atomic_write, normalize_path, relative_path};

/// How listed items are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// `kind<TAB>name`
    Name,
    /// Path relative to the working directory
    Relative,
    /// Absolute path
    Absolute,
}

impl PathStyle {
    /// Renders a candidate location. URLs are printed unchanged.
    pub fn display(self, candidate: &Candidate, cwd: &Path) -> String {
        if candidate.kind.ends_with(":url") {
            return candidate.path.to_string_lossy().into_owned();
        }
        match self {
            Self::Relative => relative_path(&candidate.path, cwd).display().to_string(),
            Self::Name | Self::Absolute => normalize_path(&absolutize(&candidate.path)).display().to_string(),
        }
    }
}

/// Buffered command output.
#[derive(Debug)]
pub struct Output {
    buffer: String,
    cwd: PathBuf,
}

impl Output {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cwd: absolutize(Path::new(".")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Appends pre-rendered text.
    pub fn text(&mut self, text: &str) {
        self.buffer.push_str(text);
        if !text.is_empty() && !text.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    pub fn json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        self.line(&json);
        Ok(())
    }

    /// Lists `--find` results and returns every path found, each once.
    ///
    /// With a [`PathStyle::Name`] listing, each line is
    /// `name<TAB>path<TAB>kinds`; otherwise only the paths are printed.
    /// Nothing is printed when `listing` is `None`.
    pub fn matches(&mut self, matches: &ResolutionCache, listing: Option<PathStyle>) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for (item, candidates) in matches.iter() {
            if candidates.is_empty() {
                error!("Could not resolve: `{}`", item.name);
                continue;
            }
            let mut groups: BTreeMap<&Path, Vec<&str>> = BTreeMap::new();
            for candidate in candidates {
                groups.entry(candidate.path.as_path()).or_default().push(&candidate.kind);
            }
            for (path, kinds) in groups {
                let first = !paths.iter().any(|seen| seen == path);
                match listing {
                    Some(PathStyle::Name) => {
                        self.line(&format!("{}\t{}\t{}", item.name, path.display(), kinds.join(",")));
                    }
                    Some(style) if first => {
                        let shown = style.display(&Candidate::new(kinds[0], path), &self.cwd);
                        self.line(&shown);
                    }
                    _ => {}
                }
                if first {
                    paths.push(path.to_path_buf());
                }
            }
        }
        paths
    }

    /// Lists the tracker's load order, keeping kinds that match `filter`.
    ///
    /// Path styles print every location an item resolved to (or the files
    /// providing it), each path once.
    pub fn requires(&mut self, tracker: &Tracker, filter: &KindFilter, style: PathStyle) {
        let mut printed: Vec<String> = Vec::new();
        for item in tracker.load_order().iter().filter(|item| filter.matches(&item.kind)) {
            let lines = match style {
                PathStyle::Name => vec![format!("{}\t{}", item.kind, item.name)],
                _ => {
                    let found = locations(tracker, item);
                    if found.is_empty() {
                        error!("Item {item} unresolved");
                    }
                    found.iter().map(|candidate| style.display(candidate, &self.cwd)).collect()
                }
            };
            for line in lines {
                if !printed.contains(&line) {
                    self.line(&line);
                    printed.push(line);
                }
            }
        }
    }

    /// Writes the buffer to `target`, `-` meaning standard output.
    pub fn finish(self, target: &str) -> Result<()> {
        if target == "-" {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(self.buffer.as_bytes()).context("Failed to write to standard output")?;
            stdout.flush().context("Failed to write to standard output")?;
            return Ok(());
        }
        atomic_write(Path::new(target), self.buffer.as_bytes())
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolved candidates, else the files that provide the item.
fn locations(tracker: &Tracker, item: &Item) -> Vec<Candidate> {
    match tracker.resolved().get(item) {
        Some(found) if !found.is_empty() => found.to_vec(),
        _ => tracker
            .origins(item)
            .iter()
            .map(|path| Candidate::new(&item.kind, path))
            .collect(),
    }
}

/// `--find` results as serializable records.
pub fn resolutions(matches: &ResolutionCache) -> Vec<Resolution> {
    matches
        .iter()
        .map(|(item, candidates)| Resolution {
            item: item.clone(),
            candidates: candidates.to_vec(),
        })
        .collect()
}

/// The tracker report with the load order restricted to `filter`.
pub fn filtered_report(tracker: &Tracker, filter: &KindFilter) -> TrackerReport {
    let mut report = tracker.report();
    report.load_order.retain(|item| filter.matches(&item.kind));
    report
}
