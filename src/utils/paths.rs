//! Path utilities for normalization, composite paths and display.
//!
//! All functions here are lexical unless stated otherwise: they do not
//! resolve symlinks and only touch the filesystem where documented.

use std::path::{Component, Path, PathBuf};

use crate::constants::COMPOSITE_SEPARATOR;

/// Normalizes a path by resolving `.` and `..` components.
///
/// Leading `..` components of a relative path are kept, so
/// `../src/./lib.rs` stays `../src/lib.rs`. An empty result becomes `.`.
///
/// # Examples
///
/// ```rust,no_run
/// use deparse_cli::utils::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/foo/./bar/../baz")), PathBuf::from("/foo/baz"));
/// assert_eq!(normalize_path(Path::new("../src/./lib.rs")), PathBuf::from("../src/lib.rs"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}

/// Makes a path absolute against the current directory without touching the
/// filesystem beyond reading the working directory.
#[must_use]
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Directory used as the search anchor for a context path.
///
/// Directories anchor themselves; files anchor at their parent directory.
/// The result is absolute and normalized.
#[must_use]
pub fn context_dir(context: &Path) -> PathBuf {
    let absolute = normalize_path(&absolutize(context));
    if absolute.is_dir() {
        return absolute;
    }
    absolute.parent().map_or_else(|| absolute.clone(), Path::to_path_buf)
}

/// Joins `reference` against the directory of `source`, then normalizes.
///
/// Absolute references are only normalized. With no source the reference is
/// normalized as is.
#[must_use]
pub fn relative_to_source(source: Option<&Path>, reference: &str) -> PathBuf {
    let reference = Path::new(reference);
    if reference.is_absolute() {
        return normalize_path(reference);
    }
    match source.and_then(Path::parent) {
        Some(dir) => normalize_path(&dir.join(reference)),
        None => normalize_path(reference),
    }
}

/// Splits a composite path such as `lib/js/jquery.js+lodash.js`.
///
/// The first part keeps its own directory; every following part is joined
/// onto that directory. Returns `None` when the path has no separator.
///
/// # Examples
///
/// ```rust,no_run
/// use deparse_cli::utils::split_composite;
/// use std::path::PathBuf;
///
/// let parts = split_composite("lib/js/jquery.js+lodash.js").unwrap();
/// assert_eq!(parts, vec![PathBuf::from("lib/js/jquery.js"), PathBuf::from("lib/js/lodash.js")]);
/// ```
#[must_use]
pub fn split_composite(path: &str) -> Option<Vec<PathBuf>> {
    if !path.contains(COMPOSITE_SEPARATOR) {
        return None;
    }
    let mut parts = path.split(COMPOSITE_SEPARATOR);
    let first = PathBuf::from(parts.next()?);
    let prefix = first.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut paths = vec![first];
    paths.extend(parts.filter(|part| !part.is_empty()).map(|part| prefix.join(part)));
    Some(paths)
}

/// Relative path from `base` to `target`, both made absolute first.
///
/// Unlike `strip_prefix` this walks up with `..` when `target` is outside
/// `base`. Falls back to the absolute target across different roots.
#[must_use]
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target = normalize_path(&absolutize(target));
    let base = normalize_path(&absolutize(base));

    let target_parts: Vec<_> = target.components().collect();
    let base_parts: Vec<_> = base.components().collect();
    if target_parts.first() != base_parts.first() {
        return target;
    }

    let common = target_parts.iter().zip(&base_parts).take_while(|(a, b)| a == b).count();
    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        return PathBuf::from(".");
    }
    relative
}

/// Lower-cased extension used to select a parser.
///
/// Files without a dot yield their whole file name, matching how a bare
/// `component` file selects the component scanner.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    }
}

/// Module name derived from a file name.
///
/// A trailing `-<version>` suffix is removed (`jquery-3.7.1.js` → `jquery`);
/// names without one lose their extension instead (`app.js` → `app`).
#[must_use]
pub fn module_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some((head, _)) = base.rsplit_once('-') {
        return head.to_string();
    }
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/foo/./bar/../baz")), PathBuf::from("/foo/baz"));
        assert_eq!(normalize_path(Path::new("../src/./lib.rs")), PathBuf::from("../src/lib.rs"));
        assert_eq!(normalize_path(Path::new("a/b/../../..")), PathBuf::from(".."));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
        assert_eq!(normalize_path(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn test_relative_to_source() {
        assert_eq!(
            relative_to_source(Some(Path::new("web/css/main.css")), "../img/logo.png"),
            PathBuf::from("web/img/logo.png")
        );
        assert_eq!(relative_to_source(None, "./theme.css"), PathBuf::from("theme.css"));
        assert_eq!(
            relative_to_source(Some(Path::new("main.css")), "reset.css"),
            PathBuf::from("reset.css")
        );
    }

    #[test]
    fn test_split_composite() {
        assert_eq!(split_composite("a.js"), None);
        assert_eq!(
            split_composite("a.js+b.js").unwrap(),
            vec![PathBuf::from("a.js"), PathBuf::from("b.js")]
        );
        assert_eq!(
            split_composite("lib/js/jquery.js+lodash.js+").unwrap(),
            vec![PathBuf::from("lib/js/jquery.js"), PathBuf::from("lib/js/lodash.js")]
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path(Path::new("/a/b/c.js"), Path::new("/a")), PathBuf::from("b/c.js"));
        assert_eq!(relative_path(Path::new("/a/x.js"), Path::new("/a/b")), PathBuf::from("../x.js"));
        assert_eq!(relative_path(Path::new("/a"), Path::new("/a")), PathBuf::from("."));
    }

    #[test]
    fn test_extension_and_module_name() {
        assert_eq!(extension_of(Path::new("view.XML.PAML")), "paml");
        assert_eq!(extension_of(Path::new("dir/component")), "component");
        assert_eq!(module_name(Path::new("lib/js/jquery-3.7.1.js")), "jquery");
        assert_eq!(module_name(Path::new("main.js")), "main");
        assert_eq!(module_name(Path::new("ui.widgets-1.2.js")), "ui.widgets");
        assert_eq!(module_name(Path::new(".hidden")), ".hidden");
    }
}
