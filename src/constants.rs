//! Global constants used throughout the deparse codebase.
//!
//! Default search conventions live here so the configuration defaults and the
//! tests agree on them.

/// Joins sibling files in a single argument: `lib/js/a.js+b.js`.
pub const COMPOSITE_SEPARATOR: char = '+';

/// Project configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "deparse.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "DEPARSE_CONFIG";

/// Extensions skipped without reporting an unsupported format.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &["svg"];

/// Conventional subdirectories searched for `js:*` modules, in order.
///
/// The empty entry searches the candidate directory itself.
pub const DEFAULT_JS_DIRS: &[&str] = &["lib/js", "src/js", ""];

/// Conventional subdirectories searched for `sjs:*` modules.
pub const DEFAULT_SJS_DIRS: &[&str] = &["lib/sjs", "src/sjs", ""];

/// Conventional subdirectories searched for `css:module` items.
pub const DEFAULT_CSS_DIRS: &[&str] = &["lib/css", "src/css", ""];

/// Conventional subdirectories searched for `pcss:module` items.
pub const DEFAULT_PCSS_DIRS: &[&str] = &["lib/pcss", "src/pcss", ""];

/// Directories holding component folders.
pub const DEFAULT_COMPONENT_DIRS: &[&str] = &["components"];

/// Files making up a component folder, with the kind each one provides.
///
/// Resolution reports them in this order.
pub const DEFAULT_COMPONENT_FILES: &[(&str, &str)] = &[
    ("js:module", "model.js"),
    ("sjs:module", "model.sjs"),
    ("js:module", "view.js"),
    ("paml:file", "view.xml.paml"),
    ("xml:file", "view.xml"),
    ("html:file", "view.html"),
    ("css:file", "style.css"),
    ("pcss:file", "style.pcss"),
    ("hjson:file", "options.hjson"),
    ("json:file", "options.json"),
];

/// Stylesheet every `.block` file depends on.
pub const BLOCK_STYLESHEET: &str = "block.xsl";

/// Marker that a reference is a template expression, not a path.
pub const TEMPLATE_EXPRESSION_MARKER: &str = "{$";
