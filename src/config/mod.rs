//! Configuration for deparse.
//!
//! Everything is optional: without a configuration file the built-in search
//! conventions apply. A file only needs the keys it changes.
//!
//! # Lookup order
//!
//! 1. `--config <FILE>` on the command line
//! 2. the `DEPARSE_CONFIG` environment variable
//! 3. `./deparse.toml`
//! 4. `<user config dir>/deparse/config.toml`
//!
//! The first file found wins; files are not layered.
//!
//! # Format
//!
//! ```toml
//! [search]
//! # Extra directories searched before the working directory
//! paths = ["vendor", "../shared"]
//!
//! [search.modules]
//! js = ["lib/js", "src/js", ""]
//! sjs = ["lib/sjs", "src/sjs", ""]
//!
//! [components]
//! dirs = ["components", "widgets"]
//!
//! [tracker]
//! ignore = ["svg", "png"]
//!
//! [extensions]
//! mjs = "js"
//! scss = "css"
//! ```

pub mod parser;

pub use parser::parse_config;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_COMPONENT_DIRS, DEFAULT_COMPONENT_FILES,
    DEFAULT_CSS_DIRS, DEFAULT_IGNORED_EXTENSIONS, DEFAULT_JS_DIRS, DEFAULT_PCSS_DIRS,
    DEFAULT_SJS_DIRS,
};
use crate::core::DeparseError;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub components: ComponentConfig,
    pub tracker: TrackerConfig,
    /// Extra extension → dialect mappings, e.g. `mjs = "js"`.
    pub extensions: BTreeMap<String, String>,
}

/// Where symbolic names are looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Extra directories, searched before the working directory.
    pub paths: Vec<PathBuf>,
    pub modules: ModuleDirs,
}

/// Conventional subdirectories per module dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleDirs {
    pub js: Vec<String>,
    pub sjs: Vec<String>,
    pub css: Vec<String>,
    pub pcss: Vec<String>,
}

impl Default for ModuleDirs {
    fn default() -> Self {
        Self {
            js: strings(DEFAULT_JS_DIRS),
            sjs: strings(DEFAULT_SJS_DIRS),
            css: strings(DEFAULT_CSS_DIRS),
            pcss: strings(DEFAULT_PCSS_DIRS),
        }
    }
}

/// Component folder conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Directory names holding component folders.
    pub dirs: Vec<String>,
    /// Files looked up inside a component folder, in reporting order.
    pub files: Vec<ComponentFile>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            dirs: strings(DEFAULT_COMPONENT_DIRS),
            files: DEFAULT_COMPONENT_FILES
                .iter()
                .map(|(kind, file)| ComponentFile {
                    kind: (*kind).to_string(),
                    file: (*file).to_string(),
                })
                .collect(),
        }
    }
}

/// One file of a component folder and the kind it is reported as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFile {
    pub kind: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Extensions skipped without an unsupported-format report.
    pub ignore: Vec<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ignore: strings(DEFAULT_IGNORED_EXTENSIONS),
        }
    }
}

impl Config {
    /// Loads the first configuration file found, or the defaults.
    ///
    /// An explicitly requested file that cannot be read is an error; the
    /// implicit locations are skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_value = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let user = dirs::config_dir().map(|dir| dir.join("deparse").join("config.toml"));

        match locate(explicit, env_value, &cwd, user.as_deref()) {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads a specific configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        parse_config::<Self>(path).map_err(|e| {
            DeparseError::Config {
                path: path.to_path_buf(),
                reason: format!("{:#}", e.root_cause()),
            }
            .into()
        })
    }

    /// Subdirectories searched for a module dialect (`js`, `sjs`, `css`,
    /// `pcss`). Other dialects have none.
    pub fn module_dirs(&self, dialect: &str) -> &[String] {
        match dialect {
            "js" => &self.search.modules.js,
            "sjs" => &self.search.modules.sjs,
            "css" => &self.search.modules.css,
            "pcss" => &self.search.modules.pcss,
            _ => &[],
        }
    }

    pub fn is_ignored(&self, extension: &str) -> bool {
        self.tracker.ignore.iter().any(|ignored| ignored.eq_ignore_ascii_case(extension))
    }
}

/// Picks the configuration file to load.
///
/// Explicit and environment paths are returned even when missing so that
/// the caller reports them; implicit locations must exist.
fn locate(
    explicit: Option<&Path>,
    env_value: Option<PathBuf>,
    cwd: &Path,
    user: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_value.filter(|path| !path.as_os_str().is_empty()) {
        return Some(path);
    }
    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    user.filter(|path| path.is_file()).map(Path::to_path_buf)
}
