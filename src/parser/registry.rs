//! Extension → dialect table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Dialect;
use crate::config::Config;
use crate::constants::CONFIG_FILE_NAME;
use crate::core::DeparseError;
use crate::utils::extension_of;

/// Built-in extensions.
const BUILTIN: &[(&str, Dialect)] = &[
    ("block", Dialect::Block),
    ("paml", Dialect::Markup),
    ("sjs", Dialect::Sugar),
    ("js", Dialect::Module),
    ("pcss", Dialect::PreprocessedStylesheet),
    ("css", Dialect::Stylesheet),
    ("c", Dialect::Header),
    ("cxx", Dialect::Header),
    ("c++", Dialect::Header),
    ("cpp", Dialect::Header),
    ("h", Dialect::Header),
    ("component", Dialect::Component),
];

/// Maps lower-cased file extensions to dialects.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    extensions: BTreeMap<String, Dialect>,
}

impl ParserRegistry {
    /// The built-in table.
    pub fn new() -> Self {
        Self {
            extensions: BUILTIN.iter().map(|(ext, dialect)| ((*ext).to_string(), *dialect)).collect(),
        }
    }

    /// The built-in table extended with the `[extensions]` configuration.
    pub fn from_config(config: &Config) -> Result<Self, DeparseError> {
        let mut registry = Self::new();
        for (extension, name) in &config.extensions {
            let dialect = Dialect::from_name(name).ok_or_else(|| DeparseError::Config {
                path: PathBuf::from(CONFIG_FILE_NAME),
                reason: format!("unknown dialect '{name}' for extension '{extension}'"),
            })?;
            registry.register(extension, dialect);
        }
        Ok(registry)
    }

    /// Maps `extension` to `dialect`, replacing any previous mapping.
    pub fn register(&mut self, extension: &str, dialect: Dialect) -> &mut Self {
        let extension = extension.trim_start_matches('.').to_lowercase();
        debug!("Registering .{} as {}", extension, dialect.name());
        self.extensions.insert(extension, dialect);
        self
    }

    pub fn get(&self, extension: &str) -> Option<Dialect> {
        self.extensions.get(&extension.to_lowercase()).copied()
    }

    /// Dialect for a path, selected by its extension.
    pub fn for_path(&self, path: &Path) -> Option<Dialect> {
        self.get(&extension_of(path))
    }

    /// Registered dialects, each once, in resolver query order.
    pub fn dialects(&self) -> Vec<Dialect> {
        Dialect::ALL
            .into_iter()
            .filter(|dialect| self.extensions.values().any(|registered| registered == dialect))
            .collect()
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = (&str, Dialect)> {
        self.extensions.iter().map(|(ext, dialect)| (ext.as_str(), *dialect))
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_extensions() {
        let registry = ParserRegistry::new();
        assert_eq!(registry.get("paml"), Some(Dialect::Markup));
        assert_eq!(registry.get("C++"), Some(Dialect::Header));
        assert_eq!(registry.for_path(Path::new("lib/js/app.JS")), Some(Dialect::Module));
        assert_eq!(registry.for_path(Path::new("widgets/button.component")), Some(Dialect::Component));
        assert_eq!(registry.for_path(Path::new("README.md")), None);
        assert_eq!(registry.extensions().count(), 12);
        assert_eq!(registry.dialects().len(), 8);
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = ParserRegistry::new();
        registry.register(".mjs", Dialect::Module).register("h", Dialect::Module);
        assert_eq!(registry.get("mjs"), Some(Dialect::Module));
        assert_eq!(registry.get("h"), Some(Dialect::Module));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.extensions.insert("scss".to_string(), "pcss".to_string());
        let registry = ParserRegistry::from_config(&config).unwrap();
        assert_eq!(registry.get("scss"), Some(Dialect::PreprocessedStylesheet));

        config.extensions.insert("tsx".to_string(), "typescript".to_string());
        let err = ParserRegistry::from_config(&config).unwrap_err();
        assert!(matches!(err, DeparseError::Config { .. }));
    }
}
