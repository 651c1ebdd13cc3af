//! Format loaders turn resolved resources into property sources.

mod json;
mod toml;
mod yaml;

use std::fs;
use std::path::Path;

use stratum_core::{ConfigError, PropertySource};

use crate::resource::ConfigResource;

pub use json::JsonLoader;
pub use toml::TomlLoader;
pub use yaml::YamlLoader;

/// Parses one document format into property sources.
///
/// A single file may yield multiple sources (multi-document YAML); they
/// are returned in document order.
pub trait FormatLoader {
    /// File extensions this loader claims, without the leading dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parse `content` into property sources named after `name`.
    fn load(&self, name: &str, content: &str) -> Result<Vec<PropertySource>, ConfigError>;
}

/// Registry of format loaders, checked in order.
pub struct FormatLoaders {
    loaders: Vec<Box<dyn FormatLoader>>,
}

impl Default for FormatLoaders {
    fn default() -> Self {
        Self {
            loaders: vec![
                Box::new(TomlLoader),
                Box::new(YamlLoader),
                Box::new(JsonLoader),
            ],
        }
    }
}

impl FormatLoaders {
    pub fn new(loaders: Vec<Box<dyn FormatLoader>>) -> Self {
        Self { loaders }
    }

    /// All claimed extensions, in registry order.
    pub fn extensions(&self) -> Vec<&'static str> {
        self.loaders
            .iter()
            .flat_map(|loader| loader.extensions().iter().copied())
            .collect()
    }

    /// Find the loader for a path by extension (case-insensitive).
    pub fn for_path(&self, path: &Path) -> Option<&dyn FormatLoader> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        self.loaders
            .iter()
            .find(|loader| loader.extensions().contains(&extension.as_str()))
            .map(|loader| &**loader)
    }

    pub fn can_load(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }

    /// Read a resource from disk and parse it.
    pub fn load_resource(
        &self,
        resource: &ConfigResource,
    ) -> Result<Vec<PropertySource>, ConfigError> {
        let loader =
            self.for_path(resource.path())
                .ok_or_else(|| ConfigError::UnsupportedLocation {
                    location: resource.path().display().to_string(),
                })?;
        let content = fs::read_to_string(resource.path())?;
        loader.load(&resource.to_string(), &content)
    }
}
