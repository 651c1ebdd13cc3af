//! The layered runtime environment.

use crate::source::PropertySource;
use crate::types::value::{read_string_list, ConfigValue};

/// Name of the implicit default-properties source. The engine always
/// re-appends this source last so it loses to everything else.
pub const DEFAULT_PROPERTY_SOURCE_NAME: &str = "defaultProperties";

/// An ordered collection of property sources plus the profile state.
///
/// The first source that defines a key wins, so earlier sources have
/// higher precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    sources: Vec<PropertySource>,
    active_profiles: Vec<String>,
    default_profiles: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property across all sources, first match wins.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    /// Read a list-valued property (comma-separated or indexed form).
    pub fn string_list(&self, key: &str) -> Vec<String> {
        read_string_list(|k| self.get(k), key)
    }

    /// Add a source at the highest-precedence position.
    pub fn add_first(&mut self, source: PropertySource) {
        self.sources.insert(0, source);
    }

    /// Add a source at the lowest-precedence position.
    pub fn add_last(&mut self, source: PropertySource) {
        self.sources.push(source);
    }

    /// Remove and return the source with the given name.
    pub fn remove(&mut self, name: &str) -> Option<PropertySource> {
        let index = self.sources.iter().position(|s| s.name() == name)?;
        Some(self.sources.remove(index))
    }

    pub fn sources(&self) -> &[PropertySource] {
        &self.sources
    }

    /// Source names in precedence order, highest first.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(PropertySource::name).collect()
    }

    pub fn active_profiles(&self) -> &[String] {
        &self.active_profiles
    }

    pub fn set_active_profiles(&mut self, profiles: Vec<String>) {
        self.active_profiles = profiles;
    }

    pub fn default_profiles(&self) -> &[String] {
        &self.default_profiles
    }

    pub fn set_default_profiles(&mut self, profiles: Vec<String>) {
        self.default_profiles = profiles;
    }

    /// Returns true if the given profile is either active, or is a
    /// default profile while no profiles are active.
    pub fn accepts_profile(&self, profile: &str) -> bool {
        if self.active_profiles.is_empty() {
            return self.default_profiles.iter().any(|p| p == profile);
        }
        self.active_profiles.iter().any(|p| p == profile)
    }
}
