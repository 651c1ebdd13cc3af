//! Named property sources.

use std::collections::BTreeMap;

use crate::types::value::{flatten_document, ConfigValue};

/// A named, flattened set of configuration properties.
///
/// Sources are immutable once built; the resolution engine replaces
/// whole sources rather than editing entries. `BTreeMap` keeps key
/// iteration deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySource {
    name: String,
    entries: BTreeMap<String, ConfigValue>,
}

impl PropertySource {
    /// Create an empty source with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Build a source by flattening a parsed document.
    pub fn from_document(name: impl Into<String>, document: &serde_json::Value) -> Self {
        let mut entries = BTreeMap::new();
        flatten_document("", document, &mut entries);
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Build a source from already-flattened entries.
    pub fn from_map(name: impl Into<String>, entries: BTreeMap<String, ConfigValue>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a single entry, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_document_flattens_entries() {
        let source = PropertySource::from_document("test", &json!({"a": {"b": 1}}));
        assert_eq!(source.get("a.b"), Some(&ConfigValue::Integer(1)));
        assert!(source.get("a").is_none());
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut source = PropertySource::new("test");
        source.insert("key", "first");
        source.insert("key", "second");
        assert_eq!(source.get("key"), Some(&ConfigValue::String("second".into())));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn contains_reports_known_keys() {
        let mut source = PropertySource::new("test");
        source.insert("present", true);
        assert!(source.contains("present"));
        assert!(!source.contains("absent"));
    }
}
