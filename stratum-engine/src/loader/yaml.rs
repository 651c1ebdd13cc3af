//! YAML document loader with multi-document support.

use serde::Deserialize;
use stratum_core::{ConfigError, PropertySource};

use super::FormatLoader;

pub struct YamlLoader;

impl FormatLoader for YamlLoader {
    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn load(&self, name: &str, content: &str) -> Result<Vec<PropertySource>, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut documents = Vec::new();
        for deserializer in serde_yaml::Deserializer::from_str(content) {
            let document =
                serde_json::Value::deserialize(deserializer).map_err(|err| ConfigError::Parse {
                    format: "yaml",
                    name: name.to_string(),
                    message: err.to_string(),
                })?;
            if document.is_null() {
                continue;
            }
            documents.push(document);
        }
        let multi = documents.len() > 1;
        Ok(documents
            .iter()
            .enumerate()
            .map(|(index, document)| {
                let source_name = if multi {
                    format!("{name} (document #{index})")
                } else {
                    name.to_string()
                };
                PropertySource::from_document(source_name, document)
            })
            .collect())
    }
}
