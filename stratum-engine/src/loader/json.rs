//! JSON document loader.

use stratum_core::{ConfigError, PropertySource};

use super::FormatLoader;

pub struct JsonLoader;

impl FormatLoader for JsonLoader {
    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn load(&self, name: &str, content: &str) -> Result<Vec<PropertySource>, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let document: serde_json::Value =
            serde_json::from_str(content).map_err(|err| ConfigError::Parse {
                format: "json",
                name: name.to_string(),
                message: err.to_string(),
            })?;
        Ok(vec![PropertySource::from_document(name, &document)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::ConfigValue;

    #[test]
    fn parses_nested_objects() {
        let sources = JsonLoader
            .load("test", r#"{"server": {"host": "localhost"}}"#)
            .unwrap();
        assert_eq!(
            sources[0].get("server.host"),
            Some(&ConfigValue::String("localhost".into()))
        );
    }

    #[test]
    fn invalid_content_is_a_parse_error() {
        let err = JsonLoader.load("test", "{oops").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "json", .. }));
    }
}
