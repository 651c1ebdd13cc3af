//! TOML document loader.

use stratum_core::{ConfigError, PropertySource};

use super::FormatLoader;

pub struct TomlLoader;

impl FormatLoader for TomlLoader {
    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn load(&self, name: &str, content: &str) -> Result<Vec<PropertySource>, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let document: serde_json::Value =
            toml::from_str(content).map_err(|err| ConfigError::Parse {
                format: "toml",
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
    fn parses_nested_tables() {
        let sources = TomlLoader
            .load("test", "[server]\nport = 8080\n")
            .unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].get("server.port"), Some(&ConfigValue::Integer(8080)));
    }

    #[test]
    fn empty_content_yields_no_sources() {
        assert!(TomlLoader.load("test", "  \n").unwrap().is_empty());
    }

    #[test]
    fn invalid_content_is_a_parse_error() {
        let err = TomlLoader.load("test", "not [valid").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "toml", .. }));
    }
}
