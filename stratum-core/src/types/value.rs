//! Scalar configuration values and document flattening.
//!
//! Parsed documents (TOML, YAML, JSON) are flattened into dotted keys
//! before they enter a property source: nested tables become `a.b.c`,
//! sequences become indexed keys `a.b[0]`, `a.b[1]`, and so on. Lookups
//! across sources then reduce to plain string-keyed map access.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ConfigValue {
    /// Returns the string form if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean form if this value is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => Ok(()),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Integer(i) => write!(f, "{i}"),
            ConfigValue::Float(v) => write!(f, "{v}"),
            ConfigValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

/// Flatten a parsed document into dotted keys.
///
/// `prefix` is the key path accumulated so far; pass `""` for the
/// document root. Scalars at the root of a document are dropped since
/// they have no key to live under.
pub fn flatten_document(
    prefix: &str,
    value: &serde_json::Value,
    out: &mut BTreeMap<String, ConfigValue>,
) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let child_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_document(&child_prefix, child, out);
            }
        }
        serde_json::Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_document(&format!("{prefix}[{index}]"), child, out);
            }
        }
        scalar => {
            if prefix.is_empty() {
                return;
            }
            out.insert(prefix.to_string(), scalar_value(scalar));
        }
    }
}

fn scalar_value(value: &serde_json::Value) -> ConfigValue {
    match value {
        serde_json::Value::Null => ConfigValue::Null,
        serde_json::Value::Bool(b) => ConfigValue::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Integer(i),
            None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => ConfigValue::String(s.clone()),
        _ => ConfigValue::Null,
    }
}

/// Read a list-valued property through the given lookup.
///
/// Accepts either a comma-separated scalar (`"a, b"`) or flattened
/// indexed keys (`key[0]`, `key[1]`, ...). The scalar form wins when
/// both exist.
pub fn read_string_list<'a, F>(get: F, key: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<&'a ConfigValue>,
{
    if let Some(value) = get(key) {
        return match value {
            ConfigValue::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
            other => vec![other.to_string()],
        };
    }
    let mut out = Vec::new();
    let mut index = 0;
    while let Some(value) = get(&format!("{key}[{index}]")) {
        out.push(value.to_string());
        index += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn flatten(value: serde_json::Value) -> BTreeMap<String, ConfigValue> {
        let mut out = BTreeMap::new();
        flatten_document("", &value, &mut out);
        out
    }

    #[test]
    fn flatten_nested_tables() {
        let out = flatten(json!({"server": {"port": 8080, "host": "localhost"}}));
        assert_eq!(out["server.port"], ConfigValue::Integer(8080));
        assert_eq!(out["server.host"], ConfigValue::String("localhost".into()));
    }

    #[test]
    fn flatten_sequences_use_indexed_keys() {
        let out = flatten(json!({"profiles": {"active": ["dev", "local"]}}));
        assert_eq!(
            out["profiles.active[0]"],
            ConfigValue::String("dev".into())
        );
        assert_eq!(
            out["profiles.active[1]"],
            ConfigValue::String("local".into())
        );
    }

    #[test]
    fn flatten_mixed_scalars() {
        let out = flatten(json!({"a": true, "b": 1.5, "c": null}));
        assert_eq!(out["a"], ConfigValue::Bool(true));
        assert_eq!(out["b"], ConfigValue::Float(1.5));
        assert_eq!(out["c"], ConfigValue::Null);
    }

    #[test]
    fn flatten_drops_root_scalars() {
        assert!(flatten(json!("just a string")).is_empty());
    }

    #[test]
    fn string_list_from_comma_separated_scalar() {
        let out = flatten(json!({"key": "a, b ,c"}));
        let list = read_string_list(|k| out.get(k), "key");
        assert_eq!(list, vec!["a", "b", "c"]);
    }

    #[test]
    fn string_list_from_indexed_keys() {
        let out = flatten(json!({"key": ["x", "y"]}));
        let list = read_string_list(|k| out.get(k), "key");
        assert_eq!(list, vec!["x", "y"]);
    }

    #[test]
    fn string_list_missing_key_is_empty() {
        let out = flatten(json!({"other": 1}));
        assert!(read_string_list(|k| out.get(k), "key").is_empty());
    }

    proptest! {
        #[test]
        fn flatten_is_deterministic(port in 0u16..u16::MAX, host in "[a-z]{1,12}") {
            let doc = json!({"server": {"port": port, "host": host}});
            prop_assert_eq!(flatten(doc.clone()), flatten(doc));
        }

        #[test]
        fn string_list_roundtrips_comma_free_items(
            items in proptest::collection::vec("[a-z0-9_]{1,8}", 0..6)
        ) {
            let out = flatten(json!({"key": items.clone()}));
            prop_assert_eq!(read_string_list(|k| out.get(k), "key"), items);
        }
    }
}
