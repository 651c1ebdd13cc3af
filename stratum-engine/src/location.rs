//! Import location strings.

use std::fmt;

const OPTIONAL_PREFIX: &str = "optional:";

/// A location string requested by a contributor.
///
/// Locations prefixed with `optional:` are allowed to resolve to
/// nothing; all other file locations must exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLocation {
    value: String,
    optional: bool,
}

impl ConfigLocation {
    /// Parse a location string, stripping any `optional:` prefix.
    pub fn of(location: &str) -> Self {
        match location.strip_prefix(OPTIONAL_PREFIX) {
            Some(rest) => Self {
                value: rest.to_string(),
                optional: true,
            },
            None => Self {
                value: location.to_string(),
                optional: false,
            },
        }
    }

    /// The location without the `optional:` prefix.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "{OPTIONAL_PREFIX}{}", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

impl From<&str> for ConfigLocation {
    fn from(location: &str) -> Self {
        Self::of(location)
    }
}
