//! Configuration resolution errors.

pub mod error_code;

use error_code::StratumErrorCode;

/// Errors raised while resolving, loading, or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported config location '{location}'")]
    UnsupportedLocation { location: String },

    #[error("Config location '{location}' does not exist")]
    LocationNotFound { location: String },

    #[error("Failed to parse {format} document '{name}': {message}")]
    Parse {
        format: &'static str,
        name: String,
        message: String,
    },

    #[error("Config name '{name}' cannot contain '*'")]
    InvalidConfigName { name: String },

    #[error("Search location '{location}' is invalid: {reason}")]
    InvalidWildcardLocation { location: String, reason: String },

    // The field is named `source_name` rather than `source`: thiserror
    // wires a field named `source` into `Error::source()`.
    #[error("Property '{key}' is not allowed in profile-specific source '{source_name}'")]
    InvalidProfileProperty { key: String, source_name: String },

    #[error("Property '{key}' imported from inactive source '{source_name}'")]
    InactivePropertyUse { key: String, source_name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StratumErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLocation { .. } => "CONFIG_UNSUPPORTED_LOCATION",
            Self::LocationNotFound { .. } => "CONFIG_LOCATION_NOT_FOUND",
            Self::Parse { .. } => "CONFIG_PARSE_ERROR",
            Self::InvalidConfigName { .. } => "CONFIG_INVALID_NAME",
            Self::InvalidWildcardLocation { .. } => "CONFIG_INVALID_WILDCARD_LOCATION",
            Self::InvalidProfileProperty { .. } => "CONFIG_INVALID_PROFILE_PROPERTY",
            Self::InactivePropertyUse { .. } => "CONFIG_INACTIVE_PROPERTY_USE",
            Self::Io(_) => "CONFIG_IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_stable_code() {
        let err = ConfigError::UnsupportedLocation {
            location: "weird:thing".into(),
        };
        assert_eq!(err.error_code(), "CONFIG_UNSUPPORTED_LOCATION");
        let err = ConfigError::Io(std::io::Error::other("boom"));
        assert_eq!(err.error_code(), "CONFIG_IO_ERROR");
    }

    #[test]
    fn source_name_is_plain_data_not_an_error_chain() {
        let err = ConfigError::InvalidProfileProperty {
            key: "stratum.profiles.active".into(),
            source_name: "app-dev".into(),
        };
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().contains("app-dev"));
        let err = ConfigError::InactivePropertyUse {
            key: "stratum.platform".into(),
            source_name: "inactive-doc".into(),
        };
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(err.error_code(), "CONFIG_INACTIVE_PROPERTY_USE");
    }

    #[test]
    fn display_includes_the_location() {
        let err = ConfigError::LocationNotFound {
            location: "missing.toml".into(),
        };
        assert!(err.to_string().contains("missing.toml"));
    }
}
