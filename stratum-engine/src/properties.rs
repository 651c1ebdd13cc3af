//! Per-document resolution directives.
//!
//! A loaded document can steer further resolution through a small set
//! of well-known properties: it may request additional imports and it
//! may restrict its own activation to a profile or platform.

use smallvec::SmallVec;
use stratum_core::{read_string_list, PropertySource};

use crate::activation::ActivationContext;
use crate::location::ConfigLocation;

/// Property listing further locations to import.
pub const IMPORT_PROPERTY: &str = "stratum.config.import";

/// Property restricting a document to a profile.
pub const ON_PROFILE_PROPERTY: &str = "stratum.config.activate.on-profile";

/// Property restricting a document to a platform.
pub const ON_PLATFORM_PROPERTY: &str = "stratum.config.activate.on-platform";

/// Property naming the active profiles.
pub const ACTIVE_PROFILES_PROPERTY: &str = "stratum.profiles.active";

/// Property naming the default profiles.
pub const DEFAULT_PROFILES_PROPERTY: &str = "stratum.profiles.default";

/// Directives parsed out of a single loaded document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDirectives {
    imports: SmallVec<[ConfigLocation; 4]>,
    on_profile: Option<String>,
    on_platform: Option<String>,
}

impl DocumentDirectives {
    /// Parse the directives present in a property source.
    pub fn from_source(source: &PropertySource) -> Self {
        let imports = read_string_list(|key| source.get(key), IMPORT_PROPERTY)
            .iter()
            .map(|location| ConfigLocation::of(location))
            .collect();
        Self {
            imports,
            on_profile: source.get(ON_PROFILE_PROPERTY).map(|v| v.to_string()),
            on_platform: source.get(ON_PLATFORM_PROPERTY).map(|v| v.to_string()),
        }
    }

    /// Directives carrying only imports (used for initial imports).
    pub fn of_imports(imports: Vec<ConfigLocation>) -> Self {
        Self {
            imports: imports.into_iter().collect(),
            on_profile: None,
            on_platform: None,
        }
    }

    pub fn imports(&self) -> &[ConfigLocation] {
        &self.imports
    }

    pub fn on_profile(&self) -> Option<&str> {
        self.on_profile.as_deref()
    }

    pub fn on_platform(&self) -> Option<&str> {
        self.on_platform.as_deref()
    }

    /// Whether the owning document applies under the given context.
    ///
    /// Activation restrictions can only be satisfied once the relevant
    /// context is known, so an `on-profile` document stays inactive
    /// until profiles have been activated.
    pub fn is_active(&self, context: Option<&ActivationContext>) -> bool {
        if let Some(platform) = &self.on_platform {
            match context.and_then(ActivationContext::platform) {
                Some(active) if active == platform => {}
                _ => return false,
            }
        }
        if let Some(profile) = &self.on_profile {
            match context.and_then(ActivationContext::profiles) {
                Some(profiles) if profiles.accepts(profile) => {}
                _ => return false,
            }
        }
        true
    }
}
