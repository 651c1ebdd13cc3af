//! Activation context and import phases.

use std::fmt;

use stratum_core::{ConfigError, Environment};

use crate::contributors::{Contributors, OnInactive};
use crate::profiles::Profiles;

/// Property forcing or declaring the running platform.
pub const PLATFORM_PROPERTY: &str = "stratum.platform";

/// Context used to decide whether contributed documents apply.
///
/// Created once the initial contributors have been processed (platform
/// only), then upgraded with profiles after they have been derived.
#[derive(Debug, Clone, Default)]
pub struct ActivationContext {
    platform: Option<String>,
    profiles: Option<Profiles>,
}

impl ActivationContext {
    /// Create the pre-profile context, deducing the platform from the
    /// environment or from contributed sources.
    pub fn new(
        environment: &Environment,
        contributors: &Contributors,
    ) -> Result<Self, ConfigError> {
        let platform = match environment.get(PLATFORM_PROPERTY) {
            Some(value) => Some(value.to_string()),
            None => contributors
                .value(PLATFORM_PROPERTY, None, OnInactive::Fail)?
                .map(|value| value.to_string()),
        };
        Ok(Self {
            platform,
            profiles: None,
        })
    }

    #[cfg(test)]
    pub(crate) fn of_platform(platform: Option<String>) -> Self {
        Self {
            platform,
            profiles: None,
        }
    }

    /// Upgrade to the post-profile-activation context.
    pub fn with_profiles(self, profiles: Profiles) -> Self {
        Self {
            platform: self.platform,
            profiles: Some(profiles),
        }
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn profiles(&self) -> Option<&Profiles> {
        self.profiles.as_ref()
    }

    pub fn has_activated_profiles(&self) -> bool {
        self.profiles.is_some()
    }
}

/// The two import phases. All imports of one phase are drained before
/// the engine advances to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportPhase {
    BeforeProfileActivation,
    AfterProfileActivation,
}

impl ImportPhase {
    /// The phase implied by the given context.
    pub fn for_context(context: Option<&ActivationContext>) -> Self {
        match context {
            Some(context) if context.has_activated_profiles() => {
                ImportPhase::AfterProfileActivation
            }
            _ => ImportPhase::BeforeProfileActivation,
        }
    }
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportPhase::BeforeProfileActivation => f.write_str("before-profile-activation"),
            ImportPhase::AfterProfileActivation => f.write_str("after-profile-activation"),
        }
    }
}
