//! Two-stage profile determination.
//!
//! Profiles explicitly set on the environment always beat profiles
//! discovered in contributed sources; unset defaults fall back to
//! `["default"]`.

use stratum_core::{ConfigError, Environment};
use tracing::trace;

use crate::activation::ActivationContext;
use crate::contributors::{Contributors, OnInactive};
use crate::properties::{ACTIVE_PROFILES_PROPERTY, DEFAULT_PROFILES_PROPERTY};

const UNSET_DEFAULT: &[&str] = &["default"];

/// The activated profile set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profiles {
    active: Vec<String>,
    defaults: Vec<String>,
}

impl Profiles {
    pub fn of(active: Vec<String>, defaults: Vec<String>) -> Self {
        Self { active, defaults }
    }

    /// Determine profiles from the environment and the contributed
    /// sources resolved so far.
    pub fn derive(
        environment: &Environment,
        contributors: &Contributors,
        context: Option<&ActivationContext>,
    ) -> Result<Self, ConfigError> {
        let active = Self::get(
            environment.active_profiles(),
            contributors,
            context,
            ACTIVE_PROFILES_PROPERTY,
            &[],
        )?;
        let defaults = Self::get(
            environment.default_profiles(),
            contributors,
            context,
            DEFAULT_PROFILES_PROPERTY,
            UNSET_DEFAULT,
        )?;
        trace!(?active, ?defaults, "derived profiles");
        Ok(Self { active, defaults })
    }

    fn get(
        explicit: &[String],
        contributors: &Contributors,
        context: Option<&ActivationContext>,
        property: &str,
        unset: &[&str],
    ) -> Result<Vec<String>, ConfigError> {
        // A profile set differing from the unset default was set
        // directly on the environment and wins over discovered values.
        if !explicit.is_empty() && explicit.iter().map(String::as_str).ne(unset.iter().copied()) {
            return Ok(explicit.to_vec());
        }
        let discovered = contributors.string_list(property, context, OnInactive::Fail)?;
        if !discovered.is_empty() {
            return Ok(discovered);
        }
        Ok(unset.iter().map(|profile| profile.to_string()).collect())
    }

    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    /// Whether a document restricted to `profile` should apply.
    ///
    /// Default profiles only count while no profile is active.
    pub fn accepts(&self, profile: &str) -> bool {
        if self.active.is_empty() {
            return self.defaults.iter().any(|p| p == profile);
        }
        self.active.iter().any(|p| p == profile)
    }

    /// Active profiles followed by defaults, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.active
            .iter()
            .chain(self.defaults.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributor::Contributor;
    use stratum_core::PropertySource;

    fn contributors_with(entries: &[(&str, &str)]) -> Contributors {
        let mut source = PropertySource::new("test");
        for (key, value) in entries {
            source.insert(*key, *value);
        }
        let contributor = Contributor::imported(
            crate::location::ConfigLocation::of("test.toml"),
            crate::resource::ConfigResource::new("test.toml".into()),
            source,
        )
        .unwrap();
        Contributors::new(vec![contributor])
    }

    #[test]
    fn explicit_environment_profiles_win() {
        let mut environment = Environment::new();
        environment.set_active_profiles(vec!["explicit".into()]);
        let contributors = contributors_with(&[(ACTIVE_PROFILES_PROPERTY, "discovered")]);
        let profiles = Profiles::derive(&environment, &contributors, None).unwrap();
        assert_eq!(profiles.active(), ["explicit"]);
    }

    #[test]
    fn discovered_profiles_apply_when_environment_is_silent() {
        let environment = Environment::new();
        let contributors = contributors_with(&[(ACTIVE_PROFILES_PROPERTY, "dev, local")]);
        let profiles = Profiles::derive(&environment, &contributors, None).unwrap();
        assert_eq!(profiles.active(), ["dev", "local"]);
        assert_eq!(profiles.defaults(), ["default"]);
    }

    #[test]
    fn unset_defaults_fall_back() {
        let environment = Environment::new();
        let contributors = contributors_with(&[]);
        let profiles = Profiles::derive(&environment, &contributors, None).unwrap();
        assert!(profiles.active().is_empty());
        assert_eq!(profiles.defaults(), ["default"]);
        assert!(profiles.accepts("default"));
    }

    #[test]
    fn active_profiles_mask_defaults() {
        let profiles = Profiles::of(vec!["dev".into()], vec!["default".into()]);
        assert!(profiles.accepts("dev"));
        assert!(!profiles.accepts("default"));
        assert_eq!(profiles.iter().collect::<Vec<_>>(), vec!["dev", "default"]);
    }
}
