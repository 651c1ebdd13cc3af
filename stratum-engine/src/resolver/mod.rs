//! Location resolvers map location strings to loadable resources.

mod standard;

use stratum_core::ConfigError;

use crate::location::ConfigLocation;
use crate::profiles::Profiles;
use crate::resource::ConfigResource;

pub use standard::StandardLocationResolver;

/// Resolves a location string into concrete resources.
///
/// Resolvers are consulted in registry order; the first one that
/// claims a location resolves it.
pub trait LocationResolver {
    /// Whether this resolver can handle the location at all.
    fn is_resolvable(&self, location: &ConfigLocation) -> bool;

    /// Resolve the location without profile knowledge.
    fn resolve(&self, location: &ConfigLocation) -> Result<Vec<ConfigResource>, ConfigError>;

    /// Resolve profile-specific variants once profiles are known.
    fn resolve_profile_specific(
        &self,
        location: &ConfigLocation,
        profiles: &Profiles,
    ) -> Result<Vec<ConfigResource>, ConfigError>;
}

/// Ordered registry of location resolvers.
pub struct LocationResolvers {
    resolvers: Vec<Box<dyn LocationResolver>>,
}

impl LocationResolvers {
    pub fn new(resolvers: Vec<Box<dyn LocationResolver>>) -> Self {
        Self { resolvers }
    }

    /// Resolve every location, appending profile-specific variants
    /// after the unprofiled results so they end up with higher
    /// precedence once the import attach order reverses them.
    pub fn resolve_all(
        &self,
        locations: &[ConfigLocation],
        profiles: Option<&Profiles>,
    ) -> Result<Vec<(ConfigLocation, ConfigResource)>, ConfigError> {
        let mut out = Vec::new();
        for location in locations {
            let resolver = self
                .resolvers
                .iter()
                .find(|resolver| resolver.is_resolvable(location))
                .ok_or_else(|| ConfigError::UnsupportedLocation {
                    location: location.to_string(),
                })?;
            for resource in resolver.resolve(location)? {
                out.push((location.clone(), resource));
            }
            if let Some(profiles) = profiles {
                for resource in resolver.resolve_profile_specific(location, profiles)? {
                    out.push((location.clone(), resource));
                }
            }
        }
        Ok(out)
    }
}
