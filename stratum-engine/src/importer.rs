//! Resolve-and-load with duplicate suppression.

use stratum_core::{ConfigError, FxHashSet, PropertySource};
use tracing::{debug, trace};

use crate::loader::FormatLoaders;
use crate::location::ConfigLocation;
use crate::profiles::Profiles;
use crate::resolver::LocationResolvers;
use crate::resource::ConfigResource;

/// One successfully imported document set.
pub type Imported = (ConfigLocation, ConfigResource, Vec<PropertySource>);

/// Imports config data by resolving locations and loading the
/// resulting resources. Loaded resources are tracked so no resource is
/// ever loaded twice, even when two contributors request it.
pub struct Importer {
    resolvers: LocationResolvers,
    loaders: FormatLoaders,
    loaded: FxHashSet<ConfigResource>,
}

impl Importer {
    pub fn new(resolvers: LocationResolvers, loaders: FormatLoaders) -> Self {
        Self {
            resolvers,
            loaders,
            loaded: FxHashSet::default(),
        }
    }

    /// Resolve all locations and load every not-yet-loaded resource,
    /// in resolved order.
    pub fn resolve_and_load(
        &mut self,
        locations: &[ConfigLocation],
        profiles: Option<&Profiles>,
    ) -> Result<Vec<Imported>, ConfigError> {
        let resolved = self.resolvers.resolve_all(locations, profiles)?;
        let mut out = Vec::with_capacity(resolved.len());
        for (location, resource) in resolved {
            if !self.loaded.insert(resource.clone()) {
                trace!(%resource, "already loaded, skipping");
                continue;
            }
            debug!(%resource, %location, "loading config data");
            let sources = self.loaders.load_resource(&resource)?;
            out.push((location, resource, sources));
        }
        Ok(out)
    }

    /// Resources loaded so far.
    pub fn loaded(&self) -> &FxHashSet<ConfigResource> {
        &self.loaded
    }
}
