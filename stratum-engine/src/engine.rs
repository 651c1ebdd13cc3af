//! Top-level resolution driver.
//!
//! Wraps an [`Environment`], builds the initial contributor tree from
//! its property sources and the configured search locations, runs the
//! two-phase import resolution, and applies the imported sources back
//! to the environment in precedence order.

use std::path::PathBuf;

use stratum_core::{ConfigError, Environment, DEFAULT_PROPERTY_SOURCE_NAME};
use tracing::trace;

use crate::activation::ActivationContext;
use crate::contributor::{Contributor, ContributorKind};
use crate::contributors::Contributors;
use crate::importer::Importer;
use crate::loader::FormatLoaders;
use crate::location::ConfigLocation;
use crate::profiles::Profiles;
use crate::properties::IMPORT_PROPERTY;
use crate::resolver::{LocationResolvers, StandardLocationResolver};

/// Property overriding the search locations.
pub const LOCATION_PROPERTY: &str = "stratum.config.location";

/// Property adding locations without replacing the defaults.
pub const ADDITIONAL_LOCATION_PROPERTY: &str = "stratum.config.additional-location";

/// Property overriding the config file base names.
pub const CONFIG_NAME_PROPERTY: &str = "stratum.config.name";

/// Search locations used when [`LOCATION_PROPERTY`] is not set.
/// Later entries win.
pub const DEFAULT_SEARCH_LOCATIONS: &[&str] = &["./", "./config/*/", "./config/"];

const DEFAULT_CONFIG_NAMES: &[&str] = &["application"];

/// Drives config data resolution for one environment.
pub struct ConfigEngine {
    environment: Environment,
    importer: Importer,
    contributors: Contributors,
}

impl ConfigEngine {
    /// Create an engine resolving relative locations against the
    /// current working directory.
    pub fn new(environment: Environment) -> Result<Self, ConfigError> {
        let root = std::env::current_dir()?;
        Self::with_root(environment, root)
    }

    /// Create an engine resolving relative locations against `root`.
    pub fn with_root(environment: Environment, root: PathBuf) -> Result<Self, ConfigError> {
        let loaders = FormatLoaders::default();
        let config_names = {
            let names = environment.string_list(CONFIG_NAME_PROPERTY);
            if names.is_empty() {
                DEFAULT_CONFIG_NAMES.iter().map(|s| s.to_string()).collect()
            } else {
                names
            }
        };
        let resolver = StandardLocationResolver::new(root, config_names, loaders.extensions())?;
        let resolvers = LocationResolvers::new(vec![Box::new(resolver)]);
        let importer = Importer::new(resolvers, loaders);
        let contributors = Self::initial_contributors(&environment);
        Ok(Self {
            environment,
            importer,
            contributors,
        })
    }

    /// Build the initial tree: wrap every pre-existing property source
    /// (holding the default-properties source back so it stays last),
    /// then append initial-import contributors for the configured
    /// locations.
    fn initial_contributors(environment: &Environment) -> Contributors {
        trace!("building config data contributors");
        let mut contributors = Vec::with_capacity(environment.sources().len() + 8);
        let mut default_source = None;
        for source in environment.sources() {
            if source.name() == DEFAULT_PROPERTY_SOURCE_NAME {
                default_source = Some(source.clone());
            } else {
                trace!(source = source.name(), "wrapping existing property source");
                contributors.push(Contributor::existing(source.clone()));
            }
        }
        let locations = {
            let configured = environment.string_list(LOCATION_PROPERTY);
            if configured.is_empty() {
                DEFAULT_SEARCH_LOCATIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            } else {
                configured
            }
        };
        add_initial_imports(&mut contributors, &locations);
        add_initial_imports(
            &mut contributors,
            &environment.string_list(ADDITIONAL_LOCATION_PROPERTY),
        );
        add_initial_imports(&mut contributors, &environment.string_list(IMPORT_PROPERTY));
        if let Some(source) = default_source {
            contributors.push(Contributor::existing(source));
        }
        Contributors::new(contributors)
    }

    /// Process all contributions and apply the imported property
    /// sources to the environment, returning it.
    ///
    /// The two-pass structure is the point: imports are first drained
    /// without profile knowledge, profiles are then derived from
    /// everything loaded so far, and a final drain picks up the
    /// profile-specific documents that only became visible once the
    /// profile set stabilized.
    pub fn process_and_apply(mut self) -> Result<Environment, ConfigError> {
        trace!("processing initial contributors without activation context");
        let mut contributors = self
            .contributors
            .with_processed_imports(&mut self.importer, None)?;

        let mut activation = ActivationContext::new(&self.environment, &contributors)?;
        trace!(platform = ?activation.platform(), "processing with initial activation context");
        contributors = contributors.with_processed_imports(&mut self.importer, Some(&activation))?;

        let profiles = Profiles::derive(&self.environment, &contributors, Some(&activation))?;
        activation = activation.with_profiles(profiles);
        trace!("processing with profile activation context");
        contributors = contributors.with_processed_imports(&mut self.importer, Some(&activation))?;

        self.apply(&contributors, &activation);
        Ok(self.environment)
    }

    /// Walk contributors in priority order and append every active
    /// imported source. Priority order plus `add_last` preserves
    /// precedence; the default-properties source always goes last.
    fn apply(&mut self, contributors: &Contributors, activation: &ActivationContext) {
        let default_source = self.environment.remove(DEFAULT_PROPERTY_SOURCE_NAME);
        trace!("applying config data contributions");
        for contributor in contributors.iter() {
            if contributor.kind() != ContributorKind::Imported {
                continue;
            }
            let Some(source) = contributor.property_source() else {
                continue;
            };
            if !contributor.is_active(Some(activation)) {
                trace!(source = source.name(), "skipping inactive property source");
                continue;
            }
            trace!(source = source.name(), "adding imported property source");
            self.environment.add_last(source.clone());
        }
        if let Some(source) = default_source {
            self.environment.add_last(source);
        }
        if let Some(profiles) = activation.profiles() {
            self.environment
                .set_default_profiles(profiles.defaults().to_vec());
            self.environment
                .set_active_profiles(profiles.active().to_vec());
        }
    }
}

fn add_initial_imports(contributors: &mut Vec<Contributor>, locations: &[String]) {
    // Reversed so that later-listed locations take precedence.
    for location in locations.iter().rev() {
        trace!(%location, "adding initial config data import");
        contributors.push(Contributor::initial_import(ConfigLocation::of(location)));
    }
}
