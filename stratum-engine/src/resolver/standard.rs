//! Filesystem location resolver.
//!
//! Handles three location shapes:
//! - directories (`./config/`): each config name crossed with each
//!   known extension, existing files only
//! - wildcard directories (`./config/*/`): immediate subdirectories,
//!   expanded and sorted for determinism, then treated as directories
//! - files (`./extra.toml`): must exist unless the location is
//!   optional, and the extension must be known to a loader

use std::path::{Path, PathBuf};

use stratum_core::ConfigError;
use tracing::trace;

use crate::location::ConfigLocation;
use crate::profiles::Profiles;
use crate::resource::ConfigResource;

use super::LocationResolver;

#[derive(Debug)]
pub struct StandardLocationResolver {
    root: PathBuf,
    config_names: Vec<String>,
    extensions: Vec<&'static str>,
}

impl StandardLocationResolver {
    /// Create a resolver rooted at `root`.
    ///
    /// `config_names` are the base file names searched inside
    /// directory locations; they may not contain wildcards.
    pub fn new(
        root: PathBuf,
        config_names: Vec<String>,
        extensions: Vec<&'static str>,
    ) -> Result<Self, ConfigError> {
        for name in &config_names {
            if name.contains('*') {
                return Err(ConfigError::InvalidConfigName { name: name.clone() });
            }
        }
        Ok(Self {
            root,
            config_names,
            extensions,
        })
    }

    fn full_path(&self, value: &str) -> PathBuf {
        let trimmed = value.strip_prefix("./").unwrap_or(value);
        let path = Path::new(trimmed);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn resolve_directory(&self, dir: &Path, profile: Option<&str>) -> Vec<ConfigResource> {
        let mut out = Vec::new();
        for name in &self.config_names {
            for extension in &self.extensions {
                let file_name = match profile {
                    Some(profile) => format!("{name}-{profile}.{extension}"),
                    None => format!("{name}.{extension}"),
                };
                let path = dir.join(file_name);
                if path.is_file() {
                    out.push(match profile {
                        Some(profile) => ConfigResource::with_profile(path, profile),
                        None => ConfigResource::new(path),
                    });
                }
            }
        }
        out
    }

    fn resolve_file(
        &self,
        location: &ConfigLocation,
        profile: Option<&str>,
    ) -> Result<Vec<ConfigResource>, ConfigError> {
        let path = match profile {
            Some(profile) => match profile_variant(&self.full_path(location.value()), profile) {
                Some(path) => path,
                None => return Ok(Vec::new()),
            },
            None => self.full_path(location.value()),
        };
        let known_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|ext| self.extensions.contains(&ext.as_str()));
        if !known_extension {
            return Err(ConfigError::UnsupportedLocation {
                location: location.to_string(),
            });
        }
        if !path.is_file() {
            if profile.is_some() || location.is_optional() {
                trace!(%location, "optional location not found, skipping");
                return Ok(Vec::new());
            }
            return Err(ConfigError::LocationNotFound {
                location: location.to_string(),
            });
        }
        Ok(vec![match profile {
            Some(profile) => ConfigResource::with_profile(path, profile),
            None => ConfigResource::new(path),
        }])
    }

    fn wildcard_directories(&self, location: &ConfigLocation) -> Result<Vec<PathBuf>, ConfigError> {
        let value = location.value();
        if value.matches('*').count() > 1 {
            return Err(ConfigError::InvalidWildcardLocation {
                location: location.to_string(),
                reason: "cannot contain multiple wildcards".to_string(),
            });
        }
        if !value.ends_with("*/") {
            return Err(ConfigError::InvalidWildcardLocation {
                location: location.to_string(),
                reason: "must end with '*/'".to_string(),
            });
        }
        let base = self.full_path(&value[..value.len() - 2]);
        let pattern = base.join("*");
        let entries =
            glob::glob(&pattern.to_string_lossy()).map_err(|err| {
                ConfigError::InvalidWildcardLocation {
                    location: location.to_string(),
                    reason: err.to_string(),
                }
            })?;
        let mut directories: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|path| path.is_dir())
            .collect();
        directories.sort();
        Ok(directories)
    }

    fn resolve_with_profile(
        &self,
        location: &ConfigLocation,
        profile: Option<&str>,
    ) -> Result<Vec<ConfigResource>, ConfigError> {
        let value = location.value();
        if value.contains('*') {
            let mut out = Vec::new();
            for directory in self.wildcard_directories(location)? {
                out.extend(self.resolve_directory(&directory, profile));
            }
            return Ok(out);
        }
        if value.ends_with('/') {
            return Ok(self.resolve_directory(&self.full_path(value), profile));
        }
        self.resolve_file(location, profile)
    }
}

/// `dir/name.ext` -> `dir/name-profile.ext`
fn profile_variant(path: &Path, profile: &str) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let extension = path.extension()?.to_str()?;
    Some(path.with_file_name(format!("{stem}-{profile}.{extension}")))
}

impl LocationResolver for StandardLocationResolver {
    /// The standard resolver is the catch-all at the end of the chain.
    fn is_resolvable(&self, _location: &ConfigLocation) -> bool {
        true
    }

    fn resolve(&self, location: &ConfigLocation) -> Result<Vec<ConfigResource>, ConfigError> {
        self.resolve_with_profile(location, None)
    }

    fn resolve_profile_specific(
        &self,
        location: &ConfigLocation,
        profiles: &Profiles,
    ) -> Result<Vec<ConfigResource>, ConfigError> {
        let mut out = Vec::new();
        for profile in profiles.iter() {
            out.extend(self.resolve_with_profile(location, Some(profile))?);
        }
        Ok(out)
    }
}
