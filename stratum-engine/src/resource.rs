//! Fully-resolved, loadable config resources.

use std::fmt;
use std::path::{Path, PathBuf};

/// The identity of a resolved configuration document.
///
/// Equality and hashing over the full path (plus the profile variant
/// tag) is what guarantees that no resource is ever loaded twice, even
/// when two contributors request it independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigResource {
    path: PathBuf,
    profile: Option<String>,
}

impl ConfigResource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            profile: None,
        }
    }

    /// A profile-specific variant, e.g. `application-dev.toml`.
    pub fn with_profile(path: PathBuf, profile: impl Into<String>) -> Self {
        Self {
            path,
            profile: Some(profile.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}

impl fmt::Display for ConfigResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config resource '{}'", self.path.display())
    }
}
