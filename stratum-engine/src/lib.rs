//! # stratum-engine
//!
//! Layered configuration resolution: named documents are loaded from
//! search locations, merged in a defined precedence order, and
//! resolved in two passes so that profile-specific documents can
//! themselves be discovered and loaded.
//!
//! The core data structure is an immutable tree of contributors. Each
//! processing step replaces one node with a copy carrying newly
//! resolved children, which keeps resolution deterministic: no
//! location is loaded twice, each import phase is fully drained before
//! the next begins, and profiles set explicitly on the environment
//! always beat profiles discovered in loaded documents.

pub mod activation;
pub mod contributor;
pub mod contributors;
pub mod engine;
pub mod importer;
pub mod loader;
pub mod location;
pub mod profiles;
pub mod properties;
pub mod resolver;
pub mod resource;

// Re-export the main entry points at the crate root.
pub use activation::{ActivationContext, ImportPhase};
pub use contributor::{Contributor, ContributorKind};
pub use contributors::{Contributors, OnInactive};
pub use engine::ConfigEngine;
pub use importer::Importer;
pub use loader::{FormatLoader, FormatLoaders};
pub use location::ConfigLocation;
pub use profiles::Profiles;
pub use resolver::{LocationResolver, LocationResolvers, StandardLocationResolver};
pub use resource::ConfigResource;
