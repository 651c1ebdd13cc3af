//! # stratum-core
//!
//! Foundation crate for the Stratum configuration engine.
//! Defines the value model, property sources, the layered environment,
//! errors, and tracing bootstrap. Every other crate in the workspace
//! depends on this.

pub mod environment;
pub mod errors;
pub mod source;
pub mod trace;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use environment::{Environment, DEFAULT_PROPERTY_SOURCE_NAME};
pub use errors::error_code::StratumErrorCode;
pub use errors::ConfigError;
pub use source::PropertySource;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::value::{flatten_document, read_string_list, ConfigValue};
