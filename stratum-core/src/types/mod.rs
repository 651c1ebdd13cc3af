//! Shared type definitions.

pub mod collections;
pub mod value;
