//! Hash collection aliases used across the workspace.
//!
//! FxHash is faster than SipHash for the short string and path keys we
//! deal with, and none of these maps are exposed to untrusted input.

pub use rustc_hash::{FxHashMap, FxHashSet};
