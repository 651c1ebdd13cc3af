//! Stable machine-readable error codes.

/// Implemented by every error type in the workspace so callers can
/// match on a stable code instead of a display string.
pub trait StratumErrorCode {
    fn error_code(&self) -> &'static str;
}
