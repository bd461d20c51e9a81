//! Error types for srs-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Contract violations at the caller boundary.
///
/// The scheduling and selection algorithms themselves are total over the
/// enum types; these errors only arise when converting raw values coming
/// from the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid rating value {0}, expected 1-4")]
    InvalidRating(u8),

    #[error("unknown priority level: {0}")]
    InvalidPriorityLevel(String),
}
