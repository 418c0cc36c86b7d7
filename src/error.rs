use crate::profile::ProfileError;
use thiserror::Error;

/// Unified error type for the profile registry.
/// Aggregates low-level errors into actionable, high-level categories.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
