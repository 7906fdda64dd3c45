//! Error types for airtrace-core

use crate::DetailKey;
use thiserror::Error;

/// Core error type
///
/// Shared by the chart surface and grace cache implementations so that
/// collaborator failures flow through the engine unchanged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Series not found: {0}")]
    SeriesNotFound(DetailKey),

    #[error("Series already exists: {0}")]
    DuplicateSeries(DetailKey),

    #[error("Chart surface error: {0}")]
    Surface(String),

    #[error("Grace cache error: {0}")]
    Cache(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
