//! Error types for header hashing

use thiserror::Error;

use crate::legacy::LegacyStage;

/// Errors surfaced by the header hasher and its configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Header is shorter than the chain's minimum header length
    #[error("header must be at least {min} bytes, got {len}")]
    InvalidHeader { len: usize, min: usize },

    /// A legacy chain stage has no implementation registered
    #[error("legacy hash primitive unavailable: {0}")]
    PrimitiveUnavailable(LegacyStage),

    /// Chain parameters failed validation
    #[error("invalid chain parameters: {0}")]
    InvalidConfig(String),

    /// Chain parameters could not be decoded
    #[error("failed to parse chain parameters: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
