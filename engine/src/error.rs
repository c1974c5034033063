//! Error types for the genealogy engine.
//!
//! Only the I/O seams fail. Graph lookups never error: an unknown id
//! resolves to `None` or an empty result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u8),
}

pub type Result<T> = std::result::Result<T, EngineError>;
