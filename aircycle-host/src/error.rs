//! Host-side errors

use thiserror::Error;

use aircycle_core::ConfigError;

/// Errors from host capabilities
#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid loop configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Blob of {len} bytes exceeds buffer of {max}")]
    BlobTooLarge { len: usize, max: usize },
}
