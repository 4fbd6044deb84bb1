//! Error types for the scene

use thiserror::Error;

/// Main error type
///
/// Generation and per-frame updates never fail; only configuration and
/// file I/O surface errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
