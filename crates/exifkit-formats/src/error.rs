//! Error types for the container front-ends.

use thiserror::Error;

/// Container-level errors; engine errors pass through as `Core`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported format")]
    UnsupportedFormat,

    #[error("invalid file structure: {0}")]
    InvalidStructure(String),

    #[error("file too large: {0} bytes exceeds limit of {1} bytes")]
    FileTooLarge(u64, u64),

    #[error(transparent)]
    Core(#[from] exifkit_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
