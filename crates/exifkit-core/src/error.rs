//! Error types shared across the library.

use thiserror::Error;

/// Errors raised by the metadata engine and the container front-ends.
///
/// `CorruptedMetadata` covers every violated structural invariant: an
/// out-of-range offset, overflowing size arithmetic, inconsistent
/// offset/size partner counts, a cyclic IFD chain, an exceeded visit
/// budget or a bad magic number inside a recognized envelope.
#[derive(Debug, Error)]
#[must_use]
pub enum Error {
    #[error("not a {0} image")]
    NotAnImage(&'static str),

    #[error("failed to open data source")]
    DataSourceOpen,

    #[error("failed to read input data")]
    InputDataRead,

    #[error("failed to read image data")]
    FailedToReadImageData,

    #[error("corrupted metadata: {0}")]
    CorruptedMetadata(String),

    #[error("invalid byte order marker: expected 'II' or 'MM', got {0:?}")]
    InvalidByteOrder([u8; 2]),

    #[error("offset out of range")]
    OffsetOutOfRange,

    #[error("unsupported data area offset type: {0}")]
    UnsupportedDataAreaOffsetType(u16),

    #[error("{0} segment does not fit into a JPEG segment (64 KiB limit)")]
    TooLargeJpegSegment(&'static str),

    #[error("setting {0} is not supported for {1} images")]
    InvalidSettingForImage(&'static str, &'static str),

    #[error("writing is not supported for {0} images")]
    WritingImageFormatUnsupported(&'static str),

    #[error("invalid Exif type code: {0}")]
    InvalidTypeValue(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a `CorruptedMetadata` error with a reason.
    pub fn corrupted(reason: impl Into<String>) -> Self {
        Error::CorruptedMetadata(reason.into())
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
