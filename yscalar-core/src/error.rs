//! Error classification for the typed-scalar layer.
//!
//! The layer only classifies failures. Whether a mistyped field is reported
//! and skipped or is fatal to the whole document is the caller's policy.

use crate::tag::TagError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure kinds surfaced by parse, emit and skip operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Ill-formed literal, tag/style mismatch, or a tag naming another type
    #[error("invalid value")]
    InvalidValue,

    /// Numeric value outside the requested width/signedness
    #[error("value out of range")]
    Range,

    /// Base64 payload with an invalid symbol or a truncated group
    #[error("malformed base64 encoding")]
    MalformedEncoding,

    /// Unknown core-schema suffix, or a local tag where a type is required
    #[error("unsupported tag")]
    Unsupported,

    /// The event source or sink reported a failure
    #[error("event stream failure: {0}")]
    UnderlyingFailure(String),
}

impl Error {
    /// Create an [`Error::UnderlyingFailure`].
    pub fn underlying(message: impl Into<String>) -> Self {
        Error::UnderlyingFailure(message.into())
    }

    /// Whether the event stream position is undefined after this error.
    ///
    /// Only source/sink failures are fatal; callers must stop using the
    /// stream after one.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnderlyingFailure(_))
    }
}

impl From<TagError> for Error {
    fn from(_: TagError) -> Self {
        Error::Unsupported
    }
}
