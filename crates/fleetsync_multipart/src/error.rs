//! Error types for multipart decoding.

use thiserror::Error;

/// Result type for multipart decoding.
pub type MultipartResult<T> = Result<T, MultipartError>;

/// Errors that can occur while decoding a multipart body.
#[derive(Error, Debug)]
pub enum MultipartError {
    /// The body contains no opening boundary delimiter.
    #[error("missing multipart boundary delimiter")]
    MissingBoundary,

    /// The body ended before the terminal boundary.
    #[error("truncated multipart body at offset {0}")]
    Truncated(usize),

    /// A part header line is not valid.
    #[error("malformed part header: {0}")]
    MalformedHeader(String),

    /// The body was flagged multipart but decodes to zero parts.
    #[error("multipart body contains no parts")]
    Empty,

    /// The part count limit was exceeded.
    #[error("too many parts: {count} > {max}")]
    TooManyParts {
        /// Number of parts encountered so far.
        count: usize,
        /// Configured part count limit.
        max: usize,
    },

    /// A single part's content exceeds the size limit.
    #[error("part {name:?} too large: {len} > {max}")]
    PartTooLarge {
        /// Field name of the offending part.
        name: String,
        /// Content length of the part.
        len: usize,
        /// Configured per-part size limit.
        max: usize,
    },
}
