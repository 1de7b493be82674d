//! Custom error types for the savegame-codec crate.

use thiserror::Error;

use super::models::FormatTag;

/// The primary error type for all operations in this crate.
///
/// Per-strategy decode rejections are deliberately absent here: they are an
/// internal concern of the format probe, which recovers from every one of
/// them by falling through to the next strategy. Only the aggregate outcome
/// crosses the crate boundary.
#[derive(Debug, Error)]
pub enum SaveError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// Every codec strategy was exhausted without a successful decode.
    /// Surfaced verbatim so a UI can report "unsupported or corrupted file".
    #[error("unrecognized save format: no codec strategy matched the input")]
    UnrecognizedFormat,

    /// The strategy named by a format tag could not serialize the value.
    #[error("cannot re-encode value as {format}: {reason}")]
    EncodeFailure {
        format: FormatTag,
        reason: String,
    },

    /// A persisted format tag string did not name a known strategy.
    #[error("unknown format tag: {0:?}")]
    UnknownTag(String),
}

/// A convenience `Result` type alias using the crate's `SaveError` type.
pub type Result<T> = std::result::Result<T, SaveError>;
