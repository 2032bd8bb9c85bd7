//! Error types.

use thiserror::Error;

/// Errors that can occur when loading a [GamutClipTable](crate::GamutClipTable).
#[derive(Debug, Error)]
pub enum GamutTableError {
    /// The table file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob is not a whole number of 32-bit floats.
    #[error("gamut table has {0} bytes, which is not a multiple of 4")]
    TruncatedFloat(usize),

    /// The configured segment count is too large for any table to have.
    #[error("gamut table segment count {0} is out of range")]
    SegmentsOutOfRange(usize),

    /// The number of floats does not match the configured segment count. This usually means the
    /// segment count was changed without rebaking the table.
    #[error("gamut table has {found} values, expected {expected}")]
    LengthMismatch {
        /// Number of floats in the table.
        found: usize,
        /// Number of floats the configuration asks for.
        expected: usize,
    },
}
