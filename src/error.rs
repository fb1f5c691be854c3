//! Error types for buffer operations.

use std::fmt;

/// Result type alias for buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for buffer operations.
///
/// Every error is recoverable: a call that returns `Err` has left the
/// buffer exactly as it found it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Linear offset past the end of the document.
    OffsetOutOfRange { offset: usize, len: usize },
    /// Linear offset falls strictly inside a grapheme cluster.
    MidCluster { offset: usize },
    /// Position outside the document.
    PositionOutOfRange { row: usize, col: usize },
    /// Remote batch was built against a different version.
    VersionMismatch { expected: u64, actual: u64 },
    /// A tracked anchor could not be expressed as a linear offset.
    AnchorUnresolvable { row: usize, col: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for document of length {len}")
            }
            Self::MidCluster { offset } => {
                write!(f, "offset {offset} splits a grapheme cluster")
            }
            Self::PositionOutOfRange { row, col } => {
                write!(f, "position ({row}, {col}) out of range")
            }
            Self::VersionMismatch { expected, actual } => {
                write!(
                    f,
                    "version mismatch: batch built against {expected}, buffer is at {actual}"
                )
            }
            Self::AnchorUnresolvable { row, col } => {
                write!(f, "anchor at ({row}, {col}) cannot be converted to an offset")
            }
        }
    }
}

impl std::error::Error for Error {}
