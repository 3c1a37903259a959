//! Error types for phototone-core
//!
//! Every operation validates its arguments on entry and fails fast, so an
//! error always means a malformed call rather than a transient condition.
//! [`Error::kind`] collapses the concrete variants into the two kinds that
//! callers are expected to branch on.

use thiserror::Error;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A size, threshold, LUT length or coordinate is out of its valid range
    InvalidArgument,
    /// Two inputs that must agree in shape do not
    DimensionMismatch,
}

/// phototone-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Pixel coordinate outside the image
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) | Error::IndexOutOfBounds { .. } => ErrorKind::InvalidArgument,
            Error::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        }
    }
}

/// Result type alias for phototone-core operations
pub type Result<T> = std::result::Result<T, Error>;
