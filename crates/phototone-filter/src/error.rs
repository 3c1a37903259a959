//! Error types for phototone-filter

use phototone_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] phototone_core::Error),

    /// Invalid kernel size or parameters
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid filter parameters (thresholds, rank, gamma, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FilterError {
    /// Classify the error as an argument or a shape problem.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Core(e) => e.kind(),
            FilterError::InvalidKernel(_) | FilterError::InvalidArgument(_) => {
                ErrorKind::InvalidArgument
            }
        }
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
