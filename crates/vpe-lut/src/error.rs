//! LUT error types.

use thiserror::Error;
use vpe_core::AllocError;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// Invalid LUT size.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Sample wider than the selected bit depth.
    #[error("sample {index} value {value} exceeds {max}")]
    OutOfRange {
        /// Flat sample index.
        index: usize,
        /// Offending value.
        value: u16,
        /// Largest allowed value.
        max: u16,
    },

    /// Storage could not be allocated.
    #[error("out of memory: {0}")]
    NoMemory(#[from] AllocError),
}
