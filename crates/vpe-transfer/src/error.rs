//! Error types for curve building.

use thiserror::Error;
use vpe_core::{AllocError, TransferFunction};

/// Result type for curve operations.
pub type TransferResult<T> = Result<T, TransferError>;

/// Errors that can occur while building curves.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Scratch or output storage could not be allocated.
    #[error("out of memory: {0}")]
    NoMemory(#[from] AllocError),

    /// No formula exists for this transfer function.
    #[error("unsupported transfer function: {0}")]
    Unsupported(TransferFunction),

    /// Curve would exceed its fixed capacity.
    #[error("curve has {len} points, capacity is {capacity}")]
    TooManyPoints {
        /// Requested point count.
        len: usize,
        /// Fixed capacity.
        capacity: usize,
    },

    /// Hardware PWL layout does not fit the source grid.
    #[error("invalid PWL layout: {0}")]
    InvalidPwlLayout(String),
}
