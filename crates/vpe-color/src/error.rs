//! Error types for pipeline builds.
//!
//! Every failure aborts the current build before anything is committed.
//! Collaborators that only understand the small status enumeration use
//! [`ColorError::status`].

use serde::Serialize;
use thiserror::Error;
use vpe_core::{AllocError, ColorDescriptor, ColorSpace};
use vpe_lut::LutError;
use vpe_transfer::TransferError;

/// Pipeline build error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Cache storage could not be allocated.
    #[error("out of memory: {0}")]
    NoMemory(#[from] AllocError),

    /// Descriptor classifies to neither a color space nor a transfer
    /// function.
    #[error("unsupported descriptor: {0}")]
    UnsupportedDescriptor(ColorDescriptor),

    /// No base conversion matrix exists for this color space.
    #[error("no conversion matrix for color space {0}")]
    UnsupportedColorSpace(ColorSpace),

    /// No output encoding exists for this color space.
    #[error("unsupported output color space {0}")]
    UnsupportedOutput(ColorSpace),

    /// Curve building failed.
    #[error("transfer curve error: {0}")]
    Transfer(#[source] TransferError),

    /// 3D LUT conversion failed.
    #[error("3D LUT error: {0}")]
    Lut(#[source] LutError),

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for pipeline operations.
pub type ColorResult<T> = Result<T, ColorError>;

/// Status reported to the register writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Build succeeded.
    Ok,
    /// Build aborted on allocation failure.
    NoMemory,
    /// Build aborted on an unsupported configuration.
    Unsupported,
}

impl ColorError {
    /// Collapses the error to a [`Status`].
    pub fn status(&self) -> Status {
        match self {
            Self::NoMemory(_) => Status::NoMemory,
            _ => Status::Unsupported,
        }
    }
}

impl From<TransferError> for ColorError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::NoMemory(a) => Self::NoMemory(a),
            other => Self::Transfer(other),
        }
    }
}

impl From<LutError> for ColorError {
    fn from(e: LutError) -> Self {
        match e {
            LutError::NoMemory(a) => Self::NoMemory(a),
            other => Self::Lut(other),
        }
    }
}

impl From<serde_yaml::Error> for ColorError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}
