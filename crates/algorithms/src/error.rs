use crate::path::DecodeError;

use thiserror::Error;

/// The error type of the dashing functions.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum DashError {
    /// Dash lengths must be finite and strictly positive.
    #[error("Dash length {length} at index {index} is not a positive number.")]
    InvalidLength { index: usize, length: f64 },
    /// The dash offset must be finite.
    #[error("Dash offset {0} is not a finite number.")]
    InvalidOffset(f64),
    /// The flattening density must be finite and strictly positive.
    #[error("Flattening density {0} is not a positive number.")]
    InvalidDensity(f64),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
