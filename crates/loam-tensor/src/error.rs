//! Tensor and parameter-collection error types.

use std::error::Error;
use std::fmt;

use loam_pool::PoolError;

/// Errors from parameter-collection operations.
#[derive(Debug)]
pub enum TensorError {
    /// A parameter with this fully-qualified name already exists.
    DuplicateName {
        /// The rejected name.
        name: String,
    },
    /// Parameter names must be non-empty and free of whitespace — they are
    /// written as single tokens in the persistence format.
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// The value slice length does not match the parameter's shape.
    LengthMismatch {
        /// Name of the parameter being written.
        name: String,
        /// Element count required by the shape.
        expected: usize,
        /// Element count supplied.
        found: usize,
    },
    /// The backing pool could not satisfy the storage request.
    Pool(PoolError),
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => write!(f, "duplicate parameter name '{name}'"),
            Self::InvalidName { name } => {
                write!(f, "invalid parameter name '{name}' (empty or contains whitespace)")
            }
            Self::LengthMismatch {
                name,
                expected,
                found,
            } => {
                write!(
                    f,
                    "value length mismatch for '{name}': shape holds {expected} elements, got {found}"
                )
            }
            Self::Pool(e) => write!(f, "parameter storage allocation failed: {e}"),
        }
    }
}

impl Error for TensorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PoolError> for TensorError {
    fn from(e: PoolError) -> Self {
        Self::Pool(e)
    }
}
