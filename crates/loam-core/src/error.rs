//! Allocation error types.

use std::error::Error;
use std::fmt;

/// Errors from a [`RawAllocator`] backend.
///
/// [`RawAllocator`]: crate::RawAllocator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The backend cannot satisfy the request.
    ///
    /// Terminal for the in-flight request: pools propagate this without
    /// retrying beyond the single growth attempt already in progress.
    Exhausted {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes the backend could still provide at the time of the request.
        available: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                requested,
                available,
            } => {
                write!(
                    f,
                    "memory backend exhausted: requested {requested} bytes, {available} available"
                )
            }
        }
    }
}

impl Error for AllocError {}
