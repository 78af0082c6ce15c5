//! Pool-specific error types.

use std::error::Error;
use std::fmt;

use loam_core::AllocError;

/// Errors that can occur during pool operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The raw backend was exhausted during initial construction or growth.
    ///
    /// Unrecoverable for the in-flight request: there is no fallback
    /// strategy beyond the single growth attempt already made.
    AllocationFailed {
        /// Diagnostic name of the pool that made the request.
        pool: String,
        /// Number of bytes the caller asked for.
        requested: usize,
        /// The backend failure.
        source: AllocError,
    },
    /// A fixed segment's bump pointer would overflow its capacity.
    ///
    /// The pool verifies remaining room before delegating, so this is never
    /// observable through [`GrowablePool`]; seeing it there indicates a pool
    /// bookkeeping bug and is treated as a fatal invariant violation. It is
    /// reachable only through direct [`FixedSegment`] use.
    ///
    /// [`GrowablePool`]: crate::GrowablePool
    /// [`FixedSegment`]: crate::FixedSegment
    SegmentOverflow {
        /// Alignment-rounded size of the rejected request.
        requested: usize,
        /// Bytes left in the segment.
        remaining: usize,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed {
                pool,
                requested,
                source,
            } => {
                write!(
                    f,
                    "pool '{pool}' failed to allocate {requested} bytes: {source}"
                )
            }
            Self::SegmentOverflow {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "fixed segment overflow: requested {requested} bytes, {remaining} remaining"
                )
            }
        }
    }
}

impl Error for PoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationFailed { source, .. } => Some(source),
            Self::SegmentOverflow { .. } => None,
        }
    }
}
