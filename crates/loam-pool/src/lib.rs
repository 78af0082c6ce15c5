//! Growable segment-based memory pools for tensor scratch storage.
//!
//! Numerical workloads allocate thousands of short-lived buffers per
//! computation step. Paying a backend allocation call for each one dominates
//! runtime, so this crate amortises them: a [`GrowablePool`] acquires memory
//! from its injected [`RawAllocator`] in large segments, hands out
//! bump-pointer allocations within them, and recycles the whole set with an
//! O(segments) [`free`](GrowablePool::free) between steps. Once a workload's
//! high-water mark has been reached, subsequent steps perform no backend
//! calls at all.
//!
//! # Architecture
//!
//! ```text
//! GrowablePool (growth policy, checkpoint/rewind, handle resolution)
//! └── PoolSegment[] (ordered, grows monotonically, never shrinks)
//!     ├── Fixed   — one contiguous MemBlock, bump-pointer cursor
//!     └── Dynamic — per-request chunks for highly irregular sizes
//! ```
//!
//! Allocations are addressed by [`BlockHandle`] — a (segment, offset)
//! description rather than a pointer — and byte views are materialised only
//! at the API boundary via [`GrowablePool::bytes`] and
//! [`GrowablePool::bytes_mut`]. Handles are invalidated by convention when
//! the pool is freed or rewound past them.
//!
//! [`RawAllocator`]: loam_core::RawAllocator

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod dynamic;
pub mod error;
pub mod fixed;
pub mod handle;
pub mod metrics;
pub mod pool;
mod segment;

pub use config::{DynamicBacking, PoolConfig};
pub use dynamic::DynamicSegment;
pub use error::PoolError;
pub use fixed::FixedSegment;
pub use handle::{BlockHandle, Place};
pub use metrics::PoolMetrics;
pub use pool::GrowablePool;
