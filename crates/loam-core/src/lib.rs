//! Raw memory allocation contract for Loam pools.
//!
//! This crate defines the seam between the arena subsystem and whatever
//! backend actually provides memory: the [`RawAllocator`] trait, the owned
//! [`MemBlock`] unit it hands out, and the [`HostAllocator`] backend for
//! plain host memory.
//!
//! Backends are always injected explicitly — every pool takes its allocator
//! as a constructor argument, and nothing in Loam reaches for a process-wide
//! default. Allocation failure is terminal for the in-flight request:
//! [`AllocError::Exhausted`] propagates to the caller with no retry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod align;
pub mod alloc;
pub mod block;
pub mod error;

pub use align::round_up;
pub use alloc::{HostAllocator, RawAllocator};
pub use block::MemBlock;
pub use error::AllocError;
