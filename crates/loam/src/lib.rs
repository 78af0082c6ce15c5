//! Loam: growable memory arenas for tensor scratch storage.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Loam sub-crates. For most users, adding `loam` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use loam::prelude::*;
//!
//! // A pool backed by host memory: 4KB first segment, default growth.
//! let config = PoolConfig::new("scratch", 4096);
//! let mut pool = GrowablePool::new(config, Box::new(HostAllocator::new())).unwrap();
//!
//! // One computation step: allocate freely, then recycle everything.
//! let h = pool.allocate(1024).unwrap();
//! pool.bytes_mut(h).fill(1);
//! pool.free();
//!
//! // The next step reuses the same memory — no backend calls.
//! let h = pool.allocate(1024).unwrap();
//! assert_eq!(h.segment(), 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`mem`] | `loam-core` | Allocator contract, `MemBlock`, host backend |
//! | [`pool`] | `loam-pool` | Segments, growable pools, handles, metrics |
//! | [`tensor`] | `loam-tensor` | Shapes and pool-backed parameter collections |
//! | [`io`] | `loam-io` | Textual parameter save/load |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Allocator contract and host backend (`loam-core`).
///
/// Contains the [`mem::RawAllocator`] trait every backend implements, the
/// [`mem::MemBlock`] unit of exchange, and [`mem::HostAllocator`].
pub use loam_core as mem;

/// Segments, growable pools, handles, and metrics (`loam-pool`).
///
/// Most users only need [`pool::GrowablePool`] and [`pool::PoolConfig`]
/// from this module — they are also available in the [`prelude`].
pub use loam_pool as pool;

/// Tensor shapes and pool-backed parameter collections (`loam-tensor`).
///
/// Build a [`tensor::ParameterCollection`] over a pool, add named
/// parameters with [`tensor::Dim`] shapes, and read/write their values.
pub use loam_tensor as tensor;

/// Textual parameter persistence (`loam-io`).
///
/// Save named parameters with [`io::TextSaver`], restore them into an
/// identically structured collection with [`io::TextLoader`].
pub use loam_io as io;

/// Common imports for typical Loam usage.
///
/// ```rust
/// use loam::prelude::*;
/// ```
pub mod prelude {
    // Allocation backends
    pub use loam_core::{AllocError, HostAllocator, MemBlock, RawAllocator};

    // Pools
    pub use loam_pool::{
        BlockHandle, DynamicBacking, GrowablePool, PoolConfig, PoolError, PoolMetrics,
    };

    // Tensors
    pub use loam_tensor::{Dim, ParamId, ParameterCollection, TensorError};

    // Persistence
    pub use loam_io::{IoError, TextLoader, TextSaver};
}
