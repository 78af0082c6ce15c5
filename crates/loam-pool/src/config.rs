//! Pool configuration parameters.

/// Configuration for a [`GrowablePool`].
///
/// All values are fixed at construction. Sizes are in bytes; the pool
/// rounds them up to its allocator's alignment boundary.
///
/// [`GrowablePool`]: crate::GrowablePool
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Diagnostic name, used in error messages only.
    pub name: String,

    /// Size of the first segment, acquired eagerly at construction
    /// (fixed variant) or accepted as a hint (dynamic variant).
    pub initial_capacity: usize,

    /// Minimum size increment for new segments.
    ///
    /// When the active segment cannot satisfy a request of `n` bytes and no
    /// already-acquired segment can either, the pool creates a new segment
    /// of `max(n, expanding_unit)` bytes. Default: 16MB.
    pub expanding_unit: usize,

    /// Select the dynamic segment variant for every segment this pool
    /// creates. Used for host-side workloads whose allocation sizes are so
    /// irregular that pre-reserving a block would waste memory.
    pub dynamic: bool,

    /// Which allocator dynamic segments draw from. Ignored for fixed pools.
    pub dynamic_backing: DynamicBacking,
}

impl PoolConfig {
    /// Default minimum growth increment: 16MB.
    pub const DEFAULT_EXPANDING_UNIT: usize = 1 << 24;

    /// Config for a fixed (bump-pointer) pool with default growth policy.
    pub fn new(name: impl Into<String>, initial_capacity: usize) -> Self {
        Self {
            name: name.into(),
            initial_capacity,
            expanding_unit: Self::DEFAULT_EXPANDING_UNIT,
            dynamic: false,
            dynamic_backing: DynamicBacking::default(),
        }
    }

    /// Config for a dynamic (per-request) pool.
    pub fn dynamic(name: impl Into<String>, initial_capacity: usize) -> Self {
        Self {
            dynamic: true,
            ..Self::new(name, initial_capacity)
        }
    }
}

/// Allocator source for dynamic segments.
///
/// The original design gave every dynamic segment its own dedicated
/// host-memory allocator regardless of the pool's configured backend. That
/// asymmetry is useful when a device-backed pool needs host-side overflow
/// storage, but it is surprising as a silent default, so the choice is
/// explicit here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DynamicBacking {
    /// Use the allocator injected into the owning pool, like every other
    /// segment variant.
    #[default]
    Inherit,
    /// Give each dynamic segment a private host-memory allocator,
    /// independent of the pool's backend.
    PrivateHost,
}
