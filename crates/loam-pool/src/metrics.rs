//! Pool allocation metrics.

/// Counters describing a pool's backend traffic and high-water usage.
///
/// Populated by [`GrowablePool`] as it runs; read them via
/// [`GrowablePool::metrics`] to confirm the amortisation is working — in a
/// steady-state workload `backend_allocations` stops growing after the
/// first cycle.
///
/// [`GrowablePool`]: crate::GrowablePool
/// [`GrowablePool::metrics`]: crate::GrowablePool::metrics
#[derive(Clone, Debug, Default)]
pub struct PoolMetrics {
    /// Segments created over the pool's lifetime, including the first.
    pub segments_created: u64,
    /// Successful raw-backend allocation calls (segment acquisitions for
    /// fixed pools, per-request chunks for dynamic pools).
    pub backend_allocations: u64,
    /// Highest `used()` value observed.
    pub peak_used: usize,
    /// Number of `free()` calls.
    pub resets: u64,
    /// Number of `set_used()` rewinds.
    pub rewinds: u64,
}
