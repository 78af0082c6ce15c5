//! The growable pool: an ordered, monotonically growing segment list behind
//! one allocate/free/zero/checkpoint interface.

use loam_core::{round_up, RawAllocator};

use crate::config::{DynamicBacking, PoolConfig};
use crate::dynamic::DynamicSegment;
use crate::error::PoolError;
use crate::fixed::FixedSegment;
use crate::handle::BlockHandle;
use crate::metrics::PoolMetrics;
use crate::segment::PoolSegment;

/// A growable memory pool supplying short-lived scratch buffers.
///
/// The pool owns an ordered list of segments and an index `current` marking
/// the one actively receiving allocations. Segments before `current` are
/// saturated and never revisited until the next [`free`](GrowablePool::free);
/// the list itself only grows, never shrinks, for the pool's lifetime.
///
/// `free()` resets every segment in O(segments) without touching the
/// backend, so a workload that repeats the same allocation pattern — one
/// computation step after another — pays backend costs only until its
/// high-water mark is reached, then recycles the same memory indefinitely.
///
/// One pool is driven by one computation context at a time; nothing here is
/// internally synchronized. Independent pools (one per device, one for
/// parameters vs. scratch) own disjoint memory and may be used from
/// different threads freely.
///
/// # Example
///
/// ```
/// use loam_core::HostAllocator;
/// use loam_pool::{GrowablePool, PoolConfig};
///
/// let config = PoolConfig::new("scratch", 1024);
/// let alloc = Box::new(HostAllocator::new());
/// let mut pool = GrowablePool::new(config, alloc).unwrap();
///
/// let h = pool.allocate(256).unwrap();
/// pool.bytes_mut(h).fill(7);
/// assert!(pool.bytes(h).iter().all(|&b| b == 7));
///
/// pool.free(); // h is invalidated by convention; memory is retained
/// assert_eq!(pool.used(), 0);
/// ```
pub struct GrowablePool {
    /// Diagnostic name, used in error messages.
    name: String,
    /// Ordered segment list. Only grows within the pool's lifetime.
    segments: Vec<PoolSegment>,
    /// Index of the segment actively receiving allocations.
    current: usize,
    /// Minimum size of a newly created segment.
    expanding_unit: usize,
    /// Construct dynamic segments instead of fixed ones on growth.
    dynamic: bool,
    /// Allocator source for dynamic segments.
    dynamic_backing: DynamicBacking,
    /// Injected backend; every segment draws from it (modulo
    /// `dynamic_backing`).
    allocator: Box<dyn RawAllocator>,
    metrics: PoolMetrics,
}

impl GrowablePool {
    /// Create a pool, eagerly constructing its first segment.
    ///
    /// For fixed pools this acquires and zeros `initial_capacity` bytes
    /// (rounded to the allocator's boundary) immediately; failure is
    /// [`PoolError::AllocationFailed`]. Dynamic pools allocate nothing up
    /// front.
    pub fn new(
        config: PoolConfig,
        mut allocator: Box<dyn RawAllocator>,
    ) -> Result<Self, PoolError> {
        let first = if config.dynamic {
            PoolSegment::Dynamic(DynamicSegment::new(
                config.initial_capacity,
                config.dynamic_backing,
            ))
        } else {
            let seg = FixedSegment::new(config.initial_capacity, allocator.as_mut()).map_err(
                |source| PoolError::AllocationFailed {
                    pool: config.name.clone(),
                    requested: config.initial_capacity,
                    source,
                },
            )?;
            PoolSegment::Fixed(seg)
        };

        let mut metrics = PoolMetrics {
            segments_created: 1,
            ..PoolMetrics::default()
        };
        if !config.dynamic {
            metrics.backend_allocations = 1;
        }

        Ok(Self {
            name: config.name,
            segments: vec![first],
            current: 0,
            expanding_unit: config.expanding_unit,
            dynamic: config.dynamic,
            dynamic_backing: config.dynamic_backing,
            allocator,
            metrics,
        })
    }

    /// Allocate `n` bytes, growing the segment list if needed.
    ///
    /// The active segment is used when it has room. Otherwise the pool
    /// first advances into an already-acquired later segment with room
    /// (no backend call — this is what makes repeated free/allocate
    /// cycles cheap), and only then creates a new segment of
    /// `max(n, expanding_unit)` bytes rounded to the alignment boundary.
    ///
    /// The returned handle stays valid, and the bytes it addresses stay in
    /// place, until [`free`](GrowablePool::free) or a
    /// [`set_used`](GrowablePool::set_used) rewind past it.
    pub fn allocate(&mut self, n: usize) -> Result<BlockHandle, PoolError> {
        if !self.segments[self.current].has_room(n) {
            self.grow(n)?;
        }
        let place = self.segments[self.current]
            .allocate(n, self.allocator.as_mut())
            .map_err(|source| PoolError::AllocationFailed {
                pool: self.name.clone(),
                requested: n,
                source,
            })?;
        if self.dynamic {
            self.metrics.backend_allocations += 1;
        }
        let used = self.used();
        if used > self.metrics.peak_used {
            self.metrics.peak_used = used;
        }
        Ok(BlockHandle::new(self.current, place, n))
    }

    /// Advance to a segment that can hold `n` bytes, creating one if no
    /// already-acquired segment has room.
    fn grow(&mut self, n: usize) -> Result<(), PoolError> {
        for idx in self.current + 1..self.segments.len() {
            if self.segments[idx].has_room(n) {
                self.current = idx;
                return Ok(());
            }
        }

        let capacity = round_up(n.max(self.expanding_unit), self.allocator.boundary());
        let segment = if self.dynamic {
            PoolSegment::Dynamic(DynamicSegment::new(capacity, self.dynamic_backing))
        } else {
            let seg = FixedSegment::new(capacity, self.allocator.as_mut()).map_err(|source| {
                PoolError::AllocationFailed {
                    pool: self.name.clone(),
                    requested: n,
                    source,
                }
            })?;
            self.metrics.backend_allocations += 1;
            PoolSegment::Fixed(seg)
        };
        self.segments.push(segment);
        self.current = self.segments.len() - 1;
        self.metrics.segments_created += 1;
        Ok(())
    }

    /// Reclaim every allocation in the pool.
    ///
    /// Fixed segments reset their cursors in O(1) and keep their buffers;
    /// dynamic segments release every chunk. The segment list is retained
    /// in full, and `current` returns to 0, so the next allocation cycle
    /// reuses the memory already acquired. All previously returned handles
    /// are invalidated by convention.
    pub fn free(&mut self) {
        let allocator = self.allocator.as_mut();
        for seg in &mut self.segments {
            seg.free(allocator);
        }
        self.current = 0;
        self.metrics.resets += 1;
    }

    /// Aggregate bytes allocated across all segments up to and including
    /// the active one.
    pub fn used(&self) -> usize {
        self.segments[..=self.current]
            .iter()
            .map(|seg| seg.used())
            .sum()
    }

    /// Restore the allocation cursor to a previously observed
    /// [`used`](GrowablePool::used) value.
    ///
    /// Checkpoint/rewind: record `used()` before a tentative
    /// sub-computation, then call this with the recorded mark to discard
    /// the sub-computation's allocations — without a full reset and
    /// without touching allocations committed before the mark. Segments
    /// past the landing point are rewound to empty but stay in the list.
    ///
    /// # Panics
    ///
    /// Panics if `mark` exceeds the current `used()` — the mark must be a
    /// previously valid high-water mark within the current segment layout.
    pub fn set_used(&mut self, mark: usize) {
        let used = self.used();
        assert!(mark <= used, "set_used mark {mark} exceeds used {used}");

        let mut remaining = mark;
        let mut landing = self.current;
        for idx in 0..=self.current {
            let seg_used = self.segments[idx].used();
            if remaining <= seg_used {
                landing = idx;
                break;
            }
            remaining -= seg_used;
        }

        let allocator = self.allocator.as_mut();
        for idx in landing + 1..=self.current {
            self.segments[idx].rewind(0, allocator);
        }
        self.segments[landing].rewind(remaining, allocator);
        self.current = landing;
        self.metrics.rewinds += 1;
    }

    /// Zero every byte allocated since the last [`free`](GrowablePool::free),
    /// across all active segments, leaving `used()` unchanged.
    ///
    /// Reserved-but-unallocated capacity is not touched.
    pub fn zero_allocated_memory(&mut self) {
        let current = self.current;
        let allocator = self.allocator.as_mut();
        for seg in &mut self.segments[..=current] {
            seg.zero_allocated(allocator);
        }
    }

    /// Shared byte view for an allocation.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not resolve within this pool's segments —
    /// including handles kept across a `free()` whose range is no longer
    /// backed.
    pub fn bytes(&self, handle: BlockHandle) -> &[u8] {
        self.segments[handle.segment].bytes(handle.place, handle.len)
    }

    /// Mutable byte view for an allocation.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not resolve within this pool's segments.
    pub fn bytes_mut(&mut self, handle: BlockHandle) -> &mut [u8] {
        self.segments[handle.segment].bytes_mut(handle.place, handle.len)
    }

    /// Diagnostic name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this pool constructs dynamic segments.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Number of segments currently held. Never decreases.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Backing memory currently held across all segments, used or not.
    pub fn reserved_bytes(&self) -> usize {
        self.segments.iter().map(|seg| seg.reserved_bytes()).sum()
    }

    /// Allocation metrics accumulated since construction.
    pub fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }
}

impl Drop for GrowablePool {
    fn drop(&mut self) {
        // Return every segment's backing memory to the injected allocator.
        let allocator = self.allocator.as_mut();
        for seg in self.segments.drain(..) {
            seg.release(allocator);
        }
    }
}

impl std::fmt::Debug for GrowablePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrowablePool")
            .field("name", &self.name)
            .field("dynamic", &self.dynamic)
            .field("segments", &self.segments.len())
            .field("current", &self.current)
            .field("used", &self.used())
            .finish()
    }
}
