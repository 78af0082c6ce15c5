//! The tagged segment variant presented to the pool.
//!
//! [`GrowablePool`] holds a list of [`PoolSegment`]s and drives them through
//! this uniform capability set — it never branches on the concrete variant
//! outside this module.
//!
//! [`GrowablePool`]: crate::GrowablePool

use loam_core::{AllocError, RawAllocator};

use crate::dynamic::DynamicSegment;
use crate::fixed::FixedSegment;
use crate::handle::Place;

/// One allocation unit within a pool: fixed bump-pointer buffer or
/// per-request dynamic chunks.
pub(crate) enum PoolSegment {
    Fixed(FixedSegment),
    Dynamic(DynamicSegment),
}

impl PoolSegment {
    /// Whether `n` bytes fit without growth. Dynamic segments never exhaust.
    pub(crate) fn has_room(&self, n: usize) -> bool {
        match self {
            Self::Fixed(seg) => seg.has_room(n),
            Self::Dynamic(_) => true,
        }
    }

    /// Allocate `n` bytes, returning where they landed.
    pub(crate) fn allocate(
        &mut self,
        n: usize,
        alloc: &mut dyn RawAllocator,
    ) -> Result<Place, AllocError> {
        match self {
            Self::Fixed(seg) => {
                // The pool checks has_room before delegating; overflow here
                // is a pool bookkeeping bug, not a recoverable condition.
                let offset = seg
                    .allocate(n)
                    .expect("active fixed segment has verified room");
                Ok(Place::Contiguous { offset })
            }
            Self::Dynamic(seg) => {
                let index = seg.allocate(n, alloc)?;
                Ok(Place::Chunk { index })
            }
        }
    }

    /// Reclaim all allocations made since the last free.
    pub(crate) fn free(&mut self, alloc: &mut dyn RawAllocator) {
        match self {
            Self::Fixed(seg) => seg.free(),
            Self::Dynamic(seg) => seg.free(alloc),
        }
    }

    /// Zero the allocated bytes without altering bookkeeping.
    pub(crate) fn zero_allocated(&mut self, alloc: &mut dyn RawAllocator) {
        match self {
            Self::Fixed(seg) => seg.zero_allocated(alloc),
            Self::Dynamic(seg) => seg.zero_allocated(alloc),
        }
    }

    /// Restore the segment's usage to an earlier mark.
    pub(crate) fn rewind(&mut self, mark: usize, alloc: &mut dyn RawAllocator) {
        match self {
            Self::Fixed(seg) => seg.rewind(mark),
            Self::Dynamic(seg) => seg.rewind(mark, alloc),
        }
    }

    /// Bytes allocated since the last free.
    pub(crate) fn used(&self) -> usize {
        match self {
            Self::Fixed(seg) => seg.used(),
            Self::Dynamic(seg) => seg.used(),
        }
    }

    /// Backing memory currently held, whether or not it is in use.
    pub(crate) fn reserved_bytes(&self) -> usize {
        match self {
            Self::Fixed(seg) => seg.capacity(),
            Self::Dynamic(seg) => seg.used(),
        }
    }

    /// Shared byte view for a resolved place.
    pub(crate) fn bytes(&self, place: Place, len: usize) -> &[u8] {
        match (self, place) {
            (Self::Fixed(seg), Place::Contiguous { offset }) => seg.bytes(offset, len),
            (Self::Dynamic(seg), Place::Chunk { index }) => seg.bytes(index, len),
            _ => panic!("handle does not match segment variant"),
        }
    }

    /// Mutable byte view for a resolved place.
    pub(crate) fn bytes_mut(&mut self, place: Place, len: usize) -> &mut [u8] {
        match (self, place) {
            (Self::Fixed(seg), Place::Contiguous { offset }) => seg.bytes_mut(offset, len),
            (Self::Dynamic(seg), Place::Chunk { index }) => seg.bytes_mut(index, len),
            _ => panic!("handle does not match segment variant"),
        }
    }

    /// Return all backing memory to the allocator, consuming the segment.
    pub(crate) fn release(self, alloc: &mut dyn RawAllocator) {
        match self {
            Self::Fixed(seg) => seg.release(alloc),
            Self::Dynamic(seg) => seg.release(alloc),
        }
    }
}
