//! Dynamic per-request segments.

use loam_core::{AllocError, HostAllocator, MemBlock, RawAllocator};

use crate::config::DynamicBacking;

/// A segment that satisfies each request with an independent allocation.
///
/// Used for host-side workloads whose allocation sizes are too irregular
/// for a pre-reserved block to pay off. Every request becomes a standalone
/// chunk of exactly the requested size; `free()` must release each chunk
/// individually, since there is no contiguous cursor to rewind.
///
/// A dynamic segment never exhausts, so a pool in dynamic mode never grows
/// past its first segment.
pub struct DynamicSegment {
    chunks: Vec<MemBlock>,
    used: usize,
    /// Present when the segment draws from its own host allocator instead
    /// of the one injected into the owning pool.
    private: Option<HostAllocator>,
}

impl DynamicSegment {
    /// Create an empty segment.
    ///
    /// `capacity_hint` is accepted for interface symmetry with the fixed
    /// variant but nothing is reserved up front.
    pub fn new(capacity_hint: usize, backing: DynamicBacking) -> Self {
        let _ = capacity_hint;
        Self {
            chunks: Vec::new(),
            used: 0,
            private: match backing {
                DynamicBacking::Inherit => None,
                DynamicBacking::PrivateHost => Some(HostAllocator::new()),
            },
        }
    }

    /// Allocate exactly `n` bytes as a fresh chunk, returning its index.
    pub fn allocate(
        &mut self,
        n: usize,
        alloc: &mut dyn RawAllocator,
    ) -> Result<usize, AllocError> {
        let block = match &mut self.private {
            Some(host) => host.allocate(n)?,
            None => alloc.allocate(n)?,
        };
        self.chunks.push(block);
        self.used += n;
        Ok(self.chunks.len() - 1)
    }

    /// Release every chunk and clear the bookkeeping.
    pub fn free(&mut self, alloc: &mut dyn RawAllocator) {
        for chunk in self.chunks.drain(..) {
            match &mut self.private {
                Some(host) => host.release(chunk),
                None => alloc.release(chunk),
            }
        }
        self.used = 0;
    }

    /// Zero every recorded chunk in full, leaving bookkeeping unchanged.
    pub fn zero_allocated(&mut self, alloc: &mut dyn RawAllocator) {
        for chunk in &mut self.chunks {
            let len = chunk.len();
            match &mut self.private {
                Some(host) => host.zero(chunk, len),
                None => alloc.zero(chunk, len),
            }
        }
    }

    /// Pop and release tail chunks until `used` equals `mark`.
    ///
    /// # Panics
    ///
    /// Panics if `mark` exceeds `used`, or lands inside a chunk — a partial
    /// chunk rewind has no physical meaning for this variant.
    pub fn rewind(&mut self, mark: usize, alloc: &mut dyn RawAllocator) {
        assert!(
            mark <= self.used,
            "rewind mark {mark} exceeds used {}",
            self.used
        );
        while self.used > mark {
            let chunk = self.chunks.pop().expect("used > 0 implies a chunk");
            self.used -= chunk.len();
            match &mut self.private {
                Some(host) => host.release(chunk),
                None => alloc.release(chunk),
            }
        }
        assert_eq!(
            self.used, mark,
            "rewind mark must land on an allocation boundary"
        );
    }

    /// Sum of all recorded chunk sizes.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Number of live chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Shared view of `len` bytes at the start of chunk `index`.
    ///
    /// # Panics
    ///
    /// Panics if the chunk does not exist or is shorter than `len`.
    pub fn bytes(&self, index: usize, len: usize) -> &[u8] {
        &self.chunks[index].as_slice()[..len]
    }

    /// Mutable view of `len` bytes at the start of chunk `index`.
    ///
    /// # Panics
    ///
    /// Panics if the chunk does not exist or is shorter than `len`.
    pub fn bytes_mut(&mut self, index: usize, len: usize) -> &mut [u8] {
        &mut self.chunks[index].as_mut_slice()[..len]
    }

    /// Release all chunks, consuming the segment.
    pub fn release(mut self, alloc: &mut dyn RawAllocator) {
        self.free(alloc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_core::HostAllocator;

    fn inherit() -> DynamicSegment {
        DynamicSegment::new(0, DynamicBacking::Inherit)
    }

    #[test]
    fn each_request_is_a_standalone_chunk() {
        let mut alloc = HostAllocator::with_boundary(1);
        let mut seg = inherit();
        let a = seg.allocate(100, &mut alloc).unwrap();
        let b = seg.allocate(3, &mut alloc).unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(seg.chunk_count(), 2);
        assert_eq!(seg.used(), 103);
    }

    #[test]
    fn chunks_are_exactly_the_requested_size() {
        // No alignment rounding for the dynamic variant, whatever the
        // allocator's boundary.
        let mut alloc = HostAllocator::with_boundary(32);
        let mut seg = inherit();
        seg.allocate(7, &mut alloc).unwrap();
        assert_eq!(seg.used(), 7);
        assert_eq!(seg.bytes(0, 7).len(), 7);
    }

    #[test]
    fn free_releases_every_chunk() {
        let mut alloc = HostAllocator::with_boundary(1);
        let mut seg = inherit();
        seg.allocate(10, &mut alloc).unwrap();
        seg.allocate(20, &mut alloc).unwrap();
        assert_eq!(alloc.live_bytes(), 30);
        seg.free(&mut alloc);
        assert_eq!(alloc.live_bytes(), 0);
        assert_eq!(seg.used(), 0);
        assert_eq!(seg.chunk_count(), 0);
    }

    #[test]
    fn zero_allocated_clears_all_chunks() {
        let mut alloc = HostAllocator::with_boundary(1);
        let mut seg = inherit();
        seg.allocate(4, &mut alloc).unwrap();
        seg.allocate(4, &mut alloc).unwrap();
        seg.bytes_mut(0, 4).fill(0x11);
        seg.bytes_mut(1, 4).fill(0x22);
        seg.zero_allocated(&mut alloc);
        assert!(seg.bytes(0, 4).iter().all(|&b| b == 0));
        assert!(seg.bytes(1, 4).iter().all(|&b| b == 0));
        assert_eq!(seg.used(), 8);
    }

    #[test]
    fn rewind_pops_whole_tail_chunks() {
        let mut alloc = HostAllocator::with_boundary(1);
        let mut seg = inherit();
        seg.allocate(10, &mut alloc).unwrap();
        seg.allocate(20, &mut alloc).unwrap();
        seg.allocate(30, &mut alloc).unwrap();
        seg.rewind(30, &mut alloc);
        assert_eq!(seg.used(), 30);
        assert_eq!(seg.chunk_count(), 2);
        assert_eq!(alloc.live_bytes(), 30);
    }

    #[test]
    #[should_panic(expected = "allocation boundary")]
    fn rewind_inside_a_chunk_panics() {
        let mut alloc = HostAllocator::with_boundary(1);
        let mut seg = inherit();
        seg.allocate(10, &mut alloc).unwrap();
        seg.rewind(5, &mut alloc);
    }

    #[test]
    fn private_host_backing_leaves_pool_allocator_untouched() {
        let mut pool_alloc = HostAllocator::with_boundary(1);
        let mut seg = DynamicSegment::new(0, DynamicBacking::PrivateHost);
        seg.allocate(100, &mut pool_alloc).unwrap();
        assert_eq!(pool_alloc.live_bytes(), 0);
        assert_eq!(seg.used(), 100);
        seg.free(&mut pool_alloc);
        assert_eq!(seg.used(), 0);
    }
}
