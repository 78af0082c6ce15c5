//! Test utilities for Loam development.
//!
//! Provides instrumented [`RawAllocator`] implementations: a
//! [`CountingAllocator`] wrapper whose call counters stay observable after
//! a pool takes ownership of the allocator, and a [`QuotaAllocator`] that
//! fails deterministically once a byte budget is spent.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use loam_core::{AllocError, HostAllocator, MemBlock, RawAllocator};

/// Shared counters recording backend traffic.
///
/// Pools take their allocator by value (`Box<dyn RawAllocator>`), so tests
/// hold a clone of the `Arc` and read the counters after the pool is built.
#[derive(Debug, Default)]
pub struct AllocCounters {
    pub allocations: AtomicUsize,
    pub releases: AtomicUsize,
    pub zeroes: AtomicUsize,
    pub bytes_allocated: AtomicUsize,
}

impl AllocCounters {
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }

    pub fn zeroes(&self) -> usize {
        self.zeroes.load(Ordering::Relaxed)
    }

    pub fn bytes_allocated(&self) -> usize {
        self.bytes_allocated.load(Ordering::Relaxed)
    }
}

/// Wraps an inner allocator and counts every backend call.
///
/// ```
/// use loam_core::RawAllocator;
/// use loam_test_utils::CountingAllocator;
///
/// let (mut alloc, counters) = CountingAllocator::host(1);
/// let block = alloc.allocate(64).unwrap();
/// alloc.release(block);
/// assert_eq!(counters.allocations(), 1);
/// assert_eq!(counters.releases(), 1);
/// ```
pub struct CountingAllocator<A: RawAllocator> {
    inner: A,
    counters: Arc<AllocCounters>,
}

impl CountingAllocator<HostAllocator> {
    /// Counting wrapper around a [`HostAllocator`] with the given boundary.
    ///
    /// Returns the allocator and a handle to its counters.
    pub fn host(boundary: usize) -> (Self, Arc<AllocCounters>) {
        Self::new(HostAllocator::with_boundary(boundary))
    }
}

impl<A: RawAllocator> CountingAllocator<A> {
    pub fn new(inner: A) -> (Self, Arc<AllocCounters>) {
        let counters = Arc::new(AllocCounters::default());
        (
            Self {
                inner,
                counters: Arc::clone(&counters),
            },
            counters,
        )
    }
}

impl<A: RawAllocator> RawAllocator for CountingAllocator<A> {
    fn boundary(&self) -> usize {
        self.inner.boundary()
    }

    fn allocate(&mut self, len: usize) -> Result<MemBlock, AllocError> {
        let block = self.inner.allocate(len)?;
        self.counters.allocations.fetch_add(1, Ordering::Relaxed);
        self.counters
            .bytes_allocated
            .fetch_add(len, Ordering::Relaxed);
        Ok(block)
    }

    fn release(&mut self, block: MemBlock) {
        self.counters.releases.fetch_add(1, Ordering::Relaxed);
        self.inner.release(block);
    }

    fn zero(&mut self, block: &mut MemBlock, len: usize) {
        self.counters.zeroes.fetch_add(1, Ordering::Relaxed);
        self.inner.zero(block, len);
    }
}

/// Host allocator with a hard byte budget.
///
/// Fails with [`AllocError::Exhausted`] once the budget is spent; released
/// bytes return to the budget. Drives allocation-failure paths without
/// exhausting real memory.
pub struct QuotaAllocator {
    inner: HostAllocator,
    remaining: usize,
}

impl QuotaAllocator {
    pub fn new(budget: usize, boundary: usize) -> Self {
        Self {
            inner: HostAllocator::with_boundary(boundary),
            remaining: budget,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl RawAllocator for QuotaAllocator {
    fn boundary(&self) -> usize {
        self.inner.boundary()
    }

    fn allocate(&mut self, len: usize) -> Result<MemBlock, AllocError> {
        if len > self.remaining {
            return Err(AllocError::Exhausted {
                requested: len,
                available: self.remaining,
            });
        }
        let block = self.inner.allocate(len)?;
        self.remaining -= len;
        Ok(block)
    }

    fn release(&mut self, block: MemBlock) {
        self.remaining += block.len();
        self.inner.release(block);
    }

    fn zero(&mut self, block: &mut MemBlock, len: usize) {
        self.inner.zero(block, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_allocator_tracks_all_call_kinds() {
        let (mut alloc, counters) = CountingAllocator::host(1);
        let mut block = alloc.allocate(32).unwrap();
        alloc.zero(&mut block, 32);
        alloc.release(block);

        assert_eq!(counters.allocations(), 1);
        assert_eq!(counters.zeroes(), 1);
        assert_eq!(counters.releases(), 1);
        assert_eq!(counters.bytes_allocated(), 32);
    }

    #[test]
    fn counters_survive_moving_the_allocator() {
        let (alloc, counters) = CountingAllocator::host(1);
        let mut boxed: Box<dyn RawAllocator> = Box::new(alloc);
        let block = boxed.allocate(8).unwrap();
        boxed.release(block);
        drop(boxed);
        assert_eq!(counters.allocations(), 1);
    }

    #[test]
    fn quota_allocator_fails_past_budget() {
        let mut alloc = QuotaAllocator::new(100, 1);
        let block = alloc.allocate(60).unwrap();
        let err = alloc.allocate(60).unwrap_err();
        assert_eq!(
            err,
            AllocError::Exhausted {
                requested: 60,
                available: 40,
            }
        );
        alloc.release(block);
        assert_eq!(alloc.remaining(), 100);
        assert!(alloc.allocate(60).is_ok());
    }
}
