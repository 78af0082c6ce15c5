//! Allocation handles.
//!
//! A [`BlockHandle`] encodes the physical location of an allocation within
//! a pool as a (segment, place) pair instead of a pointer. Byte views are
//! materialised at the API boundary by [`GrowablePool::bytes`] and
//! [`GrowablePool::bytes_mut`], keeping all aliasing under the borrow
//! checker.
//!
//! [`GrowablePool::bytes`]: crate::GrowablePool::bytes
//! [`GrowablePool::bytes_mut`]: crate::GrowablePool::bytes_mut

use std::fmt;

/// Location of one allocation within a [`GrowablePool`].
///
/// Handles stay valid until the pool is freed or rewound past them; after
/// that they are invalidated by convention, even though the backing memory
/// may still be mapped.
///
/// [`GrowablePool`]: crate::GrowablePool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct BlockHandle {
    /// Index of the owning segment in the pool's segment list.
    pub(crate) segment: usize,
    /// Where the bytes live within that segment.
    pub(crate) place: Place,
    /// Length of the allocation in bytes, as requested by the caller.
    pub(crate) len: usize,
}

impl BlockHandle {
    pub(crate) fn new(segment: usize, place: Place, len: usize) -> Self {
        Self {
            segment,
            place,
            len,
        }
    }

    /// Index of the owning segment.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Where the allocation lives within its segment.
    pub fn place(&self) -> Place {
        self.place
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for BlockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlockHandle(seg={}, {:?}, len={})",
            self.segment, self.place, self.len
        )
    }
}

/// Position of an allocation within a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Place {
    /// Byte offset into a fixed segment's contiguous buffer.
    Contiguous {
        /// Offset from the buffer base, always alignment-rounded.
        offset: usize,
    },
    /// Index of a dynamic segment's standalone chunk.
    Chunk {
        /// Position in the segment's chunk list.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_round_trip() {
        let h = BlockHandle::new(2, Place::Contiguous { offset: 96 }, 40);
        assert_eq!(h.segment(), 2);
        assert_eq!(h.place(), Place::Contiguous { offset: 96 });
        assert_eq!(h.len(), 40);
        assert!(!h.is_empty());
    }

    #[test]
    fn empty_handle() {
        let h = BlockHandle::new(0, Place::Chunk { index: 0 }, 0);
        assert!(h.is_empty());
    }

    #[test]
    fn display_names_segment_and_length() {
        let h = BlockHandle::new(1, Place::Contiguous { offset: 32 }, 8);
        let s = h.to_string();
        assert!(s.contains("seg=1"), "got: {s}");
        assert!(s.contains("len=8"), "got: {s}");
    }
}
