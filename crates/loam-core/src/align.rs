//! Size rounding to allocator alignment boundaries.

/// Round `n` up to the next multiple of `boundary`.
///
/// `boundary` must be a nonzero power of two. Saturates at the largest
/// `boundary`-aligned `usize` instead of overflowing.
///
/// ```
/// use loam_core::round_up;
///
/// assert_eq!(round_up(0, 32), 0);
/// assert_eq!(round_up(1, 32), 32);
/// assert_eq!(round_up(32, 32), 32);
/// assert_eq!(round_up(33, 32), 64);
/// ```
pub fn round_up(n: usize, boundary: usize) -> usize {
    debug_assert!(
        boundary.is_power_of_two(),
        "alignment boundary must be a power of two, got {boundary}"
    );
    let mask = boundary - 1;
    match n.checked_add(mask) {
        Some(padded) => padded & !mask,
        None => usize::MAX & !mask,
    }
}
