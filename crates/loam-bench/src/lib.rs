//! Benchmark profiles and utilities for the Loam arena subsystem.
//!
//! Provides pre-built pool configurations and workload generators shared by
//! the criterion benches:
//!
//! - [`scratch_profile`]: a fixed pool sized for a typical per-step scratch
//!   workload.
//! - [`irregular_sizes`]: a seeded stream of highly irregular allocation
//!   sizes for exercising the dynamic variant.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use loam_core::HostAllocator;
use loam_pool::{GrowablePool, PoolConfig};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Build a host-backed fixed pool with a 1MB first segment and 1MB growth.
pub fn scratch_profile(name: &str) -> GrowablePool {
    let mut config = PoolConfig::new(name, 1 << 20);
    config.expanding_unit = 1 << 20;
    GrowablePool::new(config, Box::new(HostAllocator::new()))
        .expect("host allocation cannot fail")
}

/// Build a host-backed dynamic pool.
pub fn dynamic_profile(name: &str) -> GrowablePool {
    GrowablePool::new(
        PoolConfig::dynamic(name, 0),
        Box::new(HostAllocator::new()),
    )
    .expect("host allocation cannot fail")
}

/// Seeded stream of `count` irregular allocation sizes in `[1, 64KB)`.
///
/// Sizes span four orders of magnitude, the access pattern the dynamic
/// segment variant exists for.
pub fn irregular_sizes(seed: u64, count: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let magnitude = rng.random_range(0u32..4);
            let base = 16usize << (4 * magnitude);
            rng.random_range(1..base)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_sizes_are_deterministic_per_seed() {
        assert_eq!(irregular_sizes(7, 32), irregular_sizes(7, 32));
        assert_ne!(irregular_sizes(7, 32), irregular_sizes(8, 32));
    }

    #[test]
    fn profiles_build() {
        assert!(!scratch_profile("t").is_dynamic());
        assert!(dynamic_profile("t").is_dynamic());
    }
}
