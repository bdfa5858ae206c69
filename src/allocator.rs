// Shared memory allocator (spec §5 "Concurrency & Resource Model").
//
// Grounded directly on the teacher's `BufferPool` (crates/mesio/src/hls/
// buffer_pool.rs): a capacity-capped pool of reusable `Vec<u8>` buffers,
// recycled instead of freed so repeated segment loads don't thrash the
// allocator. Ported from `std::sync::Mutex` to `parking_lot::Mutex` and
// generalized behind an `Allocator` trait so `Extractor`/`Loader`
// implementations can be handed a trait object rather than a concrete pool.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// A single reusable unit of backing storage for extracted sample data.
pub type Allocation = Vec<u8>;

/// Hands out and reclaims `Allocation`s for extractors to write samples
/// into, so buffer lifetime tracks load/read progress rather than
/// individual segment lifetimes.
pub trait Allocator: Send + Sync {
    fn acquire(&self, min_capacity: usize) -> Allocation;
    fn release(&self, allocation: Allocation);
    /// Drop pooled buffers back to allocation when idle (invoked when the
    /// last enabled track is disabled; spec §4.6 `onLoadCanceled`).
    fn trim(&self);
}

#[derive(Debug, Clone)]
pub struct AllocatorConfig {
    pub enabled: bool,
    pub default_capacity: usize,
    pub pool_size: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_capacity: 64 * 1024,
            pool_size: 32,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AllocatorStats {
    pub allocations: u64,
    pub reuses: u64,
    pub current_pool_size: usize,
}

pub struct PooledAllocator {
    config: AllocatorConfig,
    pool: Mutex<Vec<Allocation>>,
    allocations: AtomicU64,
    reuses: AtomicU64,
}

impl PooledAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self {
            config,
            pool: Mutex::new(Vec::new()),
            allocations: AtomicU64::new(0),
            reuses: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> AllocatorStats {
        AllocatorStats {
            allocations: self.allocations.load(Ordering::Relaxed),
            reuses: self.reuses.load(Ordering::Relaxed),
            current_pool_size: self.pool.lock().len(),
        }
    }
}

impl Allocator for PooledAllocator {
    fn acquire(&self, min_capacity: usize) -> Allocation {
        if !self.config.enabled {
            self.allocations.fetch_add(1, Ordering::Relaxed);
            return Vec::with_capacity(min_capacity.max(self.config.default_capacity));
        }

        let mut pool = self.pool.lock();
        if let Some(pos) = pool.iter().position(|buf| buf.capacity() >= min_capacity) {
            let buffer = pool.swap_remove(pos);
            self.reuses.fetch_add(1, Ordering::Relaxed);
            return buffer;
        }
        drop(pool);

        self.allocations.fetch_add(1, Ordering::Relaxed);
        debug!(
            min_capacity,
            default_capacity = self.config.default_capacity,
            "allocator pool exhausted, allocating new buffer"
        );
        Vec::with_capacity(min_capacity.max(self.config.default_capacity))
    }

    fn release(&self, mut allocation: Allocation) {
        if !self.config.enabled {
            return;
        }
        let capacity = allocation.capacity();
        allocation.clear();
        allocation.resize(capacity, 0);
        allocation.clear();

        let mut pool = self.pool.lock();
        if pool.len() < self.config.pool_size {
            pool.push(allocation);
        }
    }

    fn trim(&self) {
        self.pool.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_reuses_a_released_buffer() {
        let allocator = PooledAllocator::new(AllocatorConfig::default());
        let buf = allocator.acquire(1024);
        allocator.release(buf);
        let _ = allocator.acquire(512);
        let stats = allocator.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.reuses, 1);
    }

    #[test]
    fn acquire_allocates_fresh_when_disabled() {
        let allocator = PooledAllocator::new(AllocatorConfig { enabled: false, ..Default::default() });
        let buf = allocator.acquire(1024);
        allocator.release(buf);
        let _ = allocator.acquire(512);
        let stats = allocator.stats();
        assert_eq!(stats.allocations, 2);
        assert_eq!(stats.reuses, 0);
    }

    #[test]
    fn release_respects_pool_size_cap() {
        let allocator = PooledAllocator::new(AllocatorConfig { pool_size: 1, ..Default::default() });
        allocator.release(Vec::with_capacity(16));
        allocator.release(Vec::with_capacity(16));
        assert_eq!(allocator.stats().current_pool_size, 1);
    }

    #[test]
    fn trim_empties_the_pool() {
        let allocator = PooledAllocator::new(AllocatorConfig::default());
        allocator.release(Vec::with_capacity(16));
        allocator.trim();
        assert_eq!(allocator.stats().current_pool_size, 0);
    }
}
