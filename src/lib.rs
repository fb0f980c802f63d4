//! Cache replacement policy evaluation over synthetic and real access traces.
//!
//! The crate models caches at the residency level: items are opaque `u64`
//! identifiers, no payloads are stored. Each policy answers one question per
//! access — hit or miss — and keeps whatever bookkeeping its eviction
//! decision needs (recency order, frequency buckets, ghost histories,
//! decayed scores).

// Exported modules of the crate
pub mod experiment;
pub mod policies;
pub mod trace;

/// An item identifier tracked by the caches. Opaque: only identity matters.
pub type Item = u64;

/// Core trait defining cache policy behavior.
///
/// Types implementing this trait classify every access as hit or miss,
/// perform whatever eviction is needed to make the item resident, and
/// expose aggregate statistics for the experiment driver.
pub trait CachePolicy {
    /// Record one access. Returns `true` on a hit, `false` on a miss.
    ///
    /// After a miss the item is resident (subject to capacity); the policy
    /// decides what, if anything, was evicted to make room.
    fn access(&mut self, item: Item) -> bool;

    /// Clear all internal state and statistics back to the freshly
    /// constructed state.
    fn reset(&mut self);

    /// Current number of resident items. Never exceeds `capacity()`.
    fn len(&self) -> usize;

    /// Check if nothing is resident (length is zero)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident items, fixed at construction.
    fn capacity(&self) -> usize;

    /// Snapshot of the hit/miss counters accumulated so far.
    fn stats(&self) -> CacheStats;

    /// Fraction of accesses that hit, `0.0` before the first access.
    fn hit_ratio(&self) -> f64 {
        self.stats().hit_ratio()
    }
}

/// Struct holding hit/miss counters for one policy instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Calculate hit ratio (ratio of cache hits to total accesses)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of accesses recorded
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Bookkeeping shared by every policy: capacity, the access clock, and the
/// hit/miss counters. Owned by value inside each policy instance; `hits +
/// misses == time` holds between accesses.
#[derive(Debug, Clone)]
pub(crate) struct PolicyCore {
    capacity: usize,
    time: u64,
    hits: u64,
    misses: u64,
}

impl PolicyCore {
    /// # Panics
    /// Panics if capacity is 0
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be greater than 0");
        Self {
            capacity,
            time: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Advance the clock. Called exactly once at the top of every `access`,
    /// before any other effect.
    pub(crate) fn tick(&mut self) {
        self.time += 1;
    }

    /// Record a hit; returns `true` for tail-position use in `access`.
    pub(crate) fn hit(&mut self) -> bool {
        self.hits += 1;
        true
    }

    /// Record a miss; returns `false` for tail-position use in `access`.
    pub(crate) fn miss(&mut self) -> bool {
        self.misses += 1;
        false
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn time(&self) -> u64 {
        self.time
    }

    pub(crate) fn reset(&mut self) {
        self.time = 0;
        self.hits = 0;
        self.misses = 0;
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}

// Convenient re-exports for common types and modules
pub mod prelude {
    pub use super::policies::{
        AdaptiveCache, FrequencyCache, PolicyType, RecencyCache, TimeDecayedCache,
    };
    pub use super::{CachePolicy, CacheStats, Item};
}
