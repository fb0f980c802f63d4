use std::collections::HashMap;

use super::ordered::OrderedSet;
use crate::{CachePolicy, CacheStats, Item, PolicyCore};

/// A Least Frequently Used (LFU) cache replacement policy
///
/// Evicts the item with the lowest access frequency. When multiple items
/// share the minimum frequency, the oldest inserted among them is evicted.
/// Frequency buckets are insertion-ordered and `min_freq` tracks the lowest
/// non-empty bucket, keeping every access O(1).
#[derive(Debug)]
pub struct FrequencyCache {
    core: PolicyCore,
    /// Maps each resident item to its access frequency
    freqs: HashMap<Item, u64>,
    /// Maps frequency to the items holding it, oldest first
    buckets: HashMap<u64, OrderedSet>,
    /// Smallest frequency with a non-empty bucket (0 when empty)
    min_freq: u64,
}

impl FrequencyCache {
    /// Creates a new LFU cache with the specified capacity
    ///
    /// # Panics
    /// Panics if capacity is 0
    pub fn new(capacity: usize) -> Self {
        Self {
            core: PolicyCore::new(capacity),
            freqs: HashMap::new(),
            buckets: HashMap::new(),
            min_freq: 0,
        }
    }

    /// Moves a resident item from its current bucket into the next one up.
    fn increase_freq(&mut self, item: Item, freq: u64) {
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.remove(item);
            if bucket.is_empty() {
                self.buckets.remove(&freq);
                if self.min_freq == freq {
                    self.min_freq += 1;
                }
            }
        }
        self.freqs.insert(item, freq + 1);
        self.buckets.entry(freq + 1).or_default().push_back(item);
    }

    /// Evicts the oldest item in the minimum-frequency bucket.
    fn evict(&mut self) {
        if let Some(bucket) = self.buckets.get_mut(&self.min_freq) {
            if let Some(victim) = bucket.pop_front() {
                if bucket.is_empty() {
                    self.buckets.remove(&self.min_freq);
                }
                self.freqs.remove(&victim);
            }
        }
    }
}

impl CachePolicy for FrequencyCache {
    fn access(&mut self, item: Item) -> bool {
        self.core.tick();
        if let Some(&freq) = self.freqs.get(&item) {
            self.increase_freq(item, freq);
            return self.core.hit();
        }
        if self.freqs.len() >= self.core.capacity() {
            self.evict();
        }
        self.freqs.insert(item, 1);
        self.buckets.entry(1).or_default().push_back(item);
        // The new item always holds the minimum frequency.
        self.min_freq = 1;
        self.core.miss()
    }

    fn reset(&mut self) {
        self.freqs.clear();
        self.buckets.clear();
        self.min_freq = 0;
        self.core.reset();
    }

    fn len(&self) -> usize {
        self.freqs.len()
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn stats(&self) -> CacheStats {
        self.core.stats()
    }
}
