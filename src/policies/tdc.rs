use std::collections::HashMap;

use super::ordered::OrderedSet;
use crate::{CachePolicy, CacheStats, Item, PolicyCore};

/// Decay rate used by the experiment suite when none is given.
pub const DEFAULT_DECAY_RATE: f64 = 0.995;

/// Time-Decayed Cache (TDC) policy
///
/// Blends recency and frequency through one signal: each resident carries a
/// score that is the exponentially decayed sum of its past accesses,
/// `score(t) = Σ decay_rate^(t − t_i)`. A hit decays the stored score to the
/// current time and adds 1. On a miss at capacity, every resident's score is
/// decayed and persisted (a full O(capacity) rescan) and the minimum-score
/// item is evicted, insertion order breaking exact ties.
///
/// Decay close to 1 weights frequency (LFU-like); decay close to 0 weights
/// recency (LRU-like).
#[derive(Debug)]
pub struct TimeDecayedCache {
    core: PolicyCore,
    decay_rate: f64,
    /// Per-resident decayed score and the time it was last folded forward
    entries: HashMap<Item, ScoreEntry>,
    /// Residents in insertion order; fixes the eviction scan order
    order: OrderedSet,
}

#[derive(Debug, Clone, Copy)]
struct ScoreEntry {
    score: f64,
    last_update: u64,
}

impl TimeDecayedCache {
    /// Creates a new TDC cache with the default decay rate
    ///
    /// # Panics
    /// Panics if capacity is 0
    pub fn new(capacity: usize) -> Self {
        Self::with_decay_rate(capacity, DEFAULT_DECAY_RATE)
    }

    /// Creates a new TDC cache with an explicit decay rate
    ///
    /// # Panics
    /// Panics if capacity is 0 or `decay_rate` lies outside (0, 1)
    pub fn with_decay_rate(capacity: usize, decay_rate: f64) -> Self {
        assert!(
            decay_rate > 0.0 && decay_rate < 1.0,
            "decay rate must lie strictly between 0 and 1"
        );
        Self {
            core: PolicyCore::new(capacity),
            decay_rate,
            entries: HashMap::new(),
            order: OrderedSet::new(),
        }
    }

    /// The decay rate this cache was constructed with.
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    /// Score of `entry` decayed forward to time `now`.
    fn decayed(&self, entry: ScoreEntry, now: u64) -> f64 {
        entry.score * self.decay_rate.powf((now - entry.last_update) as f64)
    }

    /// Full rescan: decay every resident's score to `now`, persist it, and
    /// evict the strictly smallest. The first resident encountered in
    /// insertion order wins ties.
    fn evict_min_score(&mut self, now: u64) {
        let mut victim: Option<(Item, f64)> = None;
        let residents: Vec<Item> = self.order.iter().collect();
        for item in residents {
            if let Some(entry) = self.entries.get_mut(&item) {
                let score = entry.score * self.decay_rate.powf((now - entry.last_update) as f64);
                entry.score = score;
                entry.last_update = now;
                match victim {
                    Some((_, min)) if score >= min => {}
                    _ => victim = Some((item, score)),
                }
            }
        }
        if let Some((item, _)) = victim {
            self.entries.remove(&item);
            self.order.remove(item);
        }
    }
}

impl CachePolicy for TimeDecayedCache {
    fn access(&mut self, item: Item) -> bool {
        self.core.tick();
        let now = self.core.time();

        if let Some(entry) = self.entries.get(&item).copied() {
            let score = self.decayed(entry, now);
            self.entries.insert(
                item,
                ScoreEntry {
                    score: score + 1.0,
                    last_update: now,
                },
            );
            return self.core.hit();
        }

        if self.entries.len() >= self.core.capacity() {
            self.evict_min_score(now);
        }
        self.entries.insert(
            item,
            ScoreEntry {
                score: 1.0,
                last_update: now,
            },
        );
        self.order.push_back(item);
        self.core.miss()
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.core.reset();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn stats(&self) -> CacheStats {
        self.core.stats()
    }
}
