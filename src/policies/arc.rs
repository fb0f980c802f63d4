use super::ordered::OrderedSet;
use crate::{CachePolicy, CacheStats, Item, PolicyCore};

/// Adaptive Replacement Cache (ARC) policy
///
/// Maintains two resident lists — T1 (items seen once recently) and T2
/// (items seen at least twice recently) — plus ghost lists B1 and B2
/// recording what was evicted from each. A ghost hit proves the cache
/// guessed wrong, so the target size `p` for T1 shifts toward whichever
/// regime (recency or frequency) is currently producing ghost hits. The
/// four lists stay pairwise disjoint and each ghost list is capped at
/// `capacity` entries.
#[derive(Debug)]
pub struct AdaptiveCache {
    core: PolicyCore,
    /// Resident items accessed exactly once recently
    t1: OrderedSet,
    /// Resident items accessed at least twice recently
    t2: OrderedSet,
    /// Ghost history of items evicted from T1
    b1: OrderedSet,
    /// Ghost history of items evicted from T2
    b2: OrderedSet,
    /// Target size for T1, adapted on ghost hits (0 ..= capacity)
    p: usize,
}

impl AdaptiveCache {
    /// Creates a new ARC cache with the specified capacity
    ///
    /// # Panics
    /// Panics if capacity is 0
    pub fn new(capacity: usize) -> Self {
        Self {
            core: PolicyCore::new(capacity),
            t1: OrderedSet::new(),
            t2: OrderedSet::new(),
            b1: OrderedSet::new(),
            b2: OrderedSet::new(),
            p: 0,
        }
    }

    /// Current adaptation target for T1.
    pub fn target(&self) -> usize {
        self.p
    }

    /// Demote T1's least-recent resident into B1, capping the ghost list.
    fn evict_t1_to_b1(&mut self) {
        if let Some(old) = self.t1.pop_front() {
            self.b1.push_back(old);
            if self.b1.len() > self.core.capacity() {
                self.b1.pop_front();
            }
        }
    }

    /// Demote T2's least-recent resident into B2, capping the ghost list.
    fn evict_t2_to_b2(&mut self) {
        if let Some(old) = self.t2.pop_front() {
            self.b2.push_back(old);
            if self.b2.len() > self.core.capacity() {
                self.b2.pop_front();
            }
        }
    }

    /// Core ARC replacement: shrink T1 when it exceeds the target `p`
    /// (or exactly meets it on a B2 ghost hit), otherwise shrink T2.
    fn replace(&mut self, in_b2: bool) {
        let t1_len = self.t1.len();
        if t1_len >= 1 && ((in_b2 && t1_len == self.p) || t1_len > self.p) {
            self.evict_t1_to_b1();
        } else if !self.t2.is_empty() {
            self.evict_t2_to_b2();
        }
    }
}

impl CachePolicy for AdaptiveCache {
    fn access(&mut self, item: Item) -> bool {
        self.core.tick();
        let capacity = self.core.capacity();

        // Hit in T1: second access proves frequency, promote to T2.
        if self.t1.remove(item) {
            self.t2.push_back(item);
            return self.core.hit();
        }

        // Hit in T2: refresh recency within T2.
        if self.t2.move_to_back(item) {
            return self.core.hit();
        }

        // Ghost hit in B1: recency regime was starved, grow the target.
        if self.b1.contains(item) {
            let delta = (self.b2.len() / self.b1.len().max(1)).max(1);
            self.p = (self.p + delta).min(capacity);
            self.replace(false);
            self.b1.remove(item);
            self.t2.push_back(item);
            return self.core.miss();
        }

        // Ghost hit in B2: frequency regime was starved, shrink the target.
        if self.b2.contains(item) {
            let delta = (self.b1.len() / self.b2.len().max(1)).max(1);
            self.p = self.p.saturating_sub(delta);
            self.replace(true);
            self.b2.remove(item);
            self.t2.push_back(item);
            return self.core.miss();
        }

        // Complete miss: bound the directory (L1 = T1 + B1, L2 = T2 + B2)
        // before admitting the newcomer into T1.
        let l1 = self.t1.len() + self.b1.len();
        let l2 = self.t2.len() + self.b2.len();
        if l1 == capacity {
            if self.t1.len() < capacity {
                self.b1.pop_front();
                self.replace(false);
            } else {
                // B1 is empty and T1 holds the whole capacity: drop the
                // least-recent resident outright, no ghost recorded.
                self.t1.pop_front();
            }
        } else if l1 < capacity && l1 + l2 >= capacity {
            if l1 + l2 >= 2 * capacity {
                self.b2.pop_front();
            }
            self.replace(false);
        }

        // Free a resident slot if T1 + T2 is still at capacity.
        if self.t1.len() + self.t2.len() >= capacity {
            if !self.t1.is_empty() {
                self.evict_t1_to_b1();
            } else {
                self.evict_t2_to_b2();
            }
        }

        self.t1.push_back(item);
        self.core.miss()
    }

    fn reset(&mut self) {
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.p = 0;
        self.core.reset();
    }

    fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn stats(&self) -> CacheStats {
        self.core.stats()
    }
}
