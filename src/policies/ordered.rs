use std::collections::HashMap;

use crate::Item;

/// Sentinel slot index for "no neighbor".
const NIL: usize = usize::MAX;

/// An insertion-ordered set of items with O(1) membership, append, removal,
/// and move-to-back.
///
/// This is the recency substrate shared by the policies: a hash index from
/// item to an arena slot, plus an index-linked doubly-linked list over the
/// arena. The front is the least-recently placed item, the back the most
/// recent. Freed slots go on a free list and are reused.
#[derive(Debug, Clone)]
pub(crate) struct OrderedSet {
    index: HashMap<Item, usize>,
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

#[derive(Debug, Clone)]
struct Slot {
    item: Item,
    prev: usize,
    next: usize,
}

impl Default for OrderedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedSet {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub(crate) fn contains(&self, item: Item) -> bool {
        self.index.contains_key(&item)
    }

    /// Item at the front (least recent), if any.
    pub(crate) fn front(&self) -> Option<Item> {
        if self.head == NIL {
            None
        } else {
            Some(self.slots[self.head].item)
        }
    }

    /// Append `item` at the back (most recent). The item must not already be
    /// present.
    pub(crate) fn push_back(&mut self, item: Item) {
        debug_assert!(!self.contains(item), "push_back of resident item");
        let at = self.alloc(item);
        self.link_back(at);
        self.index.insert(item, at);
    }

    /// Move an already-present item to the back. Returns `false` if the item
    /// is not in the set.
    pub(crate) fn move_to_back(&mut self, item: Item) -> bool {
        let Some(&at) = self.index.get(&item) else {
            return false;
        };
        if self.tail != at {
            self.unlink(at);
            self.link_back(at);
        }
        true
    }

    /// Remove and return the front (least recent) item.
    pub(crate) fn pop_front(&mut self) -> Option<Item> {
        let at = self.head;
        if at == NIL {
            return None;
        }
        let item = self.slots[at].item;
        self.unlink(at);
        self.index.remove(&item);
        self.free.push(at);
        Some(item)
    }

    /// Remove an arbitrary item. Returns `false` if it was not present.
    pub(crate) fn remove(&mut self, item: Item) -> bool {
        let Some(at) = self.index.remove(&item) else {
            return false;
        };
        self.unlink(at);
        self.free.push(at);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Iterate items front to back (least to most recent).
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            at: self.head,
        }
    }

    fn alloc(&mut self, item: Item) -> usize {
        let slot = Slot {
            item,
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(at) => {
                self.slots[at] = slot;
                at
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }

    fn link_back(&mut self, at: usize) {
        self.slots[at].prev = self.tail;
        self.slots[at].next = NIL;
        if self.tail == NIL {
            self.head = at;
        } else {
            let tail = self.tail;
            self.slots[tail].next = at;
        }
        self.tail = at;
    }

    fn unlink(&mut self, at: usize) {
        let (prev, next) = (self.slots[at].prev, self.slots[at].next);
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }
        self.slots[at].prev = NIL;
        self.slots[at].next = NIL;
    }
}

pub(crate) struct Iter<'a> {
    set: &'a OrderedSet,
    at: usize,
}

impl Iterator for Iter<'_> {
    type Item = crate::Item;

    fn next(&mut self) -> Option<Item> {
        if self.at == NIL {
            return None;
        }
        let slot = &self.set.slots[self.at];
        self.at = slot.next;
        Some(slot.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(set: &OrderedSet) -> Vec<Item> {
        set.iter().collect()
    }

    #[test]
    fn test_push_and_order() {
        let mut set = OrderedSet::new();
        set.push_back(1);
        set.push_back(2);
        set.push_back(3);

        assert_eq!(set.len(), 3);
        assert_eq!(collect(&set), vec![1, 2, 3]);
        assert_eq!(set.front(), Some(1));
        assert!(set.contains(2));
        assert!(!set.contains(9));
    }

    #[test]
    fn test_move_to_back() {
        let mut set = OrderedSet::new();
        set.push_back(1);
        set.push_back(2);
        set.push_back(3);

        assert!(set.move_to_back(1));
        assert_eq!(collect(&set), vec![2, 3, 1]);

        // Moving the tail is a no-op
        assert!(set.move_to_back(1));
        assert_eq!(collect(&set), vec![2, 3, 1]);

        assert!(!set.move_to_back(42));
    }

    #[test]
    fn test_pop_front() {
        let mut set = OrderedSet::new();
        set.push_back(10);
        set.push_back(20);

        assert_eq!(set.pop_front(), Some(10));
        assert_eq!(set.pop_front(), Some(20));
        assert_eq!(set.pop_front(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_middle() {
        let mut set = OrderedSet::new();
        set.push_back(1);
        set.push_back(2);
        set.push_back(3);

        assert!(set.remove(2));
        assert!(!set.remove(2));
        assert_eq!(collect(&set), vec![1, 3]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_slot_reuse() {
        let mut set = OrderedSet::new();
        set.push_back(1);
        set.push_back(2);
        set.remove(1);
        set.push_back(3);

        // The freed arena slot is recycled rather than growing the arena.
        assert_eq!(set.slots.len(), 2);
        assert_eq!(collect(&set), vec![2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut set = OrderedSet::new();
        set.push_back(1);
        set.push_back(2);
        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.front(), None);
        set.push_back(7);
        assert_eq!(collect(&set), vec![7]);
    }

    #[test]
    fn test_interleaved_against_oracle() {
        let mut set = OrderedSet::new();
        let mut oracle: Vec<Item> = Vec::new();

        for round in 0..200u64 {
            let item = round % 17;
            if set.contains(item) {
                set.move_to_back(item);
                let pos = oracle.iter().position(|&x| x == item).unwrap();
                oracle.remove(pos);
                oracle.push(item);
            } else {
                if set.len() == 8 {
                    let evicted = set.pop_front().unwrap();
                    assert_eq!(evicted, oracle.remove(0));
                }
                set.push_back(item);
                oracle.push(item);
            }
        }
        assert_eq!(collect(&set), oracle);
    }
}
