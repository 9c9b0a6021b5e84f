//! Bounded LRU cache of raw map blobs.
//!
//! Keyed by map id, capacity-bounded, most-recent-wins. The recency order is
//! a doubly-linked list threaded through a slot arena (indices, not pointers,
//! with a free list for slot reuse), paired with a hash index from map id to
//! slot. All three operations — lookup, insert, eviction — are O(1).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Sentinel for "no slot" in the intrusive list links.
const NIL: usize = usize::MAX;

struct Slot {
    map_id: i32,
    blob: Arc<[u8]>,
    prev: usize,
    next: usize,
}

struct CacheInner {
    capacity: usize,
    slots: Vec<Slot>,
    free_list: Vec<usize>,
    /// map id → slot index. Owns no blob data; the slot does.
    index: HashMap<i32, usize>,
    /// Most recently used slot.
    head: usize,
    /// Least recently used slot — the eviction candidate.
    tail: usize,
}

impl CacheInner {
    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.slots[slot].prev, self.slots[slot].next);
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
    }

    fn push_front(&mut self, slot: usize) {
        self.slots[slot].prev = NIL;
        self.slots[slot].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = slot;
        }
        self.head = slot;
        if self.tail == NIL {
            self.tail = slot;
        }
    }

    fn promote(&mut self, slot: usize) {
        if self.head != slot {
            self.unlink(slot);
            self.push_front(slot);
        }
    }

    fn evict_tail(&mut self) {
        let victim = self.tail;
        debug_assert_ne!(victim, NIL, "evict_tail called on empty cache");
        self.unlink(victim);
        self.index.remove(&self.slots[victim].map_id);
        self.slots[victim].blob = Arc::from(Vec::new());
        self.free_list.push(victim);
    }

    fn insert_front(&mut self, map_id: i32, blob: Arc<[u8]>) {
        let slot = match self.free_list.pop() {
            Some(slot) => {
                self.slots[slot] = Slot {
                    map_id,
                    blob,
                    prev: NIL,
                    next: NIL,
                };
                slot
            }
            None => {
                self.slots.push(Slot {
                    map_id,
                    blob,
                    prev: NIL,
                    next: NIL,
                });
                self.slots.len() - 1
            }
        };
        self.index.insert(map_id, slot);
        self.push_front(slot);
    }
}

/// A thread-safe, capacity-bounded LRU cache of raw map records.
///
/// Blobs are shared out as `Arc<[u8]>`, so a hit never copies record bytes.
pub struct BlobCache {
    inner: Mutex<CacheInner>,
}

impl BlobCache {
    /// Default capacity used by the map store.
    pub const DEFAULT_CAPACITY: usize = 20;

    /// Create a cache holding at most `capacity` blobs (clamped to ≥ 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                capacity: capacity.max(1),
                slots: Vec::new(),
                free_list: Vec::new(),
                index: HashMap::new(),
                head: NIL,
                tail: NIL,
            }),
        }
    }

    /// Look up a blob, promoting it to most-recently-used on a hit.
    pub fn get(&self, map_id: i32) -> Option<Arc<[u8]>> {
        let mut inner = self.inner.lock().unwrap();
        let slot = *inner.index.get(&map_id)?;
        inner.promote(slot);
        Some(Arc::clone(&inner.slots[slot].blob))
    }

    /// Insert or update a blob at the most-recently-used position.
    ///
    /// When the insert would exceed capacity, the least-recently-used entry
    /// is evicted first.
    pub fn put(&self, map_id: i32, blob: impl Into<Arc<[u8]>>) {
        let blob = blob.into();
        let mut inner = self.inner.lock().unwrap();
        if let Some(&slot) = inner.index.get(&map_id) {
            inner.slots[slot].blob = blob;
            inner.promote(slot);
            return;
        }
        if inner.index.len() >= inner.capacity {
            inner.evict_tail();
        }
        inner.insert_front(map_id, blob);
    }

    /// Drop all entries.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.index.clear();
        inner.slots.clear();
        inner.free_list.clear();
        inner.head = NIL;
        inner.tail = NIL;
    }

    /// Number of cached blobs.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().index.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().unwrap().capacity
    }

    /// Walk the recency list and cross-check it against the hash index.
    ///
    /// Test-only: panics on any inconsistency between the two structures.
    #[cfg(test)]
    fn assert_consistent(&self) {
        let inner = self.inner.lock().unwrap();
        let mut seen = std::collections::HashSet::new();
        let mut slot = inner.head;
        let mut prev = NIL;
        while slot != NIL {
            assert_eq!(inner.slots[slot].prev, prev, "broken back-link");
            assert_eq!(
                inner.index.get(&inner.slots[slot].map_id),
                Some(&slot),
                "list entry missing from index"
            );
            assert!(seen.insert(slot), "slot appears twice in recency list");
            prev = slot;
            slot = inner.slots[slot].next;
        }
        assert_eq!(inner.tail, prev, "tail does not terminate the list");
        assert_eq!(seen.len(), inner.index.len(), "list and index disagree on size");
        assert!(inner.index.len() <= inner.capacity, "capacity exceeded");
    }
}
