//! Min-priority queue used as the A* open list.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

struct Entry<T, P> {
    priority: P,
    seq: u64,
    item: T,
}

// `BinaryHeap` is a max-heap, so both comparisons are flipped: the lowest
// priority comes out first and, among equal priorities, the oldest entry.
impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

/// A queue that always yields the item with the lowest priority.
///
/// Items with equal priority come out in insertion order. Each item is held
/// at most once: pushing an item that is already queued replaces its
/// priority, and the item then ranks as if it had just been inserted.
///
/// Replaced and removed entries stay in the heap and are skipped when they
/// reach the top.
pub struct PriorityQueue<T, P> {
    heap: BinaryHeap<Entry<T, P>>,
    live: HashMap<T, (u64, P)>,
    next_seq: u64,
}

impl<T, P> PriorityQueue<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord + Clone,
{
    /// Creates an empty queue.
    pub fn new() -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Inserts `item`, or changes its priority if it is already queued.
    ///
    /// # Returns
    ///
    /// The previous priority of `item`, if it was queued.
    pub fn push(&mut self, item: T, priority: P) -> Option<P> {
        let seq = self.next_seq;
        self.next_seq += 1;
        let previous = self.live.insert(item.clone(), (seq, priority.clone()));
        self.heap.push(Entry { priority, seq, item });
        previous.map(|(_, p)| p)
    }

    /// Removes and returns the item with the lowest priority.
    pub fn pop(&mut self) -> Option<(T, P)> {
        while let Some(entry) = self.heap.pop() {
            if self.is_current(&entry) {
                self.live.remove(&entry.item);
                return Some((entry.item, entry.priority));
            }
        }
        None
    }

    /// Returns the item that [`pop`](Self::pop) would return, without removing it.
    pub fn peek(&mut self) -> Option<(&T, &P)> {
        self.discard_stale();
        self.heap.peek().map(|entry| (&entry.item, &entry.priority))
    }

    /// Current priority of `item`, if it is queued.
    pub fn priority(&self, item: &T) -> Option<&P> {
        self.live.get(item).map(|(_, p)| p)
    }

    /// Checks whether `item` is queued.
    pub fn contains(&self, item: &T) -> bool {
        self.live.contains_key(item)
    }

    /// Drops `item` from the queue. Returns false if it was not queued.
    pub fn remove(&mut self, item: &T) -> bool {
        self.live.remove(item).is_some()
    }

    /// Number of queued items, not counting stale entries.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.next_seq = 0;
    }

    fn is_current(&self, entry: &Entry<T, P>) -> bool {
        self.live
            .get(&entry.item)
            .is_some_and(|(seq, _)| *seq == entry.seq)
    }

    fn discard_stale(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.is_current(top) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl<T, P> Default for PriorityQueue<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug, P: std::fmt::Debug> std::fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.live.iter().map(|(item, (_, p))| (item, p)))
            .finish()
    }
}
