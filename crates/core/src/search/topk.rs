//! Bounded top-k selection over badness scores.
//!
//! Shared by exact and graph search. A max-heap keyed by badness keeps at most
//! `k` entries; its root is the worst kept entry, so each admission after the
//! heap is full costs one `O(log k)` replacement. Ties on badness are broken by
//! arrival order (earlier wins) so selection is fully deterministic.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A kept entry. Max-heap by (badness, arrival) for eviction of the worst.
#[derive(Debug)]
struct Entry<T> {
    badness: OrderedFloat<f32>,
    seq: u64,
    item: T,
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.badness
            .cmp(&other.badness)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/// Keeps the `k` candidates with the smallest badness seen so far.
#[derive(Debug)]
pub struct TopK<T> {
    k: usize,
    heap: BinaryHeap<Entry<T>>,
    seq: u64,
}

impl<T> TopK<T> {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k),
            seq: 0,
        }
    }

    /// Capacity bound.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns `true` once `k` entries are held.
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Badness of the worst kept entry.
    pub fn worst(&self) -> Option<f32> {
        self.heap.peek().map(|e| e.badness.0)
    }

    /// Offers a candidate. Admitted if fewer than `k` are held, or if its
    /// badness is strictly less than the worst kept one (which is evicted).
    /// Returns whether the candidate was admitted.
    pub fn push(&mut self, badness: f32, item: T) -> bool {
        let badness = OrderedFloat(badness);
        if self.heap.len() < self.k {
            self.admit(badness, item);
            return true;
        }
        match self.heap.peek() {
            Some(worst) if badness < worst.badness => {
                self.heap.pop();
                self.admit(badness, item);
                true
            }
            _ => false,
        }
    }

    fn admit(&mut self, badness: OrderedFloat<f32>, item: T) {
        self.heap.push(Entry {
            badness,
            seq: self.seq,
            item,
        });
        self.seq += 1;
    }

    /// Drains the kept entries as `(badness, item)`, best (smallest badness) first.
    pub fn into_sorted_vec(self) -> Vec<(f32, T)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| (e.badness.0, e.item))
            .collect()
    }
}

/// Selects the best `k` of `candidates`, ranking each by `badness_of`.
/// Returns `(badness, candidate)` pairs, best first.
pub fn select_by<T, I, F>(k: usize, candidates: I, mut badness_of: F) -> Vec<(f32, T)>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f32,
{
    let mut top = TopK::new(k);
    for candidate in candidates {
        let badness = badness_of(&candidate);
        top.push(badness, candidate);
    }
    top.into_sorted_vec()
}
