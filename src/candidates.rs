//! Bounded best-k candidate set used during branch-and-bound search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Result, VpTreeError};

/// A candidate with its distance to the query.
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    pub distance: f64,
    pub item: T,
    /// Insertion sequence, breaks distance ties deterministically.
    seq: u64,
}

impl<T> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Candidate<T> {}

// Max-heap ordering: largest distance on top; among equal distances the
// later arrival is considered larger and is evicted first.
impl<T> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Candidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Holds the `capacity` closest items offered so far.
///
/// Backed by a max-heap so the current worst candidate is always on top;
/// `offer` is O(log capacity).
#[derive(Debug)]
pub struct BoundedCandidateSet<T> {
    heap: BinaryHeap<Candidate<T>>,
    capacity: usize,
    next_seq: u64,
}

impl<T> BoundedCandidateSet<T> {
    /// Create an empty set. Fails with `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(VpTreeError::InvalidCapacity { capacity });
        }
        Ok(Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
            next_seq: 0,
        })
    }

    /// Offer an item. Below capacity it is always kept; once full it replaces
    /// the current worst only if `distance` is strictly smaller.
    pub fn offer(&mut self, distance: f64, item: T) {
        if self.heap.len() < self.capacity {
            self.push(distance, item);
            return;
        }
        let beats_worst = self
            .heap
            .peek()
            .is_some_and(|worst| distance < worst.distance);
        if beats_worst {
            self.heap.pop();
            self.push(distance, item);
        }
    }

    fn push(&mut self, distance: f64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Candidate {
            distance,
            item,
            seq,
        });
    }

    /// The largest held distance, or `None` while the set is not yet full.
    ///
    /// An under-full set cannot bound the search: any unseen point could
    /// still qualify.
    pub fn worst_distance(&self) -> Option<f64> {
        if self.heap.len() < self.capacity {
            return None;
        }
        self.heap.peek().map(|c| c.distance)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Drain into a Vec sorted ascending by distance.
    pub fn into_sorted_vec(self) -> Vec<Candidate<T>> {
        self.heap.into_sorted_vec()
    }

    /// Items ascending by distance, distances dropped.
    pub fn into_results(self) -> Vec<T> {
        self.into_sorted_vec().into_iter().map(|c| c.item).collect()
    }
}
