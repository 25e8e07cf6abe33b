use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-priority queue of tentative distances for Dijkstra-style searches.
///
/// Entries are ordered by `(distance, node)`, so among equal distances the
/// smallest node is popped first. This keeps searches reproducible.
#[derive(Debug)]
pub struct DistanceQueue<N>
where
    N: Copy + Ord + Debug,
{
    heap: BinaryHeap<Reverse<(OrderedFloat<f64>, N)>>,
    pushes: usize,
}

impl<N> Default for DistanceQueue<N>
where
    N: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pushes: 0,
        }
    }
}

impl<N> DistanceQueue<N>
where
    N: Copy + Ord + Debug,
{
    /// Creates a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of queued entries (stale ones included)
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Total number of pushes since creation
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Queues `node` at tentative `distance`
    pub fn push(&mut self, node: N, distance: f64) {
        self.pushes += 1;
        self.heap.push(Reverse((OrderedFloat(distance), node)));
    }

    /// Removes the entry with the smallest `(distance, node)`
    pub fn pop(&mut self) -> Option<(N, f64)> {
        self.heap
            .pop()
            .map(|Reverse((distance, node))| (node, distance.into_inner()))
    }

    /// Returns the next entry without removing it
    pub fn peek(&self) -> Option<(N, f64)> {
        self.heap
            .peek()
            .map(|Reverse((distance, node))| (*node, distance.into_inner()))
    }
}
