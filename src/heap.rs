use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::tree::{Key, PrefixTree};

/// Heap entry carrying its tree's key, computed once on push.
struct HeapNode {
    key: Key,
    tree: PrefixTree,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for Min-Heap behavior in BinaryHeap (which is max-heap by default)
        other.key.cmp(&self.key)
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for HeapNode {}

/// Min-priority queue of prefix trees ordered by [`PrefixTree::key`].
#[derive(Default)]
pub struct MinTreeQueue {
    heap: BinaryHeap<HeapNode>,
}

impl MinTreeQueue {
    pub fn new() -> Self {
        MinTreeQueue {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinTreeQueue {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, tree: PrefixTree) {
        let key = tree.key();
        self.heap.push(HeapNode { key, tree });
    }

    pub fn pop_min(&mut self) -> Result<PrefixTree> {
        self.heap.pop().map(|n| n.tree).ok_or(Error::EmptyQueue)
    }

    pub fn peek_key(&self) -> Option<Key> {
        self.heap.peek().map(|n| n.key)
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl FromIterator<PrefixTree> for MinTreeQueue {
    fn from_iter<I: IntoIterator<Item = PrefixTree>>(iter: I) -> Self {
        let mut queue = MinTreeQueue::new();
        for tree in iter {
            queue.push(tree);
        }
        queue
    }
}
