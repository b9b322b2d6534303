//! Binary min-heap with FIFO tie-breaking.

use super::arena::{Arena, NodeId};
use super::config::HeapConfig;
use super::types::{HeapNode, Key};
use crate::error::HeapError;

/// Backing array entry: the handle plus a copy of its node's key, so
/// sifting never has to look records up in the arena.
#[derive(Debug, Clone, Copy)]
struct Entry {
    key: Key,
    id: NodeId,
}

/// A stable binary min-heap over records held in an [`Arena`].
///
/// Always surfaces the queued node with the smallest `(priority, sequence)`
/// key. Sequences come from a counter owned by this instance, so two heaps
/// never influence each other's tie-breaks.
///
/// The heap does not own the records. Every call must pass the arena the
/// queued handles were created in.
///
/// # Invariants
///
/// - For every position `i > 0`: `key(heap[(i - 1) / 2]) <= key(heap[i])`.
/// - Sequences stamped by one instance strictly increase and are never
///   reused, including across [`clear`](Self::clear).
/// - A record is queued in at most one heap at a time. Membership lives in
///   the arena slot, not in the caller-reachable node.
/// - Each extracted or cleared node holds exactly the key it was queued
///   with, whatever was written to it meanwhile.
#[derive(Debug, Default)]
pub struct PriorityHeap {
    entries: Vec<Entry>,
    next_sequence: u64,
}

impl PriorityHeap {
    /// Creates an empty heap whose first insert is stamped with sequence 0.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Creates an empty heap with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Creates an empty heap from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::InvalidConfig`] if `config` fails validation.
    pub fn from_config(config: &HeapConfig) -> Result<Self, HeapError> {
        config.validate().map_err(HeapError::InvalidConfig)?;
        Ok(Self {
            entries: Vec::with_capacity(config.initial_capacity),
            next_sequence: config.first_sequence,
        })
    }

    /// Returns the number of queued nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no node is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the capacity of the backing array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns the sequence the next accepted insert will stamp.
    #[inline]
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Returns `true` once the counter can no longer stamp a node.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.next_sequence == u64::MAX
    }

    /// Returns the handle of the minimum node without removing it.
    #[inline]
    pub fn peek(&self) -> Option<NodeId> {
        self.entries.first().map(|e| e.id)
    }

    /// Returns the key of the minimum node without removing it.
    #[inline]
    pub fn peek_key(&self) -> Option<Key> {
        self.entries.first().map(|e| e.key)
    }

    /// Queues the record behind `id`.
    ///
    /// Stamps the node with the next sequence, marks its slot queued and
    /// sifts it up to its place. On error nothing changes, neither in the
    /// heap nor in the arena.
    ///
    /// # Errors
    ///
    /// - [`HeapError::InvalidArgument`] if `id` does not resolve in `arena`.
    /// - [`HeapError::AlreadyQueued`] if the record is in this or another
    ///   heap sharing `arena`.
    /// - [`HeapError::Exhausted`] if the sequence counter is at its maximum.
    pub fn insert<T: HeapNode>(
        &mut self,
        arena: &mut Arena<T>,
        id: NodeId,
    ) -> Result<(), HeapError> {
        let (queued, record) = arena.slot_mut(id).ok_or(HeapError::InvalidArgument)?;
        if *queued {
            return Err(HeapError::AlreadyQueued);
        }

        let sequence = self.next_sequence;
        let next = sequence.checked_add(1).ok_or(HeapError::Exhausted)?;

        let node = record.node_mut();
        node.stamp(sequence);
        let key = node.key();
        *queued = true;
        self.next_sequence = next;

        let pos = self.entries.len();
        self.entries.push(Entry { key, id });
        let settled = self.sift_up(pos);

        tracing::trace!(
            priority = key.priority,
            sequence,
            position = settled,
            "node queued"
        );
        if self.is_exhausted() {
            tracing::debug!(sequence, "sequence counter reached its limit");
        }
        Ok(())
    }

    /// Removes the minimum node and returns its handle.
    ///
    /// Returns `None` on an empty heap without touching any state. The
    /// extracted node holds the priority and sequence it was queued with and
    /// may be inserted again, receiving a fresh sequence.
    pub fn extract_min<T: HeapNode>(&mut self, arena: &mut Arena<T>) -> Option<NodeId> {
        if self.entries.is_empty() {
            return None;
        }

        // last entry moves into the root slot
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        detach(arena, root);

        tracing::trace!(
            priority = root.key.priority,
            sequence = root.key.sequence,
            remaining = self.entries.len(),
            "node extracted"
        );
        Some(root.id)
    }

    /// Detaches every queued node and empties the heap.
    ///
    /// The sequence counter is kept, so nodes queued afterwards still sort
    /// after everything stamped before.
    pub fn clear<T: HeapNode>(&mut self, arena: &mut Arena<T>) {
        for &entry in &self.entries {
            detach(arena, entry);
        }
        tracing::debug!(cleared = self.entries.len(), "heap cleared");
        self.entries.clear();
    }

    /// Extracts every node in key order.
    ///
    /// Nodes not yet yielded when the iterator is dropped stay queued.
    pub fn drain<'a, T: HeapNode>(&'a mut self, arena: &'a mut Arena<T>) -> Drain<'a, T> {
        Drain { heap: self, arena }
    }

    /// Checks the heap property over the whole backing array. O(n).
    pub fn is_valid(&self) -> bool {
        (1..self.entries.len()).all(|i| self.entries[(i - 1) / 2].key <= self.entries[i].key)
    }

    /// Moves the entry at `pos` towards the root while it is smaller than
    /// its parent. Returns its final position.
    fn sift_up(&mut self, pos: usize) -> usize {
        let entry = self.entries[pos];
        let mut hole = pos;

        while hole > 0 {
            let parent = (hole - 1) / 2;
            if entry.key >= self.entries[parent].key {
                break;
            }
            self.entries[hole] = self.entries[parent];
            hole = parent;
        }

        self.entries[hole] = entry;
        hole
    }

    /// Moves the entry at `pos` towards the leaves while a child is smaller.
    fn sift_down(&mut self, pos: usize) {
        let len = self.entries.len();
        let entry = self.entries[pos];
        let mut hole = pos;

        loop {
            let left = 2 * hole + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let child = if right < len && self.entries[right].key < self.entries[left].key {
                right
            } else {
                left
            };

            if entry.key <= self.entries[child].key {
                break;
            }
            self.entries[hole] = self.entries[child];
            hole = child;
        }

        self.entries[hole] = entry;
    }
}

/// Clears the slot's membership flag and writes the cached key back.
fn detach<T: HeapNode>(arena: &mut Arena<T>, entry: Entry) {
    if let Some((queued, record)) = arena.slot_mut(entry.id) {
        if *queued {
            *queued = false;
            record.node_mut().restore(entry.key);
        }
    }
}

/// Iterator returned by [`PriorityHeap::drain`].
pub struct Drain<'a, T> {
    heap: &'a mut PriorityHeap,
    arena: &'a mut Arena<T>,
}

impl<T: HeapNode> Iterator for Drain<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.heap.extract_min(self.arena)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T: HeapNode> ExactSizeIterator for Drain<'_, T> {}
