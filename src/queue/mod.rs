//! Owned stable priority queue.
//!
//! [`StableQueue`] bundles an [`Arena`] and a [`PriorityHeap`] so callers
//! can push plain values without managing records or handles. Use the
//! [`heap`](crate::heap) types directly when records must outlive their
//! time in the queue or be shared with other structures.

use crate::error::HeapError;
use crate::heap::{Arena, HeapConfig, HeapNode, Node, PriorityHeap};

#[derive(Debug)]
struct Entry<T> {
    node: Node,
    value: T,
}

impl<T> HeapNode for Entry<T> {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }
}

/// A value popped from a [`StableQueue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    /// Priority the value was pushed with.
    pub priority: i64,
    /// Insertion stamp assigned by the queue.
    pub sequence: u64,
    /// The value itself.
    pub value: T,
}

/// A min-priority queue that owns its values.
///
/// Lower priorities pop first; equal priorities pop in push order.
///
/// # Examples
///
/// ```
/// use u_pqueue::StableQueue;
///
/// let mut queue = StableQueue::with_capacity(16);
/// queue.push(5, 'a').unwrap();
/// queue.push(5, 'b').unwrap();
/// queue.push(1, 'c').unwrap();
///
/// assert_eq!(queue.peek(), Some((1, &'c')));
/// assert_eq!(queue.pop().map(|i| i.value), Some('c'));
/// assert_eq!(queue.pop().map(|i| i.value), Some('a'));
/// assert_eq!(queue.pop().map(|i| i.value), Some('b'));
/// assert_eq!(queue.pop(), None);
/// ```
#[derive(Debug)]
pub struct StableQueue<T> {
    arena: Arena<Entry<T>>,
    heap: PriorityHeap,
}

impl<T> Default for StableQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StableQueue<T> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            heap: PriorityHeap::new(),
        }
    }

    /// Creates an empty queue with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            heap: PriorityHeap::with_capacity(capacity),
        }
    }

    /// Creates an empty queue from a validated configuration.
    pub fn from_config(config: &HeapConfig) -> Result<Self, HeapError> {
        Ok(Self {
            arena: Arena::with_capacity(config.initial_capacity),
            heap: PriorityHeap::from_config(config)?,
        })
    }

    /// Returns the number of queued values.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the sequence the next push will be stamped with.
    #[inline]
    pub fn next_sequence(&self) -> u64 {
        self.heap.next_sequence()
    }

    /// Queues `value` at `priority` and returns its sequence.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::Exhausted`] once the sequence counter is spent.
    /// The value is dropped in that case.
    pub fn push(&mut self, priority: i64, value: T) -> Result<u64, HeapError> {
        if self.heap.is_exhausted() {
            return Err(HeapError::Exhausted);
        }

        let sequence = self.heap.next_sequence();
        let id = self.arena.insert(Entry {
            node: Node::new(priority),
            value,
        });
        if let Err(err) = self.heap.insert(&mut self.arena, id) {
            self.arena.remove(id)?;
            return Err(err);
        }
        Ok(sequence)
    }

    /// Removes and returns the value with the lowest priority.
    pub fn pop(&mut self) -> Option<Item<T>> {
        let id = self.heap.extract_min(&mut self.arena)?;
        let Entry { node, value } = self.arena.remove(id).ok()?;
        Some(Item {
            priority: node.priority(),
            sequence: node.sequence(),
            value,
        })
    }

    /// Returns the lowest-priority value and its priority.
    pub fn peek(&self) -> Option<(i64, &T)> {
        let entry = self.arena.get(self.heap.peek()?)?;
        Some((entry.node.priority(), &entry.value))
    }

    /// Drops every queued value. Sequence numbering continues afterwards
    /// and the storage is kept for reuse.
    pub fn clear(&mut self) {
        self.heap.clear(&mut self.arena);
        self.arena.reset();
    }

    /// Pops values in order while `pred` accepts the current minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_pqueue::StableQueue;
    ///
    /// let mut queue = StableQueue::new();
    /// for (p, v) in [(1, "a"), (5, "b"), (3, "c"), (7, "d")] {
    ///     queue.push(p, v).unwrap();
    /// }
    ///
    /// let urgent: Vec<_> = queue.drain_while(|p, _| p < 4).map(|i| i.value).collect();
    /// assert_eq!(urgent, vec!["a", "c"]);
    /// assert_eq!(queue.peek(), Some((5, &"b")));
    /// ```
    pub fn drain_while<'a, F>(&'a mut self, mut pred: F) -> impl Iterator<Item = Item<T>> + 'a
    where
        F: FnMut(i64, &T) -> bool + 'a,
        T: 'a,
    {
        std::iter::from_fn(move || {
            let (priority, value) = self.peek()?;
            if pred(priority, value) {
                self.pop()
            } else {
                None
            }
        })
    }

    /// Consumes the queue and returns its values in pop order.
    pub fn into_sorted_vec(mut self) -> Vec<Item<T>> {
        let mut items = Vec::with_capacity(self.len());
        while let Some(item) = self.pop() {
            items.push(item);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn values<T>(items: Vec<Item<T>>) -> Vec<T> {
        items.into_iter().map(|i| i.value).collect()
    }

    #[test]
    fn test_new_is_empty() {
        let mut queue: StableQueue<u32> = StableQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.peek().is_none());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_push_returns_sequence() {
        let mut queue = StableQueue::new();
        assert_eq!(queue.push(3, "x"), Ok(0));
        assert_eq!(queue.push(3, "y"), Ok(1));
        assert_eq!(queue.next_sequence(), 2);
    }

    #[test]
    fn test_pop_order_with_ties() {
        let mut queue = StableQueue::new();
        for (p, v) in [(1, 'A'), (2, 'B'), (3, 'C'), (1, 'D'), (2, 'E')] {
            queue.push(p, v).unwrap();
        }

        let items = queue.into_sorted_vec();
        let priorities: Vec<_> = items.iter().map(|i| i.priority).collect();
        assert_eq!(priorities, vec![1, 1, 2, 2, 3]);
        assert_eq!(values(items), vec!['A', 'D', 'B', 'E', 'C']);
    }

    #[test]
    fn test_pop_reports_sequence() {
        let mut queue = StableQueue::new();
        queue.push(2, "late").unwrap();
        queue.push(1, "early").unwrap();

        let item = queue.pop().unwrap();
        assert_eq!(
            item,
            Item {
                priority: 1,
                sequence: 1,
                value: "early"
            }
        );
    }

    #[test]
    fn test_slots_reused_after_pop() {
        let mut queue = StableQueue::with_capacity(4);
        for round in 0..10 {
            queue.push(round, round).unwrap();
            queue.push(-round, -round).unwrap();
            assert_eq!(queue.pop().map(|i| i.value), Some(-round));
            assert_eq!(queue.pop().map(|i| i.value), Some(round));
        }
        assert!(queue.is_empty());
        assert!(queue.arena.is_empty());
        assert!(queue.arena.capacity() < 10);
    }

    #[test]
    fn test_exhausted_push() {
        let config = HeapConfig::default().with_first_sequence(u64::MAX - 1);
        let mut queue = StableQueue::from_config(&config).unwrap();

        assert_eq!(queue.push(0, "last"), Ok(u64::MAX - 1));
        assert_eq!(queue.push(0, "overflow"), Err(HeapError::Exhausted));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.arena.len(), 1);
        assert_eq!(queue.pop().map(|i| i.value), Some("last"));
    }

    #[test]
    fn test_clear_keeps_numbering() {
        let mut queue = StableQueue::new();
        queue.push(1, 10).unwrap();
        queue.push(2, 20).unwrap();

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.push(0, 30), Ok(2));
        assert_eq!(values(queue.into_sorted_vec()), vec![30]);
    }

    #[test]
    fn test_clear_reuses_storage() {
        let mut queue = StableQueue::with_capacity(32);
        for p in 0..32 {
            queue.push(p, p).unwrap();
        }
        let arena_capacity = queue.arena.capacity();
        let heap_capacity = queue.heap.capacity();

        queue.clear();
        assert!(queue.arena.is_empty());
        assert_eq!(queue.arena.capacity(), arena_capacity);

        for p in 0..32 {
            queue.push(-p, p).unwrap();
        }
        assert_eq!(queue.arena.capacity(), arena_capacity);
        assert_eq!(queue.heap.capacity(), heap_capacity);
        assert_eq!(queue.pop().map(|i| i.value), Some(31));
    }

    #[test]
    fn test_drain_while_stops_at_predicate() {
        let mut queue = StableQueue::new();
        for p in [4, 1, 3, 2] {
            queue.push(p, p * 10).unwrap();
        }

        let drained: Vec<_> = queue.drain_while(|p, _| p <= 2).map(|i| i.value).collect();
        assert_eq!(drained, vec![10, 20]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek(), Some((3, &30)));
    }

    #[test]
    fn test_shared_behind_mutex() {
        let queue = Arc::new(Mutex::new(StableQueue::new()));

        let handles: Vec<_> = (0..4i64)
            .map(|t| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..250i64 {
                        queue.lock().unwrap().push(i % 7, (t, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let queue = Arc::try_unwrap(queue).unwrap().into_inner().unwrap();
        assert_eq!(queue.len(), 1000);

        let items = queue.into_sorted_vec();
        assert!(items.windows(2).all(|w| w[0].priority <= w[1].priority));
        // within a priority class, each thread's values stay in push order
        for w in items.windows(2) {
            let (ta, ia) = w[0].value;
            let (tb, ib) = w[1].value;
            if w[0].priority == w[1].priority && ta == tb {
                assert!(ia < ib);
            }
        }
    }
}
