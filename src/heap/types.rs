//! Intrusive node, ordering key and the trait tying them to caller records.

/// Ordering key of a node: `(priority, sequence)`.
///
/// The derived ordering is lexicographic over the fields in declaration
/// order, so a lower priority always wins and the sequence only breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    /// Caller-assigned priority. Lower is served first.
    pub priority: i64,
    /// Heap-assigned insertion stamp.
    pub sequence: u64,
}

/// Heap bookkeeping embedded in a caller-defined record.
///
/// The caller sets the priority; the heap stamps the sequence at insertion.
/// Both stay readable after extraction.
///
/// A node is plain data. Whether its record is queued is tracked by the
/// [`Arena`](super::Arena) slot holding it, so overwriting or cloning a
/// node never changes membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Node {
    priority: i64,
    sequence: u64,
}

impl Node {
    /// Creates a node with the given priority and sequence 0.
    pub const fn new(priority: i64) -> Self {
        Self {
            priority,
            sequence: 0,
        }
    }

    /// Returns the caller-assigned priority.
    #[inline]
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Returns the sequence stamped by the last accepted insert.
    ///
    /// Zero for a node that has never been inserted.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the `(priority, sequence)` ordering key.
    #[inline]
    pub fn key(&self) -> Key {
        Key {
            priority: self.priority,
            sequence: self.sequence,
        }
    }

    /// Changes the priority used by the next insert.
    ///
    /// A queued node keeps the key it was inserted with: the heap orders by
    /// its own copy and writes that key back when the node is extracted or
    /// the heap is cleared. Extract and reinsert to reprioritise.
    #[inline]
    pub fn set_priority(&mut self, priority: i64) {
        self.priority = priority;
    }

    pub(crate) fn stamp(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    pub(crate) fn restore(&mut self, key: Key) {
        self.priority = key.priority;
        self.sequence = key.sequence;
    }
}

/// A record that embeds a [`Node`].
///
/// # Examples
///
/// ```
/// use u_pqueue::{HeapNode, Node};
///
/// struct Timer {
///     node: Node,
///     callback_id: u32,
/// }
///
/// impl HeapNode for Timer {
///     fn node(&self) -> &Node {
///         &self.node
///     }
///     fn node_mut(&mut self) -> &mut Node {
///         &mut self.node
///     }
/// }
/// ```
pub trait HeapNode {
    /// Returns the embedded node.
    fn node(&self) -> &Node;

    /// Returns the embedded node mutably.
    fn node_mut(&mut self) -> &mut Node;
}

impl HeapNode for Node {
    #[inline]
    fn node(&self) -> &Node {
        self
    }

    #[inline]
    fn node_mut(&mut self) -> &mut Node {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_orders_priority_first() {
        let low = Key {
            priority: 1,
            sequence: 10,
        };
        let high = Key {
            priority: 2,
            sequence: 0,
        };
        assert!(low < high);
    }

    #[test]
    fn test_key_breaks_ties_by_sequence() {
        let earlier = Key {
            priority: 5,
            sequence: 3,
        };
        let later = Key {
            priority: 5,
            sequence: 4,
        };
        assert!(earlier < later);
    }

    #[test]
    fn test_negative_priority_sorts_first() {
        assert!(Node::new(-7).key() < Node::new(0).key());
    }

    #[test]
    fn test_new_node_fields() {
        let node = Node::new(3);
        assert_eq!(node.priority(), 3);
        assert_eq!(node.sequence(), 0);
    }

    #[test]
    fn test_set_priority_keeps_sequence() {
        let mut node = Node::new(1);
        node.stamp(9);
        node.set_priority(4);
        assert_eq!(
            node.key(),
            Key {
                priority: 4,
                sequence: 9
            }
        );
    }

    #[test]
    fn test_restore_overwrites_both_fields() {
        let mut node = Node::new(8);
        node.restore(Key {
            priority: 2,
            sequence: 5,
        });
        assert_eq!(node.priority(), 2);
        assert_eq!(node.sequence(), 5);
    }
}
