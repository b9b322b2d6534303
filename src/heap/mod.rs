//! Stable binary min-heap over caller-owned records.
//!
//! Bookkeeping lives inside the caller's own record (an intrusive
//! [`Node`]), records live in a caller-owned [`Arena`], and the
//! [`PriorityHeap`] holds only [`NodeId`] handles plus a cached copy of
//! each node's ordering [`Key`].
//!
//! # Ordering
//!
//! Nodes are ordered by `(priority, sequence)` ascending. The sequence is
//! stamped by the heap at insertion from a per-instance counter that never
//! goes backwards, so equal priorities come out in insertion order.
//!
//! # Complexity
//!
//! | Operation     | Time       | Allocations   |
//! |---------------|------------|---------------|
//! | `insert`      | O(log n)   | 0 (amortised) |
//! | `extract_min` | O(log n)   | 0             |
//! | `peek`, `len` | O(1)       | 0             |
//!
//! # Examples
//!
//! ```
//! use u_pqueue::{Arena, HeapNode, Node, PriorityHeap};
//!
//! struct Job {
//!     node: Node,
//!     name: &'static str,
//! }
//!
//! impl HeapNode for Job {
//!     fn node(&self) -> &Node { &self.node }
//!     fn node_mut(&mut self) -> &mut Node { &mut self.node }
//! }
//!
//! let mut jobs = Arena::new();
//! let mut heap = PriorityHeap::new();
//!
//! let a = jobs.insert(Job { node: Node::new(1), name: "pri 1 - first" });
//! let b = jobs.insert(Job { node: Node::new(2), name: "pri 2 - second" });
//! let c = jobs.insert(Job { node: Node::new(1), name: "pri 1 - third" });
//! for id in [a, b, c] {
//!     heap.insert(&mut jobs, id).unwrap();
//! }
//!
//! let order: Vec<_> = heap.drain(&mut jobs).collect();
//! let names: Vec<_> = order.iter().map(|&id| jobs.get(id).unwrap().name).collect();
//! assert_eq!(names, vec!["pri 1 - first", "pri 1 - third", "pri 2 - second"]);
//! ```

mod arena;
mod config;
mod engine;
mod types;

pub use arena::{Arena, NodeId};
pub use config::HeapConfig;
pub use engine::{Drain, PriorityHeap};
pub use types::{HeapNode, Key, Node};
