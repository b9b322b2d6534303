//! Stable priority queue built on a binary min-heap.
//!
//! Always yields the element of lowest numeric priority and, among elements
//! of equal priority, the one inserted first (FIFO tie-break). Ties are
//! resolved by a per-heap insertion counter stamped into each node.
//!
//! - **Heap** ([`heap`]): the intrusive core. Callers embed a [`Node`] in
//!   their own record, keep records in an [`Arena`], and queue them by
//!   [`NodeId`] handle in a [`PriorityHeap`].
//! - **Queue** ([`queue`]): [`StableQueue`], an owning wrapper that stores
//!   values directly when shared storage is not needed.
//!
//! # Examples
//!
//! ```
//! use u_pqueue::StableQueue;
//!
//! let mut queue = StableQueue::new();
//! queue.push(2, "second").unwrap();
//! queue.push(1, "first").unwrap();
//! queue.push(2, "third").unwrap();
//!
//! let order: Vec<_> = queue.into_sorted_vec().into_iter().map(|i| i.value).collect();
//! assert_eq!(order, vec!["first", "second", "third"]);
//! ```
//!
//! # Concurrency
//!
//! Nothing here synchronises internally. All mutating operations take
//! `&mut self`; share a heap across threads behind your own lock.

pub mod error;
pub mod heap;
pub mod queue;

pub use error::HeapError;
pub use heap::{Arena, HeapConfig, HeapNode, Key, Node, NodeId, PriorityHeap};
pub use queue::{Item, StableQueue};
