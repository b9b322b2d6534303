//! Generational slab holding caller records behind stable handles.

use crate::error::HeapError;

/// Handle to a record stored in an [`Arena`].
///
/// A handle stays valid until its record is removed. The slot may then be
/// reused, but with a new generation, so stale handles stop resolving
/// instead of aliasing the new record. A slot whose generation is spent is
/// retired rather than reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Returns the slot index of this handle.
    #[inline]
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns the slot generation of this handle.
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied {
        generation: u32,
        // set while a heap holds this handle
        queued: bool,
        value: T,
    },
    Vacant {
        generation: u32,
        next_free: Option<usize>,
    },
    Retired,
}

/// Slab storage with stable indices and slot reuse.
///
/// The arena owns the records; a [`PriorityHeap`](super::PriorityHeap)
/// only holds handles to them. Removed slots go on a free list and are
/// reused by later inserts.
///
/// Heap membership is recorded in the slot, out of reach of
/// [`get_mut`](Self::get_mut), so a queued record cannot be released or
/// queued twice whatever the caller does to its contents.
///
/// # Examples
///
/// ```
/// use u_pqueue::{Arena, Node};
///
/// let mut arena = Arena::new();
/// let id = arena.insert(Node::new(4));
/// assert_eq!(arena.get(id).map(Node::priority), Some(4));
///
/// arena.remove(id).unwrap();
/// assert!(arena.get(id).is_none());
/// ```
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Creates an arena with room for `capacity` records before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Returns the number of live records.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Stores a record and returns its handle.
    ///
    /// Reuses the most recently released slot before growing.
    pub fn insert(&mut self, value: T) -> NodeId {
        self.len += 1;

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index];
            if let Slot::Vacant {
                generation,
                next_free,
            } = *slot
            {
                self.free_head = next_free;
                *slot = Slot::Occupied {
                    generation,
                    queued: false,
                    value,
                };
                return NodeId { index, generation };
            }
        }

        let index = self.slots.len();
        self.slots.push(Slot::Occupied {
            generation: 0,
            queued: false,
            value,
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Returns the record behind `id`, or `None` for a stale handle.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.index) {
            Some(Slot::Occupied {
                generation, value, ..
            }) if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Returns the record behind `id` mutably, or `None` for a stale handle.
    ///
    /// Editing a queued record's node does not reorder it; see
    /// [`Node::set_priority`](super::Node::set_priority).
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slot_mut(id).map(|(_, value)| value)
    }

    /// Returns the membership flag and record behind `id`.
    pub(crate) fn slot_mut(&mut self, id: NodeId) -> Option<(&mut bool, &mut T)> {
        match self.slots.get_mut(id.index) {
            Some(Slot::Occupied {
                generation,
                queued,
                value,
            }) if *generation == id.generation => Some((queued, value)),
            _ => None,
        }
    }

    /// Returns `true` while the record behind `id` is queued in a heap.
    pub fn is_queued(&self, id: NodeId) -> bool {
        match self.slots.get(id.index) {
            Some(Slot::Occupied {
                generation, queued, ..
            }) => *generation == id.generation && *queued,
            _ => false,
        }
    }

    /// Returns `true` if `id` resolves to a live record.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates live records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied {
                    generation, value, ..
                } => Some((
                    NodeId {
                        index,
                        generation: *generation,
                    },
                    value,
                )),
                Slot::Vacant { .. } | Slot::Retired => None,
            })
    }

    /// Releases the record behind `id` and returns it.
    ///
    /// # Errors
    ///
    /// - [`HeapError::InvalidArgument`] if `id` is stale.
    /// - [`HeapError::StillQueued`] if the record is still in a heap;
    ///   extract it first so the heap never holds a dangling handle.
    pub fn remove(&mut self, id: NodeId) -> Result<T, HeapError> {
        let (queued, _) = self.slot_mut(id).ok_or(HeapError::InvalidArgument)?;
        if *queued {
            return Err(HeapError::StillQueued);
        }

        let released = match id.generation.checked_add(1) {
            Some(generation) => Slot::Vacant {
                generation,
                next_free: self.free_head,
            },
            None => Slot::Retired,
        };
        let reusable = matches!(released, Slot::Vacant { .. });
        match std::mem::replace(&mut self.slots[id.index], released) {
            Slot::Occupied { value, .. } => {
                if reusable {
                    self.free_head = Some(id.index);
                } else {
                    tracing::debug!(index = id.index, "arena slot retired");
                }
                self.len -= 1;
                Ok(value)
            }
            // slot_mut() above proved the slot occupied
            previous => {
                self.slots[id.index] = previous;
                Err(HeapError::InvalidArgument)
            }
        }
    }

    /// Drops every record while keeping the slot allocation.
    ///
    /// Every outstanding handle goes stale, exactly as if each record had
    /// been removed.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::StillQueued`] with nothing dropped if any record
    /// is still in a heap.
    pub fn clear(&mut self) -> Result<(), HeapError> {
        if self
            .slots
            .iter()
            .any(|slot| matches!(slot, Slot::Occupied { queued: true, .. }))
        {
            return Err(HeapError::StillQueued);
        }
        self.reset();
        Ok(())
    }

    /// Releases every slot without checking membership.
    pub(crate) fn reset(&mut self) {
        self.free_head = None;
        // walk backwards so the free list hands out low indices first
        for index in (0..self.slots.len()).rev() {
            let generation = match &self.slots[index] {
                Slot::Occupied { generation, .. } => generation.checked_add(1),
                Slot::Vacant { generation, .. } => Some(*generation),
                Slot::Retired => None,
            };
            self.slots[index] = match generation {
                Some(generation) => Slot::Vacant {
                    generation,
                    next_free: self.free_head.replace(index),
                },
                None => Slot::Retired,
            };
        }
        self.len = 0;
    }
}
