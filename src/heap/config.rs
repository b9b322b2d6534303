//! Heap construction parameters.

/// Configuration for a [`PriorityHeap`](super::PriorityHeap).
///
/// Neither field changes ordering: the capacity only preallocates, and
/// the first sequence only shifts where stamping starts (useful to resume
/// numbering or to exercise counter exhaustion).
///
/// # Examples
///
/// ```
/// use u_pqueue::{HeapConfig, PriorityHeap};
///
/// let config = HeapConfig::default()
///     .with_initial_capacity(1024)
///     .with_first_sequence(500);
/// let heap = PriorityHeap::from_config(&config).unwrap();
///
/// assert!(heap.capacity() >= 1024);
/// assert_eq!(heap.next_sequence(), 500);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeapConfig {
    /// Number of entries to preallocate.
    pub initial_capacity: usize,

    /// Sequence stamped on the first inserted node.
    pub first_sequence: u64,
}

impl HeapConfig {
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_first_sequence(mut self, sequence: u64) -> Self {
        self.first_sequence = sequence;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.first_sequence == u64::MAX {
            return Err(format!(
                "first_sequence {} leaves no room for a single insert",
                self.first_sequence
            ));
        }
        Ok(())
    }
}
