//! Error type shared by the heap, the arena and the owned queue.

use thiserror::Error;

/// Errors returned by heap, arena and queue operations.
///
/// Every error is returned to the immediate caller; nothing in this crate
/// logs, retries or swallows one. Extracting from an empty heap is not an
/// error and yields `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The handle does not resolve to a live record (never inserted into
    /// this arena, or already released).
    #[error("node handle does not resolve to a live record")]
    InvalidArgument,

    /// The node is already queued in a heap.
    #[error("node is already queued in a heap")]
    AlreadyQueued,

    /// The record cannot be released while its node is queued.
    #[error("record is still queued and cannot be released")]
    StillQueued,

    /// The insertion counter reached its maximum value.
    #[error("sequence counter exhausted")]
    Exhausted,

    /// A [`HeapConfig`](crate::heap::HeapConfig) failed validation.
    #[error("invalid heap configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(HeapError::Exhausted.to_string(), "sequence counter exhausted");
        assert_eq!(
            HeapError::InvalidConfig("bad".into()).to_string(),
            "invalid heap configuration: bad"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&HeapError::AlreadyQueued);
    }
}
