//! Queues caller-owned records with embedded nodes and drains them.
//!
//! Run with `RUST_LOG=trace` to see the heap's own events as well.

use u_pqueue::{Arena, HeapError, HeapNode, Node, PriorityHeap};

#[derive(Debug)]
struct Record {
    node: Node,
    value: &'static str,
}

impl HeapNode for Record {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }
}

fn main() -> Result<(), HeapError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut records = Arena::new();
    let mut heap = PriorityHeap::with_capacity(3);

    for (priority, value) in [
        (1, "pri 1 - first"),
        (2, "pri 2 - second"),
        (1, "pri 1 - third"),
    ] {
        let id = records.insert(Record {
            node: Node::new(priority),
            value,
        });
        heap.insert(&mut records, id)?;
    }

    tracing::info!(total = heap.len(), "records queued");

    while let Some(id) = heap.extract_min(&mut records) {
        let record = records.remove(id)?;
        tracing::info!(
            priority = record.node.priority(),
            sequence = record.node.sequence(),
            value = record.value,
            "extracted"
        );
    }

    Ok(())
}
