//! Reusable queue fixtures.
//!
//! Node storage built here always reserves slot 0 for the queue's sentinel.
//! Payload nodes follow in insertion order, so a node's key equals its
//! 1-indexed position in the freshly built queue.

use bumpline_collections::{Link, Linked, Queue};

/// A queue node carrying a sort key and a tag recording its original
/// position, for checking stability.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestNode {
    pub value: i64,
    pub tag: u32,
    pub link: Link<u32>,
}

impl TestNode {
    pub fn new(value: i64, tag: u32) -> Self {
        Self {
            value,
            tag,
            link: Link::unlinked(),
        }
    }
}

impl Linked<u32> for TestNode {
    fn link(&self) -> &Link<u32> {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link<u32> {
        &mut self.link
    }
}

/// Build storage holding `values` in a queue headed by slot 0.
///
/// Each node's `tag` is its key.
pub fn ring(values: &[i64]) -> (Vec<TestNode>, Queue<u32>) {
    ring_with_spares(values, 0)
}

/// Like [`ring`], with `spares` unlinked nodes appended after the payload.
///
/// Spare slots start at key `values.len() + 1` and serve as sentinels for
/// split-off queues or as nodes to insert later.
pub fn ring_with_spares(values: &[i64], spares: usize) -> (Vec<TestNode>, Queue<u32>) {
    let mut nodes = Vec::with_capacity(values.len() + spares + 1);
    nodes.push(TestNode::default());
    for (i, &value) in values.iter().enumerate() {
        nodes.push(TestNode::new(value, i as u32 + 1));
    }
    nodes.extend((0..spares).map(|_| TestNode::default()));

    let queue = Queue::init(&mut nodes, 0);
    for key in 1..=values.len() as u32 {
        queue.insert_tail(&mut nodes, key);
    }
    (nodes, queue)
}

/// Payload values of `queue`, head to last.
pub fn values(queue: &Queue<u32>, nodes: &[TestNode]) -> Vec<i64> {
    queue.iter(nodes).map(|k| nodes[k as usize].value).collect()
}

/// `(value, tag)` pairs of `queue`, head to last.
pub fn tagged(queue: &Queue<u32>, nodes: &[TestNode]) -> Vec<(i64, u32)> {
    queue
        .iter(nodes)
        .map(|k| {
            let node = &nodes[k as usize];
            (node.value, node.tag)
        })
        .collect()
}
