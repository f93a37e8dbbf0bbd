//! Intrusive circular doubly-linked queue.
//!
//! Nodes embed a [`Link`] (a `prev`/`next` pair of keys) and live in storage
//! owned by the caller, addressed by a [`Key`]. A queue is identified by a
//! *sentinel* node from the same storage. The sentinel is part of the ring:
//! an empty queue is a sentinel linked to itself, and the sentinel marks
//! both ends of a non-empty one.
//!
//! ```text
//!   ┌──────────────────────────────────────────┐
//!   └─> sentinel <-> head <-> ... <-> last <───┘
//! ```
//!
//! The queue never allocates and never looks at payloads. Every operation
//! that changes membership only rewires links:
//!
//! | Operation | Cost |
//! |-----------|------|
//! | [`Queue::insert_head`], [`Queue::insert_tail`], [`insert_after`] | O(1) |
//! | [`remove`] | O(1) |
//! | [`Queue::split`], [`Queue::concat`] | O(1) |
//! | [`Queue::middle`] | O(n) |
//! | [`Queue::sort`] | O(n²) worst, O(n) on sorted input |
//!
//! The payload of a node is recovered by key: `nodes.node(key)` is the
//! caller's struct that embeds the link.
//!
//! # Example
//!
//! ```
//! use bumpline_collections::{Link, Linked, Queue};
//!
//! #[derive(Default)]
//! struct Job {
//!     priority: u8,
//!     link: Link<u32>,
//! }
//!
//! impl Linked<u32> for Job {
//!     fn link(&self) -> &Link<u32> { &self.link }
//!     fn link_mut(&mut self) -> &mut Link<u32> { &mut self.link }
//! }
//!
//! let mut jobs: Vec<Job> = (0..4u8).map(|p| Job { priority: 3 - p, ..Job::default() }).collect();
//! // Slot 0 is the sentinel; slots 1..4 are jobs.
//! let queue = Queue::init(&mut jobs, 0);
//! for key in 1..4 {
//!     queue.insert_tail(&mut jobs, key);
//! }
//! queue.sort(&mut jobs, |a, b| a.priority.cmp(&b.priority));
//! let order: Vec<u32> = queue.iter(&jobs).collect();
//! assert_eq!(order, vec![3, 2, 1]);
//! ```

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::key::Key;

/// The `prev`/`next` pair a node embeds to take part in a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link<K> {
    prev: K,
    next: K,
}

impl<K: Key> Link<K> {
    /// A link that belongs to no ring.
    pub const fn unlinked() -> Self {
        Self {
            prev: K::NONE,
            next: K::NONE,
        }
    }

    /// Key of the preceding node.
    pub fn prev(&self) -> K {
        self.prev
    }

    /// Key of the following node.
    pub fn next(&self) -> K {
        self.next
    }

    /// Whether both keys are `NONE`.
    pub fn is_unlinked(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

impl<K: Key> Default for Link<K> {
    fn default() -> Self {
        Self::unlinked()
    }
}

/// Types that embed a queue [`Link`].
///
/// A type may implement `Linked` for several key types, or embed several
/// links behind newtype wrappers, to sit in more than one queue at once.
pub trait Linked<K: Key> {
    /// The embedded link.
    fn link(&self) -> &Link<K>;

    /// The embedded link, mutably.
    fn link_mut(&mut self) -> &mut Link<K>;
}

/// Caller-owned node storage addressed by key.
///
/// Implemented for `[T]` and `Vec<T>` where `T: Linked<K>`: the key is the
/// slot index.
pub trait Nodes<K: Key> {
    /// The node type stored.
    type Node: Linked<K>;

    /// The node at `key`.
    ///
    /// # Panics
    ///
    /// Implementations panic if `key` does not address a node.
    fn node(&self, key: K) -> &Self::Node;

    /// The node at `key`, mutably.
    fn node_mut(&mut self, key: K) -> &mut Self::Node;

    /// Number of addressable slots; bounds consistency walks.
    fn slots(&self) -> usize;
}

impl<K: Key, T: Linked<K>> Nodes<K> for [T] {
    type Node = T;

    #[inline]
    fn node(&self, key: K) -> &T {
        &self[key.as_usize()]
    }

    #[inline]
    fn node_mut(&mut self, key: K) -> &mut T {
        &mut self[key.as_usize()]
    }

    fn slots(&self) -> usize {
        self.len()
    }
}

impl<K: Key, T: Linked<K>> Nodes<K> for Vec<T> {
    type Node = T;

    #[inline]
    fn node(&self, key: K) -> &T {
        &self[key.as_usize()]
    }

    #[inline]
    fn node_mut(&mut self, key: K) -> &mut T {
        &mut self[key.as_usize()]
    }

    fn slots(&self) -> usize {
        self.len()
    }
}

/// Key of the node following `x` in its ring (may be a sentinel).
#[inline]
pub fn next<K: Key, S: Nodes<K> + ?Sized>(nodes: &S, x: K) -> K {
    nodes.node(x).link().next
}

/// Key of the node preceding `x` in its ring (may be a sentinel).
#[inline]
pub fn prev<K: Key, S: Nodes<K> + ?Sized>(nodes: &S, x: K) -> K {
    nodes.node(x).link().prev
}

#[inline]
fn set_next<K: Key, S: Nodes<K> + ?Sized>(nodes: &mut S, x: K, next: K) {
    nodes.node_mut(x).link_mut().next = next;
}

#[inline]
fn set_prev<K: Key, S: Nodes<K> + ?Sized>(nodes: &mut S, x: K, prev: K) {
    nodes.node_mut(x).link_mut().prev = prev;
}

/// Link `x` into the ring immediately after `anchor`.
///
/// `anchor` may be any ring member, including a sentinel (inserting after
/// the sentinel makes `x` the head). `x`'s previous links are overwritten.
pub fn insert_after<K: Key, S: Nodes<K> + ?Sized>(nodes: &mut S, anchor: K, x: K) {
    let after = next(nodes, anchor);
    set_next(nodes, x, after);
    set_prev(nodes, after, x);
    set_prev(nodes, x, anchor);
    set_next(nodes, anchor, x);
}

/// Link `x` into the ring immediately before `anchor`.
///
/// Inserting before a sentinel makes `x` the last node.
pub fn insert_before<K: Key, S: Nodes<K> + ?Sized>(nodes: &mut S, anchor: K, x: K) {
    let before = prev(nodes, anchor);
    set_prev(nodes, x, before);
    set_next(nodes, before, x);
    set_next(nodes, x, anchor);
    set_prev(nodes, anchor, x);
}

/// Unlink `x` from whatever ring it is in.
///
/// Its neighbours are spliced together. With the `clear-unlinked` feature
/// `x`'s own links are reset to `NONE`; otherwise they are left as they
/// were and must not be followed.
pub fn remove<K: Key, S: Nodes<K> + ?Sized>(nodes: &mut S, x: K) {
    let Link { prev: before, next: after } = *nodes.node(x).link();
    set_prev(nodes, after, before);
    set_next(nodes, before, after);
    if cfg!(feature = "clear-unlinked") {
        *nodes.node_mut(x).link_mut() = Link::unlinked();
    }
}

/// A queue, identified by its sentinel node.
///
/// `Queue` is only a key; all state lives in the nodes. It is not `Copy`:
/// [`concat`](Self::concat) consumes the queue it absorbs.
#[derive(Debug, PartialEq, Eq)]
pub struct Queue<K: Key> {
    sentinel: K,
}

impl<K: Key> Queue<K> {
    /// Make `sentinel` an empty ring and return the queue it heads.
    pub fn init<S: Nodes<K> + ?Sized>(nodes: &mut S, sentinel: K) -> Self {
        *nodes.node_mut(sentinel).link_mut() = Link {
            prev: sentinel,
            next: sentinel,
        };
        Self { sentinel }
    }

    /// The sentinel's key.
    pub fn sentinel(&self) -> K {
        self.sentinel
    }

    /// Whether the queue holds no nodes.
    pub fn is_empty<S: Nodes<K> + ?Sized>(&self, nodes: &S) -> bool {
        prev(nodes, self.sentinel) == self.sentinel
    }

    /// The first node, if any.
    pub fn head<S: Nodes<K> + ?Sized>(&self, nodes: &S) -> Option<K> {
        self.member(next(nodes, self.sentinel))
    }

    /// The last node, if any.
    pub fn last<S: Nodes<K> + ?Sized>(&self, nodes: &S) -> Option<K> {
        self.member(prev(nodes, self.sentinel))
    }

    /// The node after `x` in this queue, or `None` if `x` is the last.
    pub fn next<S: Nodes<K> + ?Sized>(&self, nodes: &S, x: K) -> Option<K> {
        self.member(next(nodes, x))
    }

    /// The node before `x` in this queue, or `None` if `x` is the head.
    pub fn prev<S: Nodes<K> + ?Sized>(&self, nodes: &S, x: K) -> Option<K> {
        self.member(prev(nodes, x))
    }

    fn member(&self, key: K) -> Option<K> {
        (key != self.sentinel).then_some(key)
    }

    /// Link `x` in as the new head.
    pub fn insert_head<S: Nodes<K> + ?Sized>(&self, nodes: &mut S, x: K) {
        insert_after(nodes, self.sentinel, x);
    }

    /// Link `x` in as the new last node.
    pub fn insert_tail<S: Nodes<K> + ?Sized>(&self, nodes: &mut S, x: K) {
        insert_before(nodes, self.sentinel, x);
    }

    /// Split this queue at `pivot`.
    ///
    /// `self` keeps the nodes before `pivot`. `new_sentinel` becomes the
    /// sentinel of the returned queue, which holds `pivot` through the old
    /// last node. O(1); no traversal.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` or `new_sentinel` is this queue's sentinel.
    pub fn split<S: Nodes<K> + ?Sized>(&self, nodes: &mut S, pivot: K, new_sentinel: K) -> Queue<K> {
        assert!(pivot != self.sentinel, "cannot split a queue at its sentinel");
        assert!(
            new_sentinel != self.sentinel,
            "split needs a distinct sentinel for the new queue"
        );
        let sentinel = self.sentinel;
        let last = prev(nodes, sentinel);
        let before = prev(nodes, pivot);

        set_prev(nodes, new_sentinel, last);
        set_next(nodes, last, new_sentinel);
        set_next(nodes, new_sentinel, pivot);
        set_prev(nodes, pivot, new_sentinel);

        set_prev(nodes, sentinel, before);
        set_next(nodes, before, sentinel);

        Queue {
            sentinel: new_sentinel,
        }
    }

    /// Append every node of `other` after this queue's last node.
    ///
    /// O(1). `other` is consumed and its sentinel is left as an empty ring,
    /// ready to be reused with [`Queue::init`]. Concatenating an empty queue
    /// changes nothing.
    pub fn concat<S: Nodes<K> + ?Sized>(&self, nodes: &mut S, other: Queue<K>) {
        if other.is_empty(nodes) {
            return;
        }
        let sentinel = self.sentinel;
        let last = prev(nodes, sentinel);
        let other_head = next(nodes, other.sentinel);
        let other_last = prev(nodes, other.sentinel);

        set_next(nodes, last, other_head);
        set_prev(nodes, other_head, last);
        set_prev(nodes, sentinel, other_last);
        set_next(nodes, other_last, sentinel);

        Queue::init(nodes, other.sentinel);
    }

    /// The middle node.
    ///
    /// For a queue of `L` nodes this is the node at 1-indexed position
    /// `ceil((L + 1) / 2)`: the exact middle for odd `L`, the first node
    /// of the second half for even `L`. A slow cursor steps one node while
    /// a fast cursor steps two; when the fast cursor reaches the last node
    /// the slow one is in the middle. Returns `None` for an empty queue.
    pub fn middle<S: Nodes<K> + ?Sized>(&self, nodes: &S) -> Option<K> {
        let mut middle = self.head(nodes)?;
        let last = prev(nodes, self.sentinel);
        if middle == last {
            return Some(middle);
        }
        let mut fast = middle;
        loop {
            middle = next(nodes, middle);

            fast = next(nodes, fast);
            if fast == last {
                return Some(middle);
            }

            fast = next(nodes, fast);
            if fast == last {
                return Some(middle);
            }
        }
    }

    /// Stable insertion sort.
    ///
    /// `cmp` orders two nodes. Each node is moved backwards only past nodes
    /// that compare strictly greater, so nodes that compare equal keep their
    /// relative order. Input that is already sorted costs `L - 1`
    /// comparisons and no relinking.
    pub fn sort<S, F>(&self, nodes: &mut S, mut cmp: F)
    where
        S: Nodes<K> + ?Sized,
        F: FnMut(&S::Node, &S::Node) -> Ordering,
    {
        let sentinel = self.sentinel;
        let Some(first) = self.head(nodes) else {
            return;
        };
        let mut q = next(nodes, first);
        while q != sentinel {
            let after = next(nodes, q);
            let mut anchor = prev(nodes, q);
            if cmp(nodes.node(anchor), nodes.node(q)) == Ordering::Greater {
                remove(nodes, q);
                anchor = prev(nodes, anchor);
                while anchor != sentinel
                    && cmp(nodes.node(anchor), nodes.node(q)) == Ordering::Greater
                {
                    anchor = prev(nodes, anchor);
                }
                insert_after(nodes, anchor, q);
            }
            q = after;
        }
    }

    /// Iterate over node keys from head to last.
    pub fn iter<'a, S: Nodes<K> + ?Sized>(&self, nodes: &'a S) -> Iter<'a, K, S> {
        Iter {
            nodes,
            sentinel: self.sentinel,
            cursor: next(nodes, self.sentinel),
        }
    }

    /// Number of nodes. O(n).
    pub fn len<S: Nodes<K> + ?Sized>(&self, nodes: &S) -> usize {
        self.iter(nodes).count()
    }

    /// Check the ring invariant.
    ///
    /// Walks the ring from the sentinel and verifies that for every node
    /// `x`, `next(prev(x)) == x` and `prev(next(x)) == x`, and that the walk
    /// returns to the sentinel within the storage's slot count. Never
    /// panics on a broken ring as long as every followed key is addressable.
    pub fn is_consistent<S: Nodes<K> + ?Sized>(&self, nodes: &S) -> bool {
        let limit = nodes.slots();
        let mut x = self.sentinel;
        for _ in 0..=limit {
            let link = *nodes.node(x).link();
            if link.next.is_none() || link.prev.is_none() {
                return false;
            }
            if next(nodes, link.prev) != x || prev(nodes, link.next) != x {
                return false;
            }
            x = link.next;
            if x == self.sentinel {
                return true;
            }
        }
        false
    }
}

/// Iterator over the keys of a [`Queue`], head to last.
pub struct Iter<'a, K: Key, S: Nodes<K> + ?Sized> {
    nodes: &'a S,
    sentinel: K,
    cursor: K,
}

impl<K: Key, S: Nodes<K> + ?Sized> Clone for Iter<'_, K, S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            sentinel: self.sentinel,
            cursor: self.cursor,
        }
    }
}

impl<K: Key, S: Nodes<K> + ?Sized> Iterator for Iter<'_, K, S> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.cursor == self.sentinel {
            return None;
        }
        let key = self.cursor;
        self.cursor = next(self.nodes, key);
        Some(key)
    }
}

impl<K: Key, S: Nodes<K> + ?Sized> FusedIterator for Iter<'_, K, S> {}
