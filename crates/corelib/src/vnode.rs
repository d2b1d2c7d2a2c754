//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each physical node owning a single position on the ring, each
//! node owns several positions (virtual nodes). This provides:
//!
//! 1. **Better Load Distribution**: More positions = smoother share of keys
//! 2. **Bounded Remapping**: When nodes join/leave, only that node's arcs move
//! 3. **Weighting**: A node's share scales with how many vnodes it installs
//!
//! # Derivation
//!
//! The position of vnode `i` of node `n` is `partition(format!("{n}{i}"))`:
//! the node's display form immediately followed by the decimal index, with
//! no separator. Positions are a pure function of `(node, index)`, so the
//! ring never stores which positions a node owns; removal recomputes them.
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(v) positions per node
//! - **Lookup**: O(log n) where n = total vnodes
//! - **Insertion**: O(n log n) per node added (one sort per call)

use crate::partitioner::Partitioner;
use std::fmt::Display;

/// A virtual node on the hash ring.
///
/// Represents a single position produced for a physical node. Unlike the
/// physical node itself, a vnode is cheap to copy and carries no identity
/// beyond its position and the index it was derived from.
///
/// # Collisions
///
/// Two vnodes (from the same or different physical nodes) may land on the
/// same 64-bit position. The ring keeps every owner of a position in
/// insertion order and breaks ties at lookup time.
///
/// # Example
///
/// ```rust
/// use corelib::VirtualNode;
/// use corelib::partitioner::Xxh3Partitioner;
///
/// let vnode = VirtualNode::from_index(&Xxh3Partitioner, &"node1", 0);
/// assert_eq!(vnode.index(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Position on the ring.
    ///
    /// Declared first so the derived ordering sorts vnodes by position.
    pub position: u64,

    /// Replica index this vnode was derived from, in `[0, replicas)`.
    pub index: usize,
}

impl VirtualNode {
    /// Create a new virtual node.
    #[inline]
    pub fn new(position: u64, index: usize) -> Self {
        Self { position, index }
    }

    /// Create a virtual node from a node identifier and vnode index.
    ///
    /// # Algorithm
    ///
    /// 1. Format the label: node display form followed by the decimal index
    /// 2. Partition the label bytes to get the position
    ///
    /// # Arguments
    /// * `partitioner` - Hash function used by the ring
    /// * `node` - The physical node
    /// * `index` - The index of this vnode (0, 1, 2, ...)
    pub fn from_index<P, N>(partitioner: &P, node: &N, index: usize) -> Self
    where
        P: Partitioner + ?Sized,
        N: Display + ?Sized,
    {
        let label = vnode_label(node, index);
        Self::new(partitioner.partition(label.as_bytes()), index)
    }

    /// Derive the first `count` virtual nodes of `node`, in index order.
    pub fn derive<'a, P, N>(
        partitioner: &'a P,
        node: &'a N,
        count: usize,
    ) -> impl Iterator<Item = VirtualNode> + 'a
    where
        P: Partitioner + ?Sized,
        N: Display + ?Sized,
    {
        (0..count).map(move |index| Self::from_index(partitioner, node, index))
    }

    /// Get the ring position.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Get the replica index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Label hashed to place vnode `index` of `node`.
pub fn vnode_label<N: Display + ?Sized>(node: &N, index: usize) -> String {
    format!("{node}{index}")
}

impl std::fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(position={:016x}, index={})", self.position, self.index)
    }
}
