//! Virtual node index and node registry.
//!
//! Holds the three pieces of ring state that must change together:
//! - the registry of physical nodes currently present
//! - the ascending sequence of live vnode positions (duplicates allowed)
//! - the bucket of physical nodes for each position, in insertion order
//!
//! The index does no locking of its own; [`HashRing`](super::HashRing)
//! guards it with a single reader-writer lock.

use crate::node::RingNode;
use std::collections::{HashMap, HashSet};

/// Sorted vnode positions plus the position to owners mapping.
#[derive(Debug, Clone)]
pub struct VNodeIndex<N> {
    /// Physical nodes that have been added and not removed.
    registry: HashSet<N>,
    /// Every live vnode position. Sorted ascending outside of `insert`/`sort`.
    positions: Vec<u64>,
    /// Owners of each position. A list, not a set: tiebreaks depend on order.
    buckets: HashMap<u64, Vec<N>>,
}

impl<N: RingNode> Default for VNodeIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: RingNode> VNodeIndex<N> {
    pub fn new() -> Self {
        Self {
            registry: HashSet::new(),
            positions: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------

    #[inline]
    pub fn contains(&self, node: &N) -> bool {
        self.registry.contains(node)
    }

    pub fn register(&mut self, node: N) {
        self.registry.insert(node);
    }

    pub fn unregister(&mut self, node: &N) -> bool {
        self.registry.remove(node)
    }

    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.registry.iter()
    }

    // ------------------------------------------------------------------
    // Positions and buckets
    // ------------------------------------------------------------------

    /// Append a vnode without re-sorting. Call [`sort`](Self::sort) once the
    /// batch is complete.
    pub fn insert(&mut self, position: u64, node: N) {
        self.positions.push(position);
        self.buckets.entry(position).or_default().push(node);
    }

    /// Restore ascending order after a batch of inserts.
    pub fn sort(&mut self) {
        self.positions.sort_unstable();
    }

    /// Retract one vnode of `node` at `position`.
    ///
    /// Removes a single occurrence of `position` from the sequence if one
    /// exists, whoever owns it, and independently drops `node` from the
    /// bucket (deleting the bucket once empty). Returns whether a sequence
    /// entry was removed.
    ///
    /// When another node shares `position` but `node` never installed it,
    /// the sequence entry is still removed while the bucket keeps the other
    /// owner. Callers rely on this exact behaviour; see `HashRing::remove`.
    pub fn retract(&mut self, position: u64, node: &N) -> bool {
        let idx = self.positions.partition_point(|&p| p < position);
        let removed = idx < self.positions.len() && self.positions[idx] == position;
        if removed {
            self.positions.remove(idx);
        }

        if let Some(owners) = self.buckets.get_mut(&position) {
            owners.retain(|owner| owner != node);
            if owners.is_empty() {
                self.buckets.remove(&position);
            }
        }

        removed
    }

    /// Index of the first position `>= hash`, wrapping to 0 past the end.
    /// `None` when no positions are live.
    pub fn search(&self, hash: u64) -> Option<usize> {
        if self.positions.is_empty() {
            return None;
        }
        let idx = self.positions.partition_point(|&p| p < hash);
        Some(if idx == self.positions.len() { 0 } else { idx })
    }

    #[inline]
    pub fn position_at(&self, idx: usize) -> u64 {
        self.positions[idx]
    }

    /// Owners registered at `position`, in insertion order.
    pub fn bucket(&self, position: u64) -> &[N] {
        self.buckets.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of live vnode positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[u64] {
        &self.positions
    }
}
