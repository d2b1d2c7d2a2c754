//! Hash ring facade.
//!
//! [`HashRing`] composes the partitioner, the node registry and the vnode
//! index behind one [`parking_lot::RwLock`]. Lookups take the shared lock;
//! every mutation takes the exclusive lock.

use super::index::VNodeIndex;
use super::{COLLISION_SALT, MIN_REPLICAS, TOP_WEIGHT};
use crate::error::{Error, Result};
use crate::node::RingNode;
use crate::partitioner::{Partitioner, Xxh3Partitioner};
use crate::vnode::VirtualNode;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Consistent hash ring mapping keys onto physical nodes.
///
/// Each node is expanded into up to `replicas` virtual nodes. A key is
/// owned by the first vnode clockwise from the key's position, wrapping
/// past `u64::MAX` back to the smallest position.
///
/// All methods take `&self`; share the ring across threads with `Arc`.
///
/// # Known limitation
///
/// If two distinct nodes produce the same position, removing one of them
/// can drop that position from the sorted sequence while the other node is
/// still listed in its bucket. See [`HashRing::remove`].
pub struct HashRing<N = String> {
    /// Virtual nodes per physical node at weight 100. Never below
    /// [`MIN_REPLICAS`].
    replicas: usize,
    partitioner: Arc<dyn Partitioner>,
    state: RwLock<VNodeIndex<N>>,
}

impl<N: RingNode> HashRing<N> {
    /// Create a ring with [`MIN_REPLICAS`] vnodes per node and the default
    /// XXH3 partitioner.
    pub fn new() -> Self {
        Self::custom(MIN_REPLICAS, None)
    }

    /// Create a ring with a custom replica count and partitioner.
    ///
    /// A `replicas` below [`MIN_REPLICAS`] is raised to it. `None` selects
    /// the default partitioner.
    pub fn custom(replicas: usize, partitioner: Option<Arc<dyn Partitioner>>) -> Self {
        let replicas = replicas.max(MIN_REPLICAS);
        let partitioner = partitioner.unwrap_or_else(|| Arc::new(Xxh3Partitioner));

        Self {
            replicas,
            partitioner,
            state: RwLock::new(VNodeIndex::new()),
        }
    }

    /// Add a node with the full replica count.
    pub fn add(&self, node: N) {
        self.add_with_replicas(node, self.replicas);
    }

    /// Add a node with an explicit number of vnodes.
    ///
    /// Re-adding a present node replaces its vnodes entirely. `replicas` is
    /// capped at the ring's configured count.
    pub fn add_with_replicas(&self, node: N, replicas: usize) {
        // Retract under its own lock first; the write lock below is taken
        // only after `remove` has released it.
        self.remove(&node);

        let replicas = replicas.min(self.replicas);
        let mut state = self.state.write();
        state.register(node.clone());
        for vnode in VirtualNode::derive(self.partitioner.as_ref(), &node, replicas) {
            state.insert(vnode.position, node.clone());
        }
        state.sort();

        debug!(node = %node, replicas, vnodes = state.len(), "added node to ring");
    }

    /// Add a node with a weight in percent of the configured replica count.
    ///
    /// `100` installs the full count; larger weights are capped there.
    /// Weight `0` registers the node without vnodes, so it is never
    /// returned by lookups.
    pub fn add_with_weight(&self, node: N, weight: u32) {
        let replicas = self.replicas.saturating_mul(weight as usize) / TOP_WEIGHT as usize;
        self.add_with_replicas(node, replicas);
    }

    /// Remove a node. Returns `false` if it was not present.
    ///
    /// Positions are recomputed for every index up to the configured
    /// replica count, not the count the node was added with; indices that
    /// were never installed find no match and are skipped.
    ///
    /// The sequence entry and the bucket entry for each position are
    /// retracted independently. If another node happens to own one of the
    /// recomputed positions, that position leaves the sorted sequence even
    /// though the other node stays in its bucket.
    pub fn remove(&self, node: &N) -> bool {
        let mut state = self.state.write();
        if !state.contains(node) {
            return false;
        }

        let mut retracted = 0usize;
        for vnode in VirtualNode::derive(self.partitioner.as_ref(), node, self.replicas) {
            if state.retract(vnode.position, node) {
                retracted += 1;
            }
        }
        state.unregister(node);

        debug!(node = %node, retracted, vnodes = state.len(), "removed node from ring");
        true
    }

    /// Find the node owning `key`, or `None` if no node is reachable.
    pub fn get<K>(&self, key: &K) -> Option<N>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        let state = self.state.read();
        let idx = state.search(self.partitioner.partition(key))?;
        self.resolve(state.bucket(state.position_at(idx)), key)
    }

    /// Like [`get`](Self::get), reporting an unowned key as
    /// [`Error::NotFound`].
    pub fn try_get<K>(&self, key: &K) -> Result<N>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.get(key).ok_or(Error::NotFound)
    }

    /// Collect up to `n` distinct nodes clockwise from `key`, owner first.
    ///
    /// The first entry always equals [`get`](Self::get). Later entries are
    /// taken from successive buckets in insertion order.
    pub fn get_n<K>(&self, key: &K, n: usize) -> Vec<N>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        let state = self.state.read();
        let Some(start) = state.search(self.partitioner.partition(key)) else {
            return Vec::new();
        };

        let max_distinct = n.min(state.node_count());
        let mut owners = Vec::with_capacity(max_distinct);
        if max_distinct == 0 {
            return owners;
        }

        match self.resolve(state.bucket(state.position_at(start)), key) {
            Some(primary) => owners.push(primary),
            None => return owners,
        }

        let len = state.len();
        for offset in 0..len {
            let position = state.position_at((start + offset) % len);
            for node in state.bucket(position) {
                if owners.len() == max_distinct {
                    return owners;
                }
                if !owners.contains(node) {
                    owners.push(node.clone());
                }
            }
        }

        owners
    }

    /// Pick the owner from a bucket. Colliding owners are chosen by a
    /// salted rehash of the key, indexing the bucket's insertion order.
    fn resolve(&self, owners: &[N], key: &[u8]) -> Option<N> {
        match owners {
            [] => None,
            [owner] => Some(owner.clone()),
            _ => {
                let mut salted = format!("{COLLISION_SALT}:").into_bytes();
                salted.extend_from_slice(key);
                let pick = (self.partitioner.partition(&salted) % owners.len() as u64) as usize;
                trace!(candidates = owners.len(), pick, "resolved position collision");
                Some(owners[pick].clone())
            }
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Effective vnodes per node at weight 100.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    /// Number of registered physical nodes, including weight-0 nodes.
    pub fn node_count(&self) -> usize {
        self.state.read().node_count()
    }

    /// Number of live vnode positions.
    pub fn vnode_count(&self) -> usize {
        self.state.read().len()
    }

    /// True when no vnodes are live and every lookup misses.
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.state.read().contains(node)
    }

    /// Registered nodes, ordered by display form.
    pub fn nodes(&self) -> Vec<N> {
        let mut nodes: Vec<N> = self.state.read().nodes().cloned().collect();
        nodes.sort_by_cached_key(ToString::to_string);
        nodes
    }
}

impl<N: RingNode> Default for HashRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: RingNode> fmt::Debug for HashRing<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("partitioner", &self.partitioner.name())
            .field("nodes", &state.node_count())
            .field("vnodes", &state.len())
            .finish()
    }
}
