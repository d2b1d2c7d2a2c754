//! Builder for [`HashRing`].

use super::ring::HashRing;
use super::MIN_REPLICAS;
use crate::node::{NodeSpec, RingNode};
use crate::partitioner::Partitioner;
use std::sync::Arc;

/// How many vnodes a queued node should install.
#[derive(Debug, Clone, Copy)]
enum Share {
    Full,
    Replicas(usize),
    Weight(u32),
}

/// Fluent construction of a [`HashRing`] with an initial membership.
///
/// Nodes are added in the order they were queued, so collision tiebreaks
/// match an equivalent sequence of `add*` calls.
///
/// ```rust
/// use corelib::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_replicas(160)
///     .add_node("a".to_string())
///     .add_node_with_weight("b".to_string(), 50)
///     .build();
///
/// assert_eq!(ring.vnode_count(), 160 + 80);
/// ```
pub struct RingBuilder<N = String> {
    replicas: usize,
    partitioner: Option<Arc<dyn Partitioner>>,
    nodes: Vec<(N, Share)>,
}

impl<N: RingNode> RingBuilder<N> {
    pub fn new() -> Self {
        Self {
            replicas: MIN_REPLICAS,
            partitioner: None,
            nodes: Vec::new(),
        }
    }

    /// Set vnodes per node at weight 100. Raised to [`MIN_REPLICAS`] on build.
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_partitioner<P: Partitioner>(mut self, partitioner: P) -> Self {
        self.partitioner = Some(Arc::new(partitioner));
        self
    }

    pub fn with_shared_partitioner(mut self, partitioner: Arc<dyn Partitioner>) -> Self {
        self.partitioner = Some(partitioner);
        self
    }

    pub fn add_node(mut self, node: N) -> Self {
        self.nodes.push((node, Share::Full));
        self
    }

    pub fn add_node_with_replicas(mut self, node: N, replicas: usize) -> Self {
        self.nodes.push((node, Share::Replicas(replicas)));
        self
    }

    pub fn add_node_with_weight(mut self, node: N, weight: u32) -> Self {
        self.nodes.push((node, Share::Weight(weight)));
        self
    }

    pub fn build(self) -> HashRing<N> {
        let ring = HashRing::custom(self.replicas, self.partitioner);
        for (node, share) in self.nodes {
            match share {
                Share::Full => ring.add(node),
                Share::Replicas(replicas) => ring.add_with_replicas(node, replicas),
                Share::Weight(weight) => ring.add_with_weight(node, weight),
            }
        }
        ring
    }
}

impl RingBuilder<String> {
    /// Queue a parsed `name[:weight]` spec.
    pub fn add_spec(self, spec: NodeSpec) -> Self {
        self.add_node_with_weight(spec.name, spec.weight)
    }
}

impl<N: RingNode> Default for RingBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
