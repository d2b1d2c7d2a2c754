//! Serializable ring configuration.

use crate::error::{Error, Result};
use crate::node::RingNode;
use crate::partitioner::{Partitioner, SipPartitioner, Xxh3Partitioner};
use crate::ring::{HashRing, RingBuilder, MIN_REPLICAS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Built-in partitioners selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionerKind {
    /// XXH3-64, the default.
    #[default]
    Xxh3,
    /// SipHash-1-3 with zero keys.
    Sip13,
}

impl PartitionerKind {
    pub fn partitioner(self) -> Arc<dyn Partitioner> {
        match self {
            PartitionerKind::Xxh3 => Arc::new(Xxh3Partitioner),
            PartitionerKind::Sip13 => Arc::new(SipPartitioner),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartitionerKind::Xxh3 => "xxh3",
            PartitionerKind::Sip13 => "sip13",
        }
    }
}

impl FromStr for PartitionerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xxh3" => Ok(PartitionerKind::Xxh3),
            "sip13" | "siphash" => Ok(PartitionerKind::Sip13),
            _ => Err(Error::UnknownPartitioner(s.to_string())),
        }
    }
}

impl fmt::Display for PartitionerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ring settings, typically loaded from a JSON or TOML document.
///
/// Missing fields take their defaults, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Vnodes per node at weight 100. Raised to [`MIN_REPLICAS`] if lower.
    pub replicas: usize,
    pub partitioner: PartitionerKind,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: MIN_REPLICAS,
            partitioner: PartitionerKind::default(),
        }
    }
}

impl RingConfig {
    /// An empty ring with these settings.
    pub fn build<N: RingNode>(&self) -> HashRing<N> {
        HashRing::custom(self.replicas, Some(self.partitioner.partitioner()))
    }

    /// A builder preloaded with these settings.
    pub fn builder<N: RingNode>(&self) -> RingBuilder<N> {
        RingBuilder::new()
            .with_replicas(self.replicas)
            .with_shared_partitioner(self.partitioner.partitioner())
    }
}
