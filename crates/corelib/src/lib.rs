//! Core library for consistent hashing.
//!
//! This crate provides a consistent hash ring mapping lookup keys onto a
//! dynamic set of physical nodes:
//! - Pluggable partitioners (bytes to 64-bit ring positions)
//! - Virtual node generation and the sorted position index
//! - Weighted and replica-capped node registration
//! - A reader-writer locked ring facade with a builder and config layer
//!
//! ```rust
//! use corelib::HashRing;
//!
//! let ring: HashRing = HashRing::new();
//! ring.add("cache-a".to_string());
//! ring.add_with_weight("cache-b".to_string(), 50);
//!
//! let owner = ring.get("user:42");
//! assert!(owner.is_some());
//! ```

pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod vnode;

pub use config::{PartitionerKind, RingConfig};
pub use error::{Error, Result};
pub use node::NodeSpec;
pub use partitioner::Partitioner;
pub use ring::{HashRing, RingBuilder, MIN_REPLICAS, TOP_WEIGHT};
pub use vnode::VirtualNode;
