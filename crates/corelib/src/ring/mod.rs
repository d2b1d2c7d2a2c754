//! Consistent hash ring implementation.
//!
//! The ring manages virtual node positions and provides lookup operations
//! for finding the physical node responsible for a key.

pub mod builder;
pub mod index;
pub mod ring;

pub use builder::RingBuilder;
pub use index::VNodeIndex;
pub use ring::HashRing;

/// Smallest replica amplification factor a ring will run with.
pub const MIN_REPLICAS: usize = 100;

/// Weight that maps to the full configured replica count.
pub const TOP_WEIGHT: u32 = 100;

/// Salt prepended to a key when breaking ties between colliding nodes.
pub const COLLISION_SALT: u64 = 16_777_619;
