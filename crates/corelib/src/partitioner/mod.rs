//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys (and virtual node
//! labels) into 64-bit positions on the hash ring.

pub mod func;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use func::FnPartitioner;
pub use sip::SipPartitioner;
pub use traits::Partitioner;
pub use xxh3::Xxh3Partitioner;
