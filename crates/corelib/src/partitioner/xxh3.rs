//! XXH3 partitioner implementation (the ring default).

use crate::partitioner::traits::Partitioner;
use xxhash_rust::xxh3::xxh3_64;

/// XXH3-64 partitioner.
///
/// Unseeded, so positions are stable across processes and machines.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    #[inline]
    fn partition(&self, key: &[u8]) -> u64 {
        xxh3_64(key)
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
