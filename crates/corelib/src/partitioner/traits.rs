//! Core partitioner trait definitions.

/// A partitioner converts bytes into a position on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// lookups under the ring's shared lock without extra synchronization.
///
/// Implementations must be deterministic: identical input bytes always
/// produce the identical position. Output should be spread roughly
/// uniformly over `u64`; a cryptographic guarantee is not required.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a ring position.
    ///
    /// # Arguments
    ///
    /// * `key` - The bytes to place on the ring
    fn partition(&self, key: &[u8]) -> u64;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
